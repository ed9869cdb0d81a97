//! Shared UI crate for Ratesheet. Parsing, aggregation, view state and every
//! page live here; the platform crates only add routing and a launcher.

use dioxus::prelude::*;

pub mod core;
pub mod tables;
pub mod views;

pub mod components {
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}

/// Unified theme shared by every platform. Desktop embeds the same file.
pub const THEME_CSS: Asset = asset!("/assets/theme/main.css");
