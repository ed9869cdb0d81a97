use dioxus::prelude::*;
use once_cell::sync::OnceCell;

const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");
const NAVBAR_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/styling/navbar.css"
));

/// Platform-supplied navigation links.
///
/// `ui` never sees a platform's `Route` enum, so each launcher registers
/// closures that build its own `Link` around the label passed in:
///
/// ```ignore
/// register_nav(NavBuilder {
///     upload: |label| rsx!( Link { class: "navbar__link", to: Route::Upload {}, "{label}" } ),
///     table: |label| rsx!( Link { class: "navbar__link", to: Route::Table {}, "{label}" } ),
/// });
/// ```
///
/// Without a registered builder `AppNavbar` renders its `children` instead.
pub struct NavBuilder {
    pub upload: fn(label: &str) -> Element,
    pub table: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

/// First registration wins; later calls are ignored.
pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

#[component]
pub fn AppNavbar(children: Element) -> Element {
    let links = NAV_BUILDER.get().map(|b| ((b.upload)("Upload"), (b.table)("Table")));

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }
        if cfg!(all(not(debug_assertions), not(target_arch = "wasm32"))) {
            document::Style { "{NAVBAR_CSS_INLINE}" }
        }

        header { id: "navbar", class: "navbar",
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-link",
                        span { class: "navbar__brand-spark", aria_hidden: "true" }
                        span { class: "navbar__brand-mark", "Ratesheet" }
                    }
                    span { class: "navbar__brand-subtitle", "Supplier rates at a glance" }
                }

                nav { class: "navbar__links",
                    if let Some((upload, table)) = links {
                        {upload}
                        {table}
                    } else {
                        {children}
                    }
                }
            }
        }
    }
}
