//! The two table renderings of an uploaded dataset. Each keeps its pure view
//! state in `state` and its component in `view`.

pub mod comparison;
pub mod tree;

pub use comparison::ComparisonTable;
pub use tree::TreeTable;
