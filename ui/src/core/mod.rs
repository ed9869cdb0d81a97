//! Platform-agnostic logic: CSV ingest, the category tree and its aggregates,
//! heat-map and pinning helpers, and the shared dataset store.

pub mod aggregate;
pub mod format;
pub mod heatmap;
pub mod ingest;
pub mod schema;
pub mod sticky;
pub mod store;
pub mod timing;
pub mod tree;
