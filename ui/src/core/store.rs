//! The active dataset shared by the upload and table pages.
//!
//! Created once at app start and handed to the component tree as context. The
//! upload page is the only writer; table views read. Tree uploads are built and
//! aggregated once when they land, so re-renders never refold the tree.

use tracing::info;

use super::aggregate::{aggregate_forest, AggregatedNode};
use super::ingest::{ParsedDataset, UploadError};
use super::schema::{DatasetKind, DatasetRows, FlatRow};
use super::tree::build_tree;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetStore {
    headers: Vec<String>,
    rows: DatasetRows,
    forest: Vec<AggregatedNode>,
    revision: u64,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(&self) -> DatasetKind {
        self.rows.kind()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &DatasetRows {
        &self.rows
    }

    /// Comparison rows; empty for tree datasets.
    pub fn flat_rows(&self) -> &[FlatRow] {
        match &self.rows {
            DatasetRows::Flat(rows) => rows,
            DatasetRows::Tree(_) => &[],
        }
    }

    /// Aggregated category forest; empty for comparison datasets.
    pub fn forest(&self) -> &[AggregatedNode] {
        &self.forest
    }

    /// Bumped on every write so views can tell datasets apart.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.headers.is_empty()
    }

    pub fn set(&mut self, dataset: ParsedDataset) {
        self.forest = match &dataset.rows {
            DatasetRows::Tree(rows) => aggregate_forest(&build_tree(rows)),
            DatasetRows::Flat(_) => Vec::new(),
        };
        self.headers = dataset.headers;
        self.rows = dataset.rows;
        self.revision += 1;
        info!(
            kind = self.kind().as_str(),
            rows = self.rows.len(),
            revision = self.revision,
            "dataset stored"
        );
    }

    /// Publishes a finished upload. On failure the store is left as it was and
    /// the error is handed back for display.
    pub fn accept(&mut self, result: Result<ParsedDataset, UploadError>) -> Result<(), UploadError> {
        let dataset = result?;
        self.set(dataset);
        Ok(())
    }

    /// Drops rows and headers; the mode of the last upload is kept.
    pub fn clear(&mut self) {
        self.rows = DatasetRows::empty(self.kind());
        self.headers.clear();
        self.forest.clear();
        self.revision += 1;
        info!(revision = self.revision, "dataset cleared");
    }
}
