//! CSV ingest: streams an uploaded file through the row validators.
//!
//! Rows that fail validation are dropped silently; the only aggregate signal is
//! whether anything survived. The async entry point hands control back to the
//! event loop after every `chunk_size` bytes so large files never block a frame,
//! and abandons the parse as soon as a newer upload supersedes it.

use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;
use tracing::{debug, info};

use super::schema::{ComparisonRow, DatasetKind, DatasetRows, HierarchyRow, COMPARISON_HEADERS};
use super::timing;

/// Bytes consumed between two event-loop turns.
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    pub chunk_size: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

#[derive(Debug, Error)]
pub enum UploadError {
    /// The selected file could not be read at all.
    #[error("Failed to parse CSV")]
    Unreadable,
    #[error("Failed to parse CSV")]
    Malformed(#[from] csv::Error),
    #[error("CSV validation failed. Please check the format.")]
    NoValidRows,
}

/// Output of a successful ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDataset {
    pub headers: Vec<String>,
    pub rows: DatasetRows,
}

impl ParsedDataset {
    pub fn kind(&self) -> DatasetKind {
        self.rows.kind()
    }
}

/// Parses a whole file in one pass.
pub fn parse_dataset(bytes: &[u8], kind: DatasetKind) -> Result<ParsedDataset, UploadError> {
    let mut reader = reader_for(bytes);
    let headers = reader.headers()?.clone();
    let mut collector = RowCollector::new(kind);
    let mut record = StringRecord::new();

    loop {
        match next_record(&mut reader, &mut record)? {
            Step::Record => collector.push(&record, &headers),
            Step::Skipped => collector.skip(),
            Step::Done => break,
        }
    }

    collector.finish()
}

/// Parses a file across several event-loop turns.
///
/// Returns `Ok(None)` when `is_current` reports that the upload was superseded
/// before the parse completed.
pub async fn parse_dataset_chunked<F>(
    bytes: &[u8],
    kind: DatasetKind,
    options: IngestOptions,
    is_current: F,
) -> Result<Option<ParsedDataset>, UploadError>
where
    F: Fn() -> bool,
{
    let chunk_size = options.chunk_size.max(1) as u64;
    let mut reader = reader_for(bytes);
    let headers = reader.headers()?.clone();
    let mut collector = RowCollector::new(kind);
    let mut record = StringRecord::new();
    let mut boundary = chunk_size;
    let mut chunks = 1usize;

    loop {
        match next_record(&mut reader, &mut record)? {
            Step::Record => collector.push(&record, &headers),
            Step::Skipped => collector.skip(),
            Step::Done => break,
        }

        let consumed = reader.position().byte();
        if consumed >= boundary {
            boundary = consumed + chunk_size;
            chunks += 1;
            timing::yield_now().await;
            if !is_current() {
                debug!(chunks, "upload superseded, abandoning parse");
                return Ok(None);
            }
        }
    }

    if !is_current() {
        debug!(chunks, "upload superseded after final chunk");
        return Ok(None);
    }
    debug!(chunks, "chunked parse complete");
    collector.finish().map(Some)
}

/// Generation counter guarding against overlapping uploads.
///
/// Each upload takes a ticket; beginning another upload or removing the file
/// invalidates every earlier ticket, so a stale parse can never publish.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadGeneration {
    current: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket(u64);

impl UploadGeneration {
    pub fn begin(&mut self) -> UploadTicket {
        self.invalidate();
        UploadTicket(self.current)
    }

    pub fn invalidate(&mut self) {
        self.current = self.current.wrapping_add(1);
    }

    pub fn is_current(&self, ticket: UploadTicket) -> bool {
        self.current == ticket.0
    }

    /// Hands `outcome` back only while `ticket` is still the latest upload.
    pub fn keep_if_current<T>(&self, ticket: UploadTicket, outcome: T) -> Option<T> {
        self.is_current(ticket).then_some(outcome)
    }
}

fn reader_for(bytes: &[u8]) -> csv::Reader<&[u8]> {
    ReaderBuilder::new().flexible(true).from_reader(bytes)
}

enum Step {
    Record,
    Skipped,
    Done,
}

fn next_record(
    reader: &mut csv::Reader<&[u8]>,
    record: &mut StringRecord,
) -> Result<Step, UploadError> {
    match reader.read_record(record) {
        Ok(true) => Ok(Step::Record),
        Ok(false) => Ok(Step::Done),
        Err(err) if matches!(err.kind(), csv::ErrorKind::Io(_)) => Err(err.into()),
        Err(err) => {
            debug!(%err, "skipping unreadable record");
            Ok(Step::Skipped)
        }
    }
}

struct RowCollector {
    rows: DatasetRows,
    dropped: usize,
}

impl RowCollector {
    fn new(kind: DatasetKind) -> Self {
        Self {
            rows: DatasetRows::empty(kind),
            dropped: 0,
        }
    }

    fn push(&mut self, record: &StringRecord, headers: &StringRecord) {
        let outcome = match self.rows {
            DatasetRows::Flat(ref mut rows) => record
                .deserialize::<ComparisonRow>(Some(headers))
                .map(|row| rows.push(row.into())),
            DatasetRows::Tree(ref mut rows) => record
                .deserialize::<HierarchyRow>(Some(headers))
                .map(|row| rows.push(row)),
        };

        if let Err(err) = outcome {
            debug!(%err, line = record.position().map(|p| p.line()), "row failed validation");
            self.dropped += 1;
        }
    }

    fn skip(&mut self) {
        self.dropped += 1;
    }

    fn finish(self) -> Result<ParsedDataset, UploadError> {
        let kind = self.rows.kind();
        info!(
            kind = kind.as_str(),
            accepted = self.rows.len(),
            dropped = self.dropped,
            "csv ingest finished"
        );

        if self.rows.is_empty() {
            return Err(UploadError::NoValidRows);
        }

        Ok(ParsedDataset {
            headers: COMPARISON_HEADERS.iter().map(|h| h.to_string()).collect(),
            rows: self.rows,
        })
    }
}
