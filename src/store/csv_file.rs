use async_trait::async_trait;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::{LoadError, LoadResult, RecordSource, RecordStore};
use crate::models::{LogRecord, RawLogRow, EXPECTED_COLUMNS};

/// Base dataset stored as a CSV file on local disk
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl RecordSource for CsvFileSource {
    async fn load(&self) -> LoadResult<RecordStore> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })?;

        let (records, skipped) = parse_records(bytes.as_slice())?;
        info!(
            "Loaded {} records from {} ({} skipped)",
            records.len(),
            self.path.display(),
            skipped
        );

        Ok(RecordStore::with_skipped(records, self.describe(), skipped))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Parse log records from CSV, returning the records and the number of
/// rows that were structurally unreadable
///
/// Rows keep their file order. Unparseable dates, timestamps and numbers
/// do not drop a row; only rows the CSV reader itself rejects are skipped.
pub fn parse_records<R: Read>(reader: R) -> LoadResult<(Vec<LogRecord>, usize)> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::MissingHeader);
    }

    let missing: Vec<&str> = EXPECTED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        warn!("Dataset is missing columns {:?}; values default to empty", missing);
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (index, row) in reader.deserialize::<RawLogRow>().enumerate() {
        match row {
            Ok(raw) => records.push(LogRecord::from(raw)),
            Err(e) => {
                // Row 1 is the header
                debug!("Skipping unreadable row {}: {}", index + 2, e);
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        warn!("Skipped {} unreadable rows", skipped);
    }

    Ok((records, skipped))
}
