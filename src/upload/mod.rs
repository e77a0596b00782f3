//! User supplied CSV uploads
//!
//! An upload is an arbitrary table shown next to the dashboard. It is
//! never merged into the record store or fed to the aggregates.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("uploaded file is empty")]
    Empty,
    #[error("uploaded file has no header row")]
    MissingHeader,
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Parsed upload, kept as plain text cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl UploadedTable {
    /// Parse CSV bytes; every row must have as many cells as the header
    pub fn parse(bytes: &[u8]) -> Result<Self, UploadError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(UploadError::Empty);
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(false)
            .from_reader(bytes);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(UploadError::MissingHeader);
        }

        let rows = reader
            .records()
            .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
            .collect::<Result<Vec<Vec<String>>, _>>()?;

        Ok(Self { headers, rows })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
