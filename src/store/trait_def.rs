use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use super::RecordStore;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read dataset {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset has no header row")]
    MissingHeader,
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Somewhere a full set of log records can be (re)loaded from
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Load every record, producing a fresh immutable store
    async fn load(&self) -> LoadResult<RecordStore>;

    /// Human readable description used in logs and the filters endpoint
    fn describe(&self) -> String;
}
