use async_trait::async_trait;

use super::{LoadResult, RecordSource, RecordStore};
use crate::models::LogRecord;

/// Fixed set of records held in memory
///
/// Every load hands out a fresh store over a copy of the same records.
pub struct MemorySource {
    name: String,
    records: Vec<LogRecord>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, records: Vec<LogRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }
}

#[async_trait]
impl RecordSource for MemorySource {
    async fn load(&self) -> LoadResult<RecordStore> {
        Ok(RecordStore::new(self.records.clone(), self.describe()))
    }

    fn describe(&self) -> String {
        format!("memory:{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_source_loads_fresh_store() {
        let source = MemorySource::new("empty", Vec::new());
        let store = source.load().await.unwrap();
        assert!(store.is_empty());
        assert_eq!(store.info().source, "memory:empty");
    }
}
