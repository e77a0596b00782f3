//! Load and reload lifecycle of the shared record store

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::{LoadResult, RecordSource, RecordStore};

/// Current store plus the generation it was loaded as
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    pub generation: u64,
    pub store: Arc<RecordStore>,
}

/// Owns the record source and the store most recently loaded from it
///
/// Readers take a cheap snapshot and keep using it for a whole request;
/// a reload swaps in a new store without touching snapshots in flight.
pub struct StoreHandle {
    source: Arc<dyn RecordSource>,
    current: RwLock<StoreSnapshot>,
}

impl StoreHandle {
    /// Perform the initial load; failure here is fatal for the caller
    pub async fn load(source: Arc<dyn RecordSource>) -> LoadResult<Self> {
        let store = source.load().await?;
        Ok(Self {
            source,
            current: RwLock::new(StoreSnapshot {
                generation: 0,
                store: Arc::new(store),
            }),
        })
    }

    pub async fn snapshot(&self) -> StoreSnapshot {
        self.current.read().await.clone()
    }

    /// Reload from the source, keeping the previous store on failure
    pub async fn reload(&self) -> LoadResult<StoreSnapshot> {
        let store = match self.source.load().await {
            Ok(store) => store,
            Err(e) => {
                warn!("Reload of {} failed, keeping previous data: {}", self.source.describe(), e);
                return Err(e);
            }
        };

        let mut current = self.current.write().await;
        *current = StoreSnapshot {
            generation: current.generation + 1,
            store: Arc::new(store),
        };
        info!(
            "Reloaded {} records from {} (generation {})",
            current.store.len(),
            self.source.describe(),
            current.generation
        );

        Ok(current.clone())
    }
}
