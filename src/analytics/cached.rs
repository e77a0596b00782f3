//! Memoized dashboard computations
//!
//! Entries are keyed by the store generation together with the exact
//! filter criteria, so a reload or a criteria change never returns a stale
//! dashboard. Reloads also drop every entry.

use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

use crate::analytics::Dashboard;
use crate::config::CacheConfig;
use crate::filter::FilterCriteria;
use crate::store::RecordStore;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    generation: u64,
    criteria: FilterCriteria,
}

pub struct DashboardCache {
    /// `None` when memoization is disabled
    cache: Option<Cache<CacheKey, Arc<Dashboard>>>,
}

impl DashboardCache {
    pub fn new(config: &CacheConfig) -> Self {
        if !config.enabled {
            return Self::disabled();
        }

        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(Duration::from_secs(config.ttl_secs))
            .build();

        Self { cache: Some(cache) }
    }

    pub fn disabled() -> Self {
        Self { cache: None }
    }

    /// Return the dashboard for `criteria`, computing it on a miss
    pub async fn get_or_compute(
        &self,
        generation: u64,
        store: &RecordStore,
        criteria: FilterCriteria,
    ) -> Arc<Dashboard> {
        let Some(cache) = &self.cache else {
            return Arc::new(Dashboard::compute(store, &criteria));
        };

        let key = CacheKey {
            generation,
            criteria: criteria.clone(),
        };
        cache
            .get_with(key, async { Arc::new(Dashboard::compute(store, &criteria)) })
            .await
    }

    /// Drop every memoized dashboard
    pub fn invalidate_all(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate_all();
        }
    }

    /// Approximate number of memoized dashboards
    pub async fn entry_count(&self) -> u64 {
        match &self.cache {
            Some(cache) => {
                cache.run_pending_tasks().await;
                cache.entry_count()
            }
            None => 0,
        }
    }
}
