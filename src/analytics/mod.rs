//! Dashboard analytics
//!
//! Pure aggregation functions over a filtered view of the record store,
//! the combined dashboard snapshot built from them, and an optional
//! memoization layer keyed by filter criteria.

pub mod aggregator;
pub mod cached;
pub mod dashboard;
pub mod models;

pub use cached::DashboardCache;
pub use dashboard::{Dashboard, Metrics};
pub use models::{AggregateKind, CountTable, Facet, GenderCounts, Histogram, HistogramBin};
