//! Immutable in-memory record store

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashSet;

use crate::filter::FilterCriteria;
use crate::models::LogRecord;

/// Every record loaded from one source, never mutated after load
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<LogRecord>,
    source: String,
    loaded_at: DateTime<Utc>,
    skipped_rows: usize,
}

/// Load metadata surfaced to clients alongside the filter options
#[derive(Debug, Clone, Serialize)]
pub struct StoreInfo {
    pub source: String,
    pub loaded_at: DateTime<Utc>,
    pub record_count: usize,
    pub skipped_rows: usize,
}

impl RecordStore {
    pub fn new(records: Vec<LogRecord>, source: impl Into<String>) -> Self {
        Self::with_skipped(records, source, 0)
    }

    pub fn with_skipped(
        records: Vec<LogRecord>,
        source: impl Into<String>,
        skipped_rows: usize,
    ) -> Self {
        Self {
            records,
            source: source.into(),
            loaded_at: Utc::now(),
            skipped_rows,
        }
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn info(&self) -> StoreInfo {
        StoreInfo {
            source: self.source.clone(),
            loaded_at: self.loaded_at,
            record_count: self.records.len(),
            skipped_rows: self.skipped_rows,
        }
    }

    /// Earliest and latest parseable record date
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.records
            .iter()
            .filter_map(|r| r.date)
            .fold(None, |bounds, date| match bounds {
                None => Some((date, date)),
                Some((min, max)) => Some((min.min(date), max.max(date))),
            })
    }

    /// Distinct countries in first-seen order
    pub fn countries(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.country.as_str()))
    }

    /// Distinct sports in first-seen order
    pub fn sports(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.sport.as_str()))
    }

    /// Criteria spanning the whole store with no facet restriction
    pub fn default_criteria(&self) -> FilterCriteria {
        let (start_date, end_date) = self
            .date_bounds()
            .unwrap_or((NaiveDate::MIN, NaiveDate::MAX));
        FilterCriteria::new(start_date, end_date)
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .map(str::to_string)
        .collect()
}
