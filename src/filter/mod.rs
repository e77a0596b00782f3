//! Filter engine
//!
//! Applies the user's date range, country and sport selections to the
//! record store. The store is only borrowed: a filtered view is a new list
//! of references in store order and is rebuilt for every criteria change.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::models::LogRecord;

/// Active filter predicates, combined with logical AND
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FilterCriteria {
    /// Inclusive lower date bound
    pub start_date: NaiveDate,
    /// Inclusive upper date bound
    pub end_date: NaiveDate,
    /// Allowed countries; empty means no restriction
    pub countries: BTreeSet<String>,
    /// Allowed sports (the category facet); empty means no restriction
    pub sports: BTreeSet<String>,
}

impl FilterCriteria {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            countries: BTreeSet::new(),
            sports: BTreeSet::new(),
        }
    }

    pub fn with_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries = countries.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sports<I, S>(mut self, sports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sports = sports.into_iter().map(Into::into).collect();
        self
    }

    /// Whether a single record satisfies every active predicate
    ///
    /// A record without a parseable date never matches the date range.
    pub fn matches(&self, record: &LogRecord) -> bool {
        let in_range = record
            .date
            .is_some_and(|d| d >= self.start_date && d <= self.end_date);

        in_range
            && (self.countries.is_empty() || self.countries.contains(&record.country))
            && (self.sports.is_empty() || self.sports.contains(&record.sport))
    }
}

/// Read-only subset of the record store matching one set of criteria
#[derive(Debug, Clone, Default)]
pub struct FilteredView<'a> {
    records: Vec<&'a LogRecord>,
}

impl<'a> FilteredView<'a> {
    /// View over the given records without any filtering
    pub fn all(records: &'a [LogRecord]) -> Self {
        Self {
            records: records.iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a LogRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn records(&self) -> &[&'a LogRecord] {
        &self.records
    }
}

/// Filter `records` by `criteria`, preserving their relative order
///
/// An inverted date range (`start_date > end_date`) yields an empty view.
pub fn apply<'a>(records: &'a [LogRecord], criteria: &FilterCriteria) -> FilteredView<'a> {
    if criteria.start_date > criteria.end_date {
        return FilteredView::default();
    }

    FilteredView {
        records: records.iter().filter(|r| criteria.matches(r)).collect(),
    }
}
