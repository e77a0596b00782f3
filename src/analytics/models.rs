//! Data models for dashboard aggregates

use serde::{Deserialize, Serialize};

use crate::models::LogRecord;

/// Categorical column an aggregate can be grouped by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Country,
    Sport,
    ContentType,
    HttpStatus,
}

impl Facet {
    /// Value of this column for one record; empty text means missing
    pub fn value<'r>(&self, record: &'r LogRecord) -> &'r str {
        match self {
            Facet::Country => &record.country,
            Facet::Sport => &record.sport,
            Facet::ContentType => &record.content_type,
            Facet::HttpStatus => &record.http_status,
        }
    }

    /// Column header as it appears in the dataset and in exports
    pub fn column(&self) -> &'static str {
        match self {
            Facet::Country => "Country",
            Facet::Sport => "Sport",
            Facet::ContentType => "Content Type",
            Facet::HttpStatus => "HTTP Status",
        }
    }
}

/// Label to count mapping, in the order the aggregate defines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountTable {
    pub label_header: String,
    pub value_header: String,
    pub rows: Vec<(String, u64)>,
}

impl CountTable {
    pub const DEFAULT_VALUE_HEADER: &'static str = "count";

    pub fn new(label_header: impl Into<String>, rows: Vec<(String, u64)>) -> Self {
        Self {
            label_header: label_header.into(),
            value_header: Self::DEFAULT_VALUE_HEADER.to_string(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.rows.iter().map(|(_, count)| count).sum()
    }

    pub fn get(&self, label: &str) -> Option<u64> {
        self.rows
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, count)| *count)
    }
}

/// Female and male visit counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderCounts {
    pub female: u64,
    pub male: u64,
}

/// One equal-width histogram bin; the last bin also includes its upper edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// The exportable dashboard aggregates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AggregateKind {
    PopularSports,
    ContentTypes,
    HourlyTraffic,
    CountryVisits,
    TimeSpent,
    HttpStatus,
}

impl AggregateKind {
    pub const ALL: [AggregateKind; 6] = [
        AggregateKind::PopularSports,
        AggregateKind::ContentTypes,
        AggregateKind::HourlyTraffic,
        AggregateKind::CountryVisits,
        AggregateKind::TimeSpent,
        AggregateKind::HttpStatus,
    ];

    /// URL slug used by the export endpoint and the CLI
    pub fn slug(&self) -> &'static str {
        match self {
            AggregateKind::PopularSports => "popular-sports",
            AggregateKind::ContentTypes => "content-types",
            AggregateKind::HourlyTraffic => "hourly-traffic",
            AggregateKind::CountryVisits => "country-visits",
            AggregateKind::TimeSpent => "time-spent",
            AggregateKind::HttpStatus => "http-status",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    /// Download file name for the exported CSV
    pub fn file_name(&self) -> &'static str {
        match self {
            AggregateKind::PopularSports => "popular_sports.csv",
            AggregateKind::ContentTypes => "content_type_distribution.csv",
            AggregateKind::HourlyTraffic => "hourly_traffic.csv",
            AggregateKind::CountryVisits => "country_visits.csv",
            AggregateKind::TimeSpent => "time_spent_distribution.csv",
            AggregateKind::HttpStatus => "http_status_counts.csv",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EXPECTED_COLUMNS;

    #[test]
    fn test_facet_columns_are_dataset_headers() {
        for facet in [
            Facet::Country,
            Facet::Sport,
            Facet::ContentType,
            Facet::HttpStatus,
        ] {
            assert!(EXPECTED_COLUMNS.contains(&facet.column()));
        }
    }

    #[test]
    fn test_aggregate_kind_slugs_round_trip() {
        for kind in AggregateKind::ALL {
            assert_eq!(AggregateKind::from_slug(kind.slug()), Some(kind));
        }
        assert_eq!(AggregateKind::from_slug("visitors"), None);
    }

    #[test]
    fn test_aggregate_kind_serde_matches_slug() {
        let json = serde_json::to_string(&AggregateKind::HttpStatus).unwrap();
        assert_eq!(json, "\"http-status\"");
    }

    #[test]
    fn test_count_table_lookup() {
        let table = CountTable::new(
            "Sport",
            vec![("Judo".to_string(), 4), ("Rowing".to_string(), 2)],
        );
        assert_eq!(table.get("Judo"), Some(4));
        assert_eq!(table.get("Sailing"), None);
        assert_eq!(table.total(), 6);
    }
}
