//! One full dashboard computation for a set of filter criteria

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::analytics::aggregator::{
    average_visits_per_day, content_type_distribution, gender_counts, get_status_counts,
    hourly_table, hourly_traffic, round2, time_spent_histogram, top_counts, total_visits,
    HISTOGRAM_BINS, TOP_N,
};
use crate::analytics::models::{AggregateKind, CountTable, Facet, Histogram};
use crate::export::{count_table_csv, histogram_csv, ExportResult};
use crate::filter::{self, FilterCriteria};
use crate::store::RecordStore;

/// Headline metrics shown above the charts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub total_visits: u64,
    pub female_visits: u64,
    pub male_visits: u64,
    /// Rounded to two decimals; `None` when nothing matched
    pub avg_visits_per_day: Option<f64>,
}

/// Every aggregate over one filtered view
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub criteria: FilterCriteria,
    pub metrics: Metrics,
    pub popular_sports: CountTable,
    pub content_types: CountTable,
    pub hourly_traffic: BTreeMap<u32, u64>,
    pub country_visits: CountTable,
    pub time_spent: Histogram,
    pub http_status: CountTable,
}

impl Dashboard {
    /// Filter the store once and compute every aggregate from that view
    pub fn compute(store: &RecordStore, criteria: &FilterCriteria) -> Self {
        let view = filter::apply(store.records(), criteria);
        debug!(
            "Computing dashboard over {} of {} records",
            view.len(),
            store.len()
        );

        let genders = gender_counts(&view);
        let metrics = Metrics {
            total_visits: total_visits(&view),
            female_visits: genders.female,
            male_visits: genders.male,
            avg_visits_per_day: average_visits_per_day(&view).map(round2),
        };

        Self {
            criteria: criteria.clone(),
            metrics,
            popular_sports: top_counts(&view, Facet::Sport, TOP_N),
            content_types: content_type_distribution(&view),
            hourly_traffic: hourly_traffic(&view),
            country_visits: top_counts(&view, Facet::Country, TOP_N),
            time_spent: time_spent_histogram(&view, HISTOGRAM_BINS),
            http_status: get_status_counts(&view),
        }
    }

    /// CSV export of one aggregate
    pub fn export(&self, kind: AggregateKind) -> ExportResult<String> {
        match kind {
            AggregateKind::PopularSports => count_table_csv(&self.popular_sports),
            AggregateKind::ContentTypes => count_table_csv(&self.content_types),
            AggregateKind::HourlyTraffic => count_table_csv(&hourly_table(&self.hourly_traffic)),
            AggregateKind::CountryVisits => count_table_csv(&self.country_visits),
            AggregateKind::TimeSpent => histogram_csv(&self.time_spent),
            AggregateKind::HttpStatus => count_table_csv(&self.http_status),
        }
    }
}
