//! Aggregation functions over a filtered view
//!
//! Every function here is pure: it reads the view and returns a fresh
//! summary. None of them fail; empty or malformed input degrades to an
//! empty table, a zero count, or `None`.

use statrs::statistics::Statistics;
use std::collections::{BTreeMap, HashMap};

use crate::analytics::models::{CountTable, Facet, GenderCounts, Histogram, HistogramBin};
use crate::filter::FilteredView;
use crate::models::Gender;

/// Entries kept by the top-N bar charts
pub const TOP_N: usize = 10;

/// Bins used by the time-spent histogram
pub const HISTOGRAM_BINS: usize = 30;

/// Total visits in the view
pub fn total_visits(view: &FilteredView<'_>) -> u64 {
    view.len() as u64
}

pub fn gender_counts(view: &FilteredView<'_>) -> GenderCounts {
    view.iter()
        .fold(GenderCounts::default(), |mut counts, record| {
            match record.gender {
                Gender::Female => counts.female += 1,
                Gender::Male => counts.male += 1,
                Gender::Other => {}
            }
            counts
        })
}

/// Mean number of visits per distinct date present in the view
///
/// Dates inside the requested range with no visits are not counted as
/// zero-visit days. Returns `None` when the view holds no dated records.
pub fn average_visits_per_day(view: &FilteredView<'_>) -> Option<f64> {
    let mut per_day: HashMap<_, u64> = HashMap::new();
    for date in view.iter().filter_map(|r| r.date) {
        *per_day.entry(date).or_insert(0) += 1;
    }

    if per_day.is_empty() {
        return None;
    }

    let counts: Vec<f64> = per_day.into_values().map(|c| c as f64).collect();
    Some(Statistics::mean(&counts))
}

/// Round for display, two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Count each distinct non-empty value in first-seen order
fn count_first_seen<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, u64)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, u64)> = Vec::new();

    for value in values.filter(|v| !v.is_empty()) {
        match index.get(value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value, counts.len());
                counts.push((value, 1));
            }
        }
    }

    counts
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect()
}

/// Frequency of every value of `facet`, most frequent first
///
/// Ties keep first-seen order.
pub fn value_counts(view: &FilteredView<'_>, facet: Facet) -> CountTable {
    let mut rows = count_first_seen(view.iter().map(|r| facet.value(r)));
    // Stable sort keeps first-seen order among equal counts
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    CountTable::new(facet.column(), rows)
}

/// The `n` most frequent values of `facet`
pub fn top_counts(view: &FilteredView<'_>, facet: Facet, n: usize) -> CountTable {
    let mut table = value_counts(view, facet);
    table.rows.truncate(n);
    table
}

/// Visits per content type, ordered by label, untruncated
pub fn content_type_distribution(view: &FilteredView<'_>) -> CountTable {
    let facet = Facet::ContentType;
    let mut rows = count_first_seen(view.iter().map(|r| facet.value(r)));
    rows.sort_by(|a, b| a.0.cmp(&b.0));
    CountTable::new(facet.column(), rows)
}

/// Visits per hour of day
///
/// Records whose timestamp did not parse are left out of this aggregate
/// only. Hours without visits are absent.
pub fn hourly_traffic(view: &FilteredView<'_>) -> BTreeMap<u32, u64> {
    let mut hours = BTreeMap::new();
    for hour in view.iter().filter_map(|r| r.hour()) {
        *hours.entry(hour).or_insert(0) += 1;
    }
    hours
}

/// Hourly traffic as an exportable table
pub fn hourly_table(hours: &BTreeMap<u32, u64>) -> CountTable {
    CountTable::new(
        "Hour",
        hours
            .iter()
            .map(|(hour, count)| (hour.to_string(), *count))
            .collect(),
    )
}

/// Equal-width histogram of time spent, spanning the observed min and max
///
/// When every value is the same the range is widened by half a unit on
/// each side so the bins keep a non-zero width.
pub fn time_spent_histogram(view: &FilteredView<'_>, bins: usize) -> Histogram {
    let values: Vec<f64> = view.iter().filter_map(|r| r.time_spent_seconds).collect();
    if values.is_empty() || bins == 0 {
        return Histogram::default();
    }

    let mut min = Statistics::min(&values);
    let mut max = Statistics::max(&values);
    if min == max {
        min -= 0.5;
        max += 0.5;
    }

    let width = (max - min) / bins as f64;
    let last = bins - 1;
    let mut counts = vec![0u64; bins];
    for value in &values {
        let index = usize::min(((value - min) / width) as usize, last);
        counts[index] += 1;
    }

    Histogram {
        bins: counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: min + i as f64 * width,
                end: if i == last {
                    max
                } else {
                    min + (i + 1) as f64 * width
                },
                count,
            })
            .collect(),
    }
}

/// HTTP status frequencies among GET requests, most frequent first
pub fn get_status_counts(view: &FilteredView<'_>) -> CountTable {
    let facet = Facet::HttpStatus;
    let mut rows = count_first_seen(
        view.iter()
            .filter(|r| r.request_method == "GET")
            .map(|r| facet.value(r)),
    );
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    CountTable::new(facet.column(), rows)
}
