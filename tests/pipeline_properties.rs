//! Integration tests for the filter and aggregation pipeline
//!
//! These tests drive the public API the way the dashboard does: build a
//! store, derive criteria, filter, then aggregate and export.

use chrono::NaiveDate;
use funolympics::analytics::aggregator::{
    average_visits_per_day, gender_counts, get_status_counts, hourly_traffic, top_counts,
    total_visits, TOP_N,
};
use funolympics::analytics::{AggregateKind, Dashboard, Facet};
use funolympics::export::parse_count_table;
use funolympics::filter::{self, FilterCriteria};
use funolympics::models::{Gender, LogRecord};
use funolympics::store::RecordStore;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

fn record(day: u32, country: &str, sport: &str) -> LogRecord {
    let date = date(day);
    LogRecord {
        date: Some(date),
        timestamp: date.and_hms_opt(day % 24, 15, 0),
        country: country.to_string(),
        sport: sport.to_string(),
        gender: match day % 3 {
            0 => Gender::Female,
            1 => Gender::Male,
            _ => Gender::Other,
        },
        url: format!("/{}", sport.to_lowercase()),
        content_type: if day % 2 == 0 { "text/html" } else { "image/jpeg" }.to_string(),
        request_method: if day % 4 == 0 { "POST" } else { "GET" }.to_string(),
        http_status: if day % 5 == 0 { "404" } else { "200" }.to_string(),
        time_spent_seconds: Some(day as f64 * 3.5),
        ip_address: format!("10.0.0.{}", day),
    }
}

/// 100 records: 60 from the USA in January, 40 from elsewhere
fn scenario_store() -> RecordStore {
    let mut records = Vec::new();
    let others = ["Canada", "Mexico", "Brazil", "Japan"];
    let sports = ["Swimming", "Athletics", "Gymnastics", "Cycling", "Boxing"];
    for i in 0..100u32 {
        let day = i % 31 + 1;
        let country = if i < 60 { "USA" } else { others[(i % 4) as usize] };
        records.push(record(day, country, sports[(i % 5) as usize]));
    }
    RecordStore::new(records, "scenario")
}

#[test]
fn test_inverted_range_always_empty() {
    let store = scenario_store();
    for (start, end) in [(2, 1), (31, 1), (15, 14)] {
        let criteria = FilterCriteria::new(date(start), date(end));
        assert!(filter::apply(store.records(), &criteria).is_empty());

        let with_facets = criteria.with_countries(["USA"]).with_sports(["Boxing"]);
        assert!(filter::apply(store.records(), &with_facets).is_empty());
    }
}

#[test]
fn test_no_facets_is_pure_date_filter_and_idempotent() {
    let store = scenario_store();
    let criteria = FilterCriteria::new(date(5), date(20));

    let first = filter::apply(store.records(), &criteria);
    let second = filter::apply(store.records(), &criteria);
    assert_eq!(first.records(), second.records());

    let expected = store
        .records()
        .iter()
        .filter(|r| r.date.is_some_and(|d| d >= date(5) && d <= date(20)))
        .count();
    assert_eq!(first.len(), expected);
}

#[test]
fn test_total_visits_matches_view_length() {
    let store = scenario_store();
    for criteria in [
        store.default_criteria(),
        FilterCriteria::new(date(1), date(10)),
        store.default_criteria().with_sports(["Cycling", "Boxing"]),
        FilterCriteria::new(date(10), date(1)),
    ] {
        let view = filter::apply(store.records(), &criteria);
        assert_eq!(total_visits(&view), view.len() as u64);
    }
}

#[test]
fn test_gender_counts_bounded_by_total() {
    let store = scenario_store();
    let view = filter::apply(store.records(), &store.default_criteria());
    let genders = gender_counts(&view);
    assert!(genders.female + genders.male <= total_visits(&view));

    let records: Vec<LogRecord> = store
        .records()
        .iter()
        .filter(|r| r.gender != Gender::Other)
        .cloned()
        .collect();
    let binary = RecordStore::new(records, "binary");
    let view = filter::apply(binary.records(), &binary.default_criteria());
    let genders = gender_counts(&view);
    assert_eq!(genders.female + genders.male, total_visits(&view));
}

#[test]
fn test_top_counts_bounded_and_sorted() {
    let mut records = Vec::new();
    for (i, country) in (0..15).map(|i| (i, format!("Country{:02}", i))) {
        for _ in 0..(i % 4 + 1) {
            records.push(record(1, &country, "Judo"));
        }
    }
    let store = RecordStore::new(records, "many");
    let view = filter::apply(store.records(), &store.default_criteria());

    let table = top_counts(&view, Facet::Country, TOP_N);
    assert!(table.len() <= TOP_N);
    assert!(table.rows.windows(2).all(|w| w[0].1 >= w[1].1));
}

#[test]
fn test_usa_january_scenario() {
    let store = scenario_store();
    let criteria = FilterCriteria::new(date(1), date(31)).with_countries(["USA"]);

    let view = filter::apply(store.records(), &criteria);
    assert_eq!(view.len(), 60);
    assert_eq!(total_visits(&view), 60);
    assert!(view.iter().all(|r| r.country == "USA"));
}

#[test]
fn test_empty_view_aggregates_do_not_fail() {
    let store = scenario_store();
    let criteria = store.default_criteria().with_countries(["Nowhere"]);
    let view = filter::apply(store.records(), &criteria);

    assert!(view.is_empty());
    assert_eq!(average_visits_per_day(&view), None);
    assert!(hourly_traffic(&view).is_empty());
    assert!(get_status_counts(&view).is_empty());

    let dashboard = Dashboard::compute(&store, &criteria);
    for kind in AggregateKind::ALL {
        assert!(dashboard.export(kind).is_ok());
    }
}

#[test]
fn test_unparseable_timestamp_counts_in_total_only() {
    let mut broken = record(3, "USA", "Rowing");
    broken.timestamp = None;
    let store = RecordStore::new(vec![record(3, "USA", "Rowing"), broken], "ts");

    let view = filter::apply(store.records(), &store.default_criteria());
    assert_eq!(total_visits(&view), 2);
    assert_eq!(hourly_traffic(&view).values().sum::<u64>(), 1);
}

#[test]
fn test_exports_round_trip() {
    let store = scenario_store();
    let dashboard = Dashboard::compute(&store, &store.default_criteria());

    let sports = parse_count_table(&dashboard.export(AggregateKind::PopularSports).unwrap()).unwrap();
    assert_eq!(sports, dashboard.popular_sports);

    let countries = parse_count_table(&dashboard.export(AggregateKind::CountryVisits).unwrap()).unwrap();
    assert_eq!(countries, dashboard.country_visits);

    let status = parse_count_table(&dashboard.export(AggregateKind::HttpStatus).unwrap()).unwrap();
    assert_eq!(status, dashboard.http_status);

    let content = parse_count_table(&dashboard.export(AggregateKind::ContentTypes).unwrap()).unwrap();
    assert_eq!(content, dashboard.content_types);

    let hours = parse_count_table(&dashboard.export(AggregateKind::HourlyTraffic).unwrap()).unwrap();
    let parsed: Vec<(u32, u64)> = hours
        .rows
        .iter()
        .map(|(hour, count)| (hour.parse().unwrap(), *count))
        .collect();
    let expected: Vec<(u32, u64)> = dashboard
        .hourly_traffic
        .iter()
        .map(|(h, c)| (*h, *c))
        .collect();
    assert_eq!(parsed, expected);
}

#[test]
fn test_average_visits_per_day_over_present_dates() {
    let store = scenario_store();
    let criteria = FilterCriteria::new(date(1), date(31)).with_countries(["USA"]);
    let view = filter::apply(store.records(), &criteria);

    // 60 USA visits spread over 31 distinct days
    let avg = average_visits_per_day(&view).unwrap();
    assert!((avg - 60.0 / 31.0).abs() < 1e-9);

    let dashboard = Dashboard::compute(&store, &criteria);
    assert_eq!(dashboard.metrics.avg_visits_per_day, Some(1.94));
}
