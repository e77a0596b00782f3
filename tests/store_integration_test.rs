//! Integration tests for loading the base dataset from disk
//!
//! These tests write CSV fixtures to temporary files and exercise the
//! CSV source, the reload lifecycle and the dashboard over loaded data.

use funolympics::analytics::Dashboard;
use funolympics::store::{CsvFileSource, LoadError, RecordSource, StoreHandle};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

const HEADER: &str = "Date,Timestamp,Country,Sport,Gender,URL,Content Type,Request Method,HTTP Status,Time Spent (seconds),IP Address";

/// Helper to write a CSV fixture
fn write_fixture(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn test_load_csv_file() {
    let file = write_fixture(&[
        "2024-07-26,2024-07-26 08:00:00,France,Fencing,Female,/fencing,text/html,GET,200,45,203.0.113.1",
        "2024-07-26,2024-07-26 21:30:00,Japan,Judo,Male,/judo,video/mp4,GET,304,300,203.0.113.2",
        "2024-07-27,bad timestamp,France,Fencing,Female,/fencing,text/html,POST,201,12,203.0.113.3",
    ]);

    let source = CsvFileSource::new(file.path());
    let store = source.load().await.unwrap();

    assert_eq!(store.len(), 3);
    assert_eq!(store.countries(), vec!["France", "Japan"]);
    assert_eq!(store.info().source, file.path().display().to_string());

    let dashboard = Dashboard::compute(&store, &store.default_criteria());
    assert_eq!(dashboard.metrics.total_visits, 3);
    assert_eq!(dashboard.metrics.female_visits, 2);
    assert_eq!(dashboard.hourly_traffic.values().sum::<u64>(), 2);
    assert_eq!(dashboard.http_status.get("304"), Some(1));
    assert_eq!(dashboard.http_status.get("201"), None);
    assert_eq!(dashboard.time_spent.total(), 3);
}

#[tokio::test]
async fn test_missing_file_is_fatal_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = CsvFileSource::new(dir.path().join("olympic_web_logs.csv"));

    let err = source.load().await.unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[tokio::test]
async fn test_reload_picks_up_new_rows() {
    let file = write_fixture(&[
        "2024-08-01,2024-08-01 10:00:00,Chile,Sailing,Male,/sailing,text/html,GET,200,30,198.51.100.1",
    ]);
    let path = file.path().to_path_buf();

    let handle = StoreHandle::load(Arc::new(CsvFileSource::new(&path)))
        .await
        .unwrap();
    let before = handle.snapshot().await;
    assert_eq!(before.store.len(), 1);

    let mut file = file;
    writeln!(
        file,
        "2024-08-02,2024-08-02 11:00:00,Peru,Surfing,Female,/surfing,text/html,GET,200,90,198.51.100.2"
    )
    .unwrap();
    file.flush().unwrap();

    let after = handle.reload().await.unwrap();
    assert_eq!(after.generation, 1);
    assert_eq!(after.store.len(), 2);

    // Snapshots taken before the reload are untouched
    assert_eq!(before.store.len(), 1);
}

#[tokio::test]
async fn test_failed_reload_keeps_previous_store() {
    let file = write_fixture(&[
        "2024-08-01,2024-08-01 10:00:00,Chile,Sailing,Male,/sailing,text/html,GET,200,30,198.51.100.1",
    ]);
    let path = file.path().to_path_buf();
    let handle = StoreHandle::load(Arc::new(CsvFileSource::new(&path)))
        .await
        .unwrap();

    drop(file);
    assert!(handle.reload().await.is_err());

    let snapshot = handle.snapshot().await;
    assert_eq!(snapshot.generation, 0);
    assert_eq!(snapshot.store.len(), 1);
}
