//! Best-effort parsing of the free-form date and time columns
//!
//! Anything that does not match one of the accepted layouts yields `None`;
//! callers keep the record and drop it only from the aggregates that need
//! the missing value.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

// Slash dates are month-first; day-first only matches when the month-first
// reading is impossible (e.g. `15/01/2024`).
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// Parse a calendar date, accepting a date-time and keeping its date part
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| parse_datetime(raw).map(|dt| dt.date()))
}

/// Parse a full date-time (RFC 3339 or one of the common log layouts)
///
/// An explicit UTC offset is dropped and the wall-clock time kept as written.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Parse a timestamp column value
///
/// A bare time of day is anchored on `fallback_date`, or 1970-01-01 when
/// the record has no usable date.
pub fn parse_timestamp(raw: &str, fallback_date: Option<NaiveDate>) -> Option<NaiveDateTime> {
    if let Some(dt) = parse_datetime(raw) {
        return Some(dt);
    }

    let raw = raw.trim();
    let time = TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())?;
    let date = fallback_date.unwrap_or(NaiveDate::from_ymd_opt(1970, 1, 1)?);
    Some(date.and_time(time))
}

/// Parse a non-empty numeric cell; `NaN` and infinities are treated as missing
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
