use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use super::parse::{parse_date, parse_number, parse_timestamp};

/// Visitor gender as recorded in the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
    Other,
}

impl Gender {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "Female" => Gender::Female,
            "Male" => Gender::Male,
            _ => Gender::Other,
        }
    }
}

/// One row of the web log, typed at load time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Calendar date used by the date-range filter
    pub date: Option<NaiveDate>,
    /// Visit time; `None` when the raw value could not be parsed
    pub timestamp: Option<NaiveDateTime>,
    pub country: String,
    pub sport: String,
    pub gender: Gender,
    pub url: String,
    pub content_type: String,
    pub request_method: String,
    pub http_status: String,
    pub time_spent_seconds: Option<f64>,
    pub ip_address: String,
}

impl LogRecord {
    /// Hour of day of the visit, if the timestamp parsed
    pub fn hour(&self) -> Option<u32> {
        self.timestamp.map(|ts| ts.hour())
    }
}

/// Raw CSV row before typing
///
/// Every column is optional text so a short or oddly-shaped row still
/// produces a record.
#[derive(Debug, Default, Deserialize)]
pub struct RawLogRow {
    #[serde(rename = "Date", default)]
    pub date: Option<String>,
    #[serde(rename = "Timestamp", default)]
    pub timestamp: Option<String>,
    #[serde(rename = "Country", default)]
    pub country: Option<String>,
    #[serde(rename = "Sport", default)]
    pub sport: Option<String>,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "URL", default)]
    pub url: Option<String>,
    #[serde(rename = "Content Type", default)]
    pub content_type: Option<String>,
    #[serde(rename = "Request Method", default)]
    pub request_method: Option<String>,
    #[serde(rename = "HTTP Status", default)]
    pub http_status: Option<String>,
    #[serde(rename = "Time Spent (seconds)", default)]
    pub time_spent_seconds: Option<String>,
    #[serde(rename = "IP Address", default)]
    pub ip_address: Option<String>,
}

/// Column headers the base dataset is expected to carry
pub const EXPECTED_COLUMNS: &[&str] = &[
    "Date",
    "Timestamp",
    "Country",
    "Sport",
    "Gender",
    "URL",
    "Content Type",
    "Request Method",
    "HTTP Status",
    "Time Spent (seconds)",
    "IP Address",
];

fn text(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

impl From<RawLogRow> for LogRecord {
    fn from(raw: RawLogRow) -> Self {
        let date = raw.date.as_deref().and_then(parse_date);
        let timestamp = raw
            .timestamp
            .as_deref()
            .and_then(|ts| parse_timestamp(ts, date));

        Self {
            date,
            timestamp,
            gender: Gender::parse(raw.gender.as_deref().unwrap_or_default()),
            time_spent_seconds: raw.time_spent_seconds.as_deref().and_then(parse_number),
            country: text(raw.country),
            sport: text(raw.sport),
            url: text(raw.url),
            content_type: text(raw.content_type),
            request_method: text(raw.request_method),
            http_status: text(raw.http_status),
            ip_address: text(raw.ip_address),
        }
    }
}
