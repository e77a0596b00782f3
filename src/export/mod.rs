//! CSV export of dashboard aggregates
//!
//! Count tables are written as a header row followed by one `label,count`
//! row per entry, and can be read back without loss.

use thiserror::Error;

use crate::analytics::{CountTable, Histogram};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("export buffer was not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("failed to flush export buffer")]
    Flush(#[from] csv::IntoInnerError<csv::Writer<Vec<u8>>>),
    #[error("expected 2 columns, found {0}")]
    ColumnCount(usize),
    #[error("invalid count '{value}' on line {line}")]
    InvalidCount { line: u64, value: String },
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Write a count table as CSV text
pub fn count_table_csv(table: &CountTable) -> ExportResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([table.label_header.as_str(), table.value_header.as_str()])?;
    for (label, count) in &table.rows {
        writer.write_record([label.as_str(), count.to_string().as_str()])?;
    }
    Ok(String::from_utf8(writer.into_inner()?)?)
}

/// Read a count table back from CSV text produced by [`count_table_csv`]
pub fn parse_count_table(text: &str) -> ExportResult<CountTable> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.len() != 2 {
        return Err(ExportError::ColumnCount(headers.len()));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() != 2 {
            return Err(ExportError::ColumnCount(record.len()));
        }
        let count = record[1]
            .parse::<u64>()
            .map_err(|_| ExportError::InvalidCount {
                line: record.position().map(|p| p.line()).unwrap_or(0),
                value: record[1].to_string(),
            })?;
        rows.push((record[0].to_string(), count));
    }

    Ok(CountTable {
        label_header: headers[0].to_string(),
        value_header: headers[1].to_string(),
        rows,
    })
}

/// Write histogram bins as `bin_start,bin_end,count`
pub fn histogram_csv(histogram: &Histogram) -> ExportResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["bin_start", "bin_end", "count"])?;
    for bin in &histogram.bins {
        writer.write_record([
            bin.start.to_string(),
            bin.end.to_string(),
            bin.count.to_string(),
        ])?;
    }
    Ok(String::from_utf8(writer.into_inner()?)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::HistogramBin;

    #[test]
    fn test_count_table_round_trip() {
        let table = CountTable::new(
            "Country",
            vec![
                ("United States".to_string(), 60),
                ("Côte d'Ivoire".to_string(), 7),
                ("Korea, Republic of".to_string(), 3),
                ("\"Quoted\"".to_string(), u64::MAX),
            ],
        );

        let text = count_table_csv(&table).unwrap();
        assert!(text.starts_with("Country,count\n"));
        assert_eq!(parse_count_table(&text).unwrap(), table);
    }

    #[test]
    fn test_empty_table_round_trip() {
        let table = CountTable::new("HTTP Status", Vec::new());
        let text = count_table_csv(&table).unwrap();
        assert_eq!(text, "HTTP Status,count\n");
        assert_eq!(parse_count_table(&text).unwrap(), table);
    }

    #[test]
    fn test_parse_rejects_bad_counts() {
        let err = parse_count_table("Sport,count\nJudo,many\n").unwrap_err();
        assert!(matches!(err, ExportError::InvalidCount { line: 2, .. }));

        let err = parse_count_table("a,b,c\n1,2,3\n").unwrap_err();
        assert!(matches!(err, ExportError::ColumnCount(3)));
    }

    #[test]
    fn test_histogram_csv() {
        let histogram = Histogram {
            bins: vec![
                HistogramBin { start: 0.0, end: 1.5, count: 2 },
                HistogramBin { start: 1.5, end: 3.0, count: 0 },
            ],
        };
        let text = histogram_csv(&histogram).unwrap();
        assert_eq!(text, "bin_start,bin_end,count\n0,1.5,2\n1.5,3,0\n");
    }
}
