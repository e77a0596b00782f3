pub mod parse;
pub mod record;

pub use record::{Gender, LogRecord, RawLogRow, EXPECTED_COLUMNS};
