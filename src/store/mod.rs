pub mod csv_file;
pub mod handle;
pub mod memory;
pub mod record_store;
pub mod trait_def;

pub use csv_file::CsvFileSource;
pub use handle::{StoreHandle, StoreSnapshot};
pub use memory::MemorySource;
pub use record_store::{RecordStore, StoreInfo};
pub use trait_def::{LoadError, LoadResult, RecordSource};
