#![warn(clippy::all, clippy::nursery, clippy::pedantic)]

pub mod access_log;
pub mod filter;
pub mod record;

pub use access_log::AccessLog;
pub use filter::{filter_records, filter_records_with_report, FilterReport};
pub use record::{parse_record, LogRecord, RecordError, TIMESTAMP_FORMAT};

pub use palisade_octets;
