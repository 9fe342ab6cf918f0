use chrono::NaiveDateTime;
use palisade_octets::{classify, AddressError, ParsedAddress};
use std::fmt;
use std::str::FromStr;

/// Layout of the bracketed timestamp once the zone offset is cut off.
pub const TIMESTAMP_FORMAT: &str = "%d/%b/%Y:%H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("Line has no {0:?} marker")]
    MissingMarker(&'static str),

    #[error("Markers around the {0} are out of order")]
    MarkerOrder(&'static str),
}

/// One line of an access log, cut into the three fields the filter cares about.
///
/// ```text
/// 192.168.0.1 - - [10/Oct/2000:13:55:36 +0900] "GET /index.html HTTP/1.1" 200 777
/// ^^^^^^^^^^^       ^^^^^^^^^^^^^^^^^^^^          ^^^^^^^
/// source            timestamp                     request path
/// ```
///
/// The request path stops right before `html`, so `/index.html` becomes `/index.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogRecord {
    source_address: String,
    timestamp: String,
    request_path: String,
}

impl LogRecord {
    pub fn source_address(&self) -> &str {
        &self.source_address
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn request_path(&self) -> &str {
        &self.request_path
    }

    /// Validate the source address on its own, independent of any pattern.
    pub fn address(&self) -> Result<ParsedAddress, AddressError> {
        classify(&self.source_address)
    }

    /// `None` if the timestamp is not in [`TIMESTAMP_FORMAT`].
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok()
    }
}

impl FromStr for LogRecord {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_record(s)
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.source_address, self.timestamp, self.request_path
        )
    }
}

/// Slice a raw line into a [`LogRecord`].
///
/// Every field drops the character in front of its closing marker (the space
/// before `-` and before `+`), and the path starts 4 bytes after `GET` and
/// ends at the first `html` anywhere in the line.
pub fn parse_record(line: &str) -> Result<LogRecord, RecordError> {
    let dash = line.find('-').ok_or(RecordError::MissingMarker("-"))?;
    let source_address = dash
        .checked_sub(1)
        .and_then(|end| line.get(..end))
        .ok_or(RecordError::MarkerOrder("source address"))?;

    let open = line.find('[').ok_or(RecordError::MissingMarker("["))?;
    let plus = line[open..]
        .find('+')
        .map(|i| open + i)
        .ok_or(RecordError::MissingMarker("+"))?;
    // `plus > open`, so `plus - 1` can't underflow
    let timestamp = line
        .get(open + 1..plus - 1)
        .ok_or(RecordError::MarkerOrder("timestamp"))?;

    let get = line.find("GET").ok_or(RecordError::MissingMarker("GET"))?;
    let html = line.find("html").ok_or(RecordError::MissingMarker("html"))?;
    let request_path = line
        .get(get + 4..html)
        .ok_or(RecordError::MarkerOrder("request path"))?;

    Ok(LogRecord {
        source_address: source_address.to_owned(),
        timestamp: timestamp.to_owned(),
        request_path: request_path.to_owned(),
    })
}
