use crate::record::LogRecord;
use log::{debug, trace};
use palisade_octets::MatchPattern;

/// Result of running a pattern over a batch of records.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterReport<'a> {
    /// Matching records, in input order.
    pub matched: Vec<&'a LogRecord>,
    /// Records whose source address isn't a valid IPv4 address.
    pub skipped: usize,
}

/// Records whose source address matches `pattern`, in input order.
/// Records with an invalid source address are left out.
pub fn filter_records<'a>(pattern: &MatchPattern, records: &'a [LogRecord]) -> Vec<&'a LogRecord> {
    filter_records_with_report(pattern, records).matched
}

pub fn filter_records_with_report<'a>(
    pattern: &MatchPattern,
    records: &'a [LogRecord],
) -> FilterReport<'a> {
    let mut report = FilterReport::default();
    for record in records {
        let address = match record.address() {
            Ok(address) => address,
            Err(e) => {
                debug!("Skipping record from {:?}: {e}", record.source_address());
                report.skipped += 1;
                continue;
            }
        };
        if pattern.matches(&address) {
            trace!("{address} matches {pattern}");
            report.matched.push(record);
        } else {
            trace!("{address} doesn't match {pattern}");
        }
    }
    report
}
