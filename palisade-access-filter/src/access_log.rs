use crate::filter::{filter_records, filter_records_with_report, FilterReport};
use crate::record::{parse_record, LogRecord};
use anyhow::{bail, Context};
use log::debug;
use palisade_octets::{compile_pattern, MatchPattern};

/// A pattern line, a record count line, then that many access log lines.
///
/// ```text
/// 192.168.*.[1-20]
/// 2
/// 192.168.0.1 - - [10/Oct/2000:13:55:36 +0900] "GET /index.html HTTP/1.1" 200 777
/// 192.168.0.35 - - [10/Oct/2000:13:56:02 +0900] "GET /about.html HTTP/1.1" 200 512
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessLog {
    pattern: MatchPattern,
    records: Vec<LogRecord>,
}

impl AccessLog {
    pub fn new(pattern: MatchPattern, records: Vec<LogRecord>) -> Self {
        Self { pattern, records }
    }

    /// Blank lines are skipped everywhere. The two header lines are trimmed,
    /// record lines are sliced as they are.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line))
            .filter(|(_, line)| !line.trim().is_empty());

        let Some((n, pattern)) = lines.next() else {
            bail!("Access log is empty");
        };
        let pattern = compile_pattern(pattern.trim())
            .with_context(|| format!("Failed to compile pattern on line {n}"))?;

        let Some((n, count)) = lines.next() else {
            bail!("Access log has no record count");
        };
        let count = count
            .trim()
            .parse::<usize>()
            .with_context(|| format!("Failed to parse record count {count:?} on line {n}"))?;

        let records = lines
            .map(|(n, line)| {
                parse_record(line).with_context(|| format!("Failed to parse record on line {n}"))
            })
            .collect::<anyhow::Result<Vec<LogRecord>>>()?;
        if records.len() != count {
            bail!(
                "Record count says {count} but there are {} records",
                records.len()
            );
        }

        debug!("Read {count} records for pattern {pattern}");
        Ok(Self { pattern, records })
    }

    pub const fn pattern(&self) -> &MatchPattern {
        &self.pattern
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn matching(&self) -> Vec<&LogRecord> {
        filter_records(&self.pattern, &self.records)
    }

    pub fn report(&self) -> FilterReport<'_> {
        filter_records_with_report(&self.pattern, &self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const LOG: &str = r#"192.168.*.[1-20]
3
192.168.0.1 - - [10/Oct/2000:13:55:36 +0900] "GET /index.html HTTP/1.1" 200 777
192.168.0.35 - - [10/Oct/2000:13:56:02 +0900] "GET /about.html HTTP/1.1" 200 512

192.168.7.20 - - [10/Oct/2000:13:57:40 +0900] "GET /news/today.html HTTP/1.1" 200 1024
"#;

    #[test]
    fn test_parse() {
        let log = AccessLog::parse(LOG).unwrap();
        assert_eq!(log.pattern().to_string(), "192.168.*.[1-20]");
        assert_eq!(log.records().len(), 3);
        assert_eq!(log.records()[2].request_path(), "/news/today.");
    }

    #[test]
    fn test_matching() {
        let log = AccessLog::parse(LOG).unwrap();
        let matched = log
            .matching()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<String>>();
        assert_eq!(
            matched,
            vec![
                "192.168.0.1 10/Oct/2000:13:55:36 /index.",
                "192.168.7.20 10/Oct/2000:13:57:40 /news/today.",
            ]
        );
        assert_eq!(log.report().skipped, 0);
    }

    #[test]
    fn test_crlf_and_padded_headers() {
        let text = concat!(
            "  10.0.*.*  \r\n",
            " 1 \r\n",
            "10.0.0.1 - - [10/Oct/2000:13:55:36 +0900] \"GET /a.html\"\r\n",
        );
        let log = AccessLog::parse(text).unwrap();
        assert_eq!(log.matching().len(), 1);
    }

    #[test_case(""; "empty")]
    #[test_case("10.0.*.*\n"; "no count")]
    #[test_case("10.*.0.0\n0\n"; "bad pattern")]
    #[test_case("10.0.*.*\nmany\n"; "count not a number")]
    #[test_case("10.0.*.*\n2\n10.0.0.1 - - [10/Oct/2000:13:55:36 +0900] \"GET /a.html\"\n"; "too few records")]
    #[test_case("10.0.*.*\n1\n10.0.0.1 no markers here\n"; "bad record")]
    fn test_parse_errors(text: &str) {
        assert!(AccessLog::parse(text).is_err());
    }

    #[test]
    fn test_error_names_line() {
        let text = "10.0.*.*\n1\n\n10.0.0.1 no markers here\n";
        let err = AccessLog::parse(text).unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse record on line 4");
    }
}
