mod common;

use palisade_access_filter::palisade_octets::list::AddressList;
use palisade_access_filter::palisade_octets::{compile_pattern, validate};
use palisade_access_filter::{
    filter_records, filter_records_with_report, parse_record, AccessLog, LogRecord,
};

fn records(sources: &[&str]) -> Vec<LogRecord> {
    sources
        .iter()
        .enumerate()
        .map(|(i, source)| {
            let line = format!(
                r#"{source} - - [12/Mar/2024:08:{i:02}:00 +0900] "GET /page{i}.html HTTP/1.1" 200"#
            );
            parse_record(&line).unwrap()
        })
        .collect()
}

#[test]
fn validator_verdicts() {
    common::init_logger();
    let verdicts = ["192.168.1.1", "999.1.1.1", "1.2.3", "10.0.0.256"].map(validate);
    assert_eq!(verdicts, [true, false, false, false]);
}

#[test]
fn validator_address_list() {
    common::init_logger();
    let list = AddressList::parse("4\n192.168.1.1\n999.1.1.1\n1.2.3\n10.0.0.256\n").unwrap();
    assert_eq!(list.verdicts(), vec![true, false, false, false]);
}

#[test]
fn range_in_fourth_octet() {
    common::init_logger();
    let records = records(&["172.16.5.150", "172.16.5.250", "172.17.5.150"]);
    let pattern = compile_pattern("172.16.*.[100-200]").unwrap();
    let matched = filter_records(&pattern, &records);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].source_address(), "172.16.5.150");
    assert_eq!(matched[0].request_path(), "/page0.");
}

#[test]
fn order_preserved_and_invalid_dropped() {
    common::init_logger();
    let records = records(&[
        "10.0.5.9",
        "10.0.300.1",
        "10.0.1.1",
        "bogus",
        "10.0.3.200",
        "10.0.6.1",
    ]);
    let pattern = compile_pattern("10.0.[1-5].*").unwrap();
    let report = filter_records_with_report(&pattern, &records);
    let sources = report
        .matched
        .iter()
        .map(|r| r.source_address())
        .collect::<Vec<&str>>();
    assert_eq!(sources, vec!["10.0.5.9", "10.0.1.1", "10.0.3.200"]);
    assert_eq!(report.skipped, 2);
}

#[test]
fn whole_document() {
    common::init_logger();
    let text = r#"192.168.*.10
3
192.168.77.10 - - [12/Mar/2024:08:00:00 +0900] "GET /a.html HTTP/1.1" 200 100
192.168.77.11 - - [12/Mar/2024:08:01:00 +0900] "GET /b.html HTTP/1.1" 200 100
192.168.1.10 - - [12/Mar/2024:08:02:00 +0900] "GET /c.html HTTP/1.1" 200 100
"#;
    let log = AccessLog::parse(text).unwrap();
    let lines = log
        .matching()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<String>>();
    assert_eq!(
        lines,
        vec![
            "192.168.77.10 12/Mar/2024:08:00:00 /a.",
            "192.168.1.10 12/Mar/2024:08:02:00 /c.",
        ]
    );
}
