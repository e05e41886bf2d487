//! Driver runs against files on disk

use cmdfeed::app::cli::config::Settings;
use cmdfeed::app::driver::{run_feed, InputSource};
use std::fs::File;
use std::io::{BufReader, Write};
use tempfile::NamedTempFile;

#[test]
fn test_feed_file_to_output() {
    let mut input = NamedTempFile::new().unwrap();
    writeln!(input, "%  program start").unwrap();
    writeln!(input, "G21 ; millimetres").unwrap();
    writeln!(input, "(tool change)").unwrap();
    writeln!(input, "M6 T1").unwrap();
    writeln!(input, "M0").unwrap();
    writeln!(input, "G0 Z5").unwrap();
    input.flush().unwrap();

    let reader = BufReader::new(File::open(input.path()).unwrap());
    let source = InputSource::from_reader("program.nc", reader).unwrap();

    let settings = Settings {
        hold_on: vec!["M0".to_string()],
        resume_on_hold: true,
        ..Settings::default()
    };
    let mut out = Vec::new();
    let report = run_feed(&[source], &mut out, &settings).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "%  program start\nG21\nM6 T1\nM0\nG0 Z5\n"
    );
    assert_eq!(report.fed, 6);
    assert_eq!(report.sent, 5);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.holds, 1);
    assert!(!report.feeder.pending);
}

#[test]
fn test_report_serializes_snapshot() {
    let source = InputSource::new("inline", vec!["G0 X1".to_string()]);
    let mut out = Vec::new();
    let report = run_feed(&[source], &mut out, &Settings::default()).unwrap();

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["sent"], 1);
    assert_eq!(value["feeder"]["queue"], 0);
    assert_eq!(value["feeder"]["holdReason"], serde_json::Value::Null);
    assert!(value["feeder"].get("pending").is_some());
}

#[test]
fn test_hold_on_token_leaves_rest_queued() {
    let mut input = NamedTempFile::new().unwrap();
    writeln!(input, "G21").unwrap();
    writeln!(input, "%wait").unwrap();
    writeln!(input, "G0 X1").unwrap();
    writeln!(input, "G0 X2").unwrap();
    input.flush().unwrap();

    let reader = BufReader::new(File::open(input.path()).unwrap());
    let source = InputSource::from_reader("program.nc", reader).unwrap();
    let settings = Settings {
        hold_on: vec!["%wait".to_string()],
        ..Settings::default()
    };
    let mut out = Vec::new();
    let report = run_feed(&[source], &mut out, &settings).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "G21\n%wait\n");
    assert!(report.feeder.queue > 0);

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["feeder"]["hold"], true);
    assert_eq!(value["feeder"]["holdReason"]["data"], "%wait");
    assert_eq!(value["feeder"]["queue"], 2);
}
