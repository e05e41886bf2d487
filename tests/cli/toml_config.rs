//! Configuration file tests

use clap::Parser;
use cmdfeed::app::cli::args::Args;
use cmdfeed::app::cli::config::{load_config_file, Settings};
use cmdfeed::app::error::ConfigError;
use std::io::Write;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_explicit_config_file() {
    let file = config_file(
        r#"
        log-level = "info"

        [filter]
        trim = false
        hold-on = ["M0", "%wait"]
        "#,
    );

    let table = load_config_file(Some(file.path())).unwrap().unwrap();
    let args = Args::try_parse_from(["cmdfeed"]).unwrap();
    let settings = Settings::resolve(Some(&table), &args).unwrap();

    assert_eq!(settings.log_level.as_deref(), Some("info"));
    assert!(!settings.filter.trim);
    assert!(settings.filter.strip_comments);
    assert_eq!(settings.hold_on, vec!["M0", "%wait"]);
}

#[test]
fn test_malformed_config_file() {
    let file = config_file("log-level = \n");
    let err = load_config_file(Some(file.path())).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_cli_overrides_file() {
    let file = config_file("color = true\n[filter]\nstrip-comments = true\n");
    let table = load_config_file(Some(file.path())).unwrap().unwrap();
    let args = Args::try_parse_from(["cmdfeed", "--no-color", "--keep-comments"]).unwrap();
    let settings = Settings::resolve(Some(&table), &args).unwrap();

    assert_eq!(settings.color, Some(false));
    assert!(!settings.filter.strip_comments);
}
