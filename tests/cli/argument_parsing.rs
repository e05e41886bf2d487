//! Command line parsing tests

use clap::Parser;
use cmdfeed::app::cli::args::Args;
use std::path::PathBuf;

#[test]
fn test_inputs_and_output() {
    let args = Args::try_parse_from(["cmdfeed", "-O", "out.nc", "a.nc", "-", "b.nc"]).unwrap();
    assert_eq!(
        args.inputs,
        vec![
            PathBuf::from("a.nc"),
            PathBuf::from("-"),
            PathBuf::from("b.nc")
        ]
    );
    assert_eq!(args.output, Some(PathBuf::from("out.nc")));
}

#[test]
fn test_comment_flags_are_exclusive() {
    assert!(Args::try_parse_from(["cmdfeed", "--strip-comments", "--keep-comments"]).is_err());

    let keep = Args::try_parse_from(["cmdfeed", "--keep-comments"]).unwrap();
    assert_eq!(keep.strip_comments_choice(), Some(false));
}

#[test]
fn test_logging_flags() {
    let args = Args::try_parse_from([
        "cmdfeed",
        "-l",
        "debug",
        "-o",
        "ext",
        "-f",
        "none",
        "--status",
    ])
    .unwrap();
    assert_eq!(args.log_level.as_deref(), Some("debug"));
    assert_eq!(args.log_format.as_deref(), Some("ext"));
    assert_eq!(args.log_file.as_deref(), Some("none"));
    assert!(args.status);

    assert!(Args::try_parse_from(["cmdfeed", "--log-level", "verbose"]).is_err());
}
