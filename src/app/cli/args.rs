//! Command line arguments

use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "cmdfeed")]
#[command(about = "Feed instruction files to a device one command at a time")]
#[command(version, long_version = crate::core::version::long_version())]
#[command(after_help = " * can be specified multiple times")]
pub struct Args {
    /// Input files, read in order (standard input when omitted or '-')
    #[arg(value_name = "FILES")]
    pub inputs: Vec<PathBuf>,

    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Write released commands to FILE instead of standard output
    #[arg(short = 'O', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Force colored log output
    #[arg(short = 'g', long = "color", conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored log output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Log level
    #[arg(
        short = 'l',
        long = "log-level",
        value_name = "LEVEL",
        value_parser = ["trace", "debug", "info", "warn", "error", "off"]
    )]
    pub log_level: Option<String>,

    /// Log file path (use 'none' to log to standard error)
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<String>,

    /// Log output format
    #[arg(
        short = 'o',
        long = "log-format",
        value_name = "FORMAT",
        value_parser = ["text", "ext", "json"]
    )]
    pub log_format: Option<String>,

    /// Remove ';' and '( )' comments before sending
    #[arg(long = "strip-comments", conflicts_with = "keep_comments")]
    pub strip_comments: bool,

    /// Send comments unchanged
    #[arg(long = "keep-comments")]
    pub keep_comments: bool,

    /// Upper-case every command before sending
    #[arg(long = "uppercase")]
    pub uppercase: bool,

    /// Pause the feed after sending a command starting with TOKEN*
    #[arg(long = "hold-on", value_name = "TOKEN", action = ArgAction::Append)]
    pub hold_on: Vec<String>,

    /// Resume straight away after a hold-on token instead of stopping
    #[arg(long = "resume-on-hold")]
    pub resume_on_hold: bool,

    /// Print the feed report as JSON to standard error when done
    #[arg(short = 's', long = "status")]
    pub status: bool,
}

impl Args {
    /// Colour choice from the flags alone; `None` means decide from the config or terminal
    pub fn color_choice(&self) -> Option<bool> {
        match (self.color, self.no_color) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// Comment handling from the flags alone; `None` means use the config value
    pub fn strip_comments_choice(&self) -> Option<bool> {
        match (self.strip_comments, self.keep_comments) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}
