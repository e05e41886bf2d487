//! Feed driver
//!
//! Plays the host role around a [`Feeder`]: reads instruction lines, feeds them
//! with their source location as context, drives `next` until the queue is
//! drained, and transmits each released command to the output. Commands that
//! start with a configured hold-on token pause the feed: draining stops and the
//! report carries the held snapshot, unless `resume_on_hold` releases the hold
//! straight away.

use crate::app::cli::config::Settings;
use crate::app::error::{DriverError, DriverResult};
use crate::feeder::api::{Context, FeedOptions, Feeder, FeederSnapshot, LineFilter};
use crate::notifications::api::{EventFilter, FeederEvent, FeederListener};
use serde::Serialize;
use serde_json::json;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::rc::Rc;

/// Named block of input lines
#[derive(Debug, Clone, PartialEq)]
pub struct InputSource {
    pub name: String,
    pub lines: Vec<String>,
}

impl InputSource {
    pub fn new(name: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            name: name.into(),
            lines,
        }
    }

    pub fn from_reader(name: impl Into<String>, reader: impl BufRead) -> DriverResult<Self> {
        let name = name.into();
        let lines = reader
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| DriverError::input(name.clone(), source))?;
        Ok(Self { name, lines })
    }
}

/// Summary of one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedReport {
    /// Lines fed into the queue
    pub fed: usize,
    /// Commands released and written
    pub sent: usize,
    /// Lines the filter reduced to nothing
    pub skipped: usize,
    /// Hold-on tokens reached
    pub holds: usize,
    pub feeder: FeederSnapshot,
}

type Released = Rc<RefCell<VecDeque<(String, Context)>>>;

/// Collects released commands for transmission after each drain step
#[derive(Default)]
struct Outbox {
    released: Released,
}

impl FeederListener<String> for Outbox {
    fn on_event(&mut self, event: &FeederEvent<String>) {
        if let FeederEvent::Data { command, context } = event {
            self.released
                .borrow_mut()
                .push_back((command.clone(), context.clone()));
        }
    }

    fn listener_id(&self) -> &str {
        "transport"
    }
}

fn source_context(source: &str, line: usize) -> Context {
    let mut context = Context::new();
    context.insert("source".to_string(), json!(source));
    context.insert("line".to_string(), json!(line));
    context
}

/// First token of a command matching a configured hold-on token (case-insensitive)
fn hold_token<'a>(command: &str, tokens: &'a [String]) -> Option<&'a str> {
    let word = command.split_whitespace().next()?;
    tokens
        .iter()
        .find(|t| t.eq_ignore_ascii_case(word))
        .map(String::as_str)
}

pub fn run_feed<W: Write>(
    sources: &[InputSource],
    out: &mut W,
    settings: &Settings,
) -> DriverResult<FeedReport> {
    let mut feeder: Feeder = Feeder::with_filter(LineFilter::new(settings.filter.clone()));

    let outbox = Outbox::default();
    let released = Rc::clone(&outbox.released);
    feeder.subscribe_filtered(EventFilter::DataOnly, outbox);
    feeder.subscribe_filtered(EventFilter::HoldOnly, |event: &FeederEvent<String>| {
        match event {
            FeederEvent::Hold => log::info!("Feed paused"),
            FeederEvent::Unhold => log::info!("Feed resumed"),
            _ => {}
        }
    });

    let mut fed = 0;
    for source in sources {
        log::debug!("Feeding {} line(s) from {}", source.lines.len(), source.name);
        for (index, line) in source.lines.iter().enumerate() {
            let context = source_context(&source.name, index + 1);
            feeder.feed(line.as_str(), Some(&context), FeedOptions::default());
        }
        fed += source.lines.len();
    }

    let mut sent = 0;
    let mut holds = 0;
    while !feeder.is_empty() && !feeder.is_held() {
        let pending = feeder.next()?;
        log::trace!("Drain step done, pending={}, queued={}", pending, feeder.size());

        let batch: Vec<_> = released.borrow_mut().drain(..).collect();
        for (command, context) in batch {
            writeln!(out, "{}", command)?;
            sent += 1;

            let Some(token) = hold_token(&command, &settings.hold_on) else {
                continue;
            };
            holds += 1;
            feeder.hold(json!({ "data": token }));
            log::info!(
                "Program pause '{}' at {}:{}",
                token,
                context.get("source").and_then(|v| v.as_str()).unwrap_or("-"),
                context.get("line").and_then(|v| v.as_u64()).unwrap_or(0)
            );
            if settings.resume_on_hold {
                feeder.unhold();
            }
        }
    }
    out.flush()?;

    if feeder.is_held() {
        log::warn!(
            "Feed stopped on hold with {} command(s) left unsent",
            feeder.size()
        );
    }

    let report = FeedReport {
        fed,
        sent,
        skipped: fed - sent - feeder.size(),
        holds,
        feeder: feeder.snapshot(),
    };
    log::debug!("Feed complete: {:?}", report);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn run(sources: &[InputSource], settings: &Settings) -> (String, FeedReport) {
        let mut out = Vec::new();
        let report = run_feed(sources, &mut out, settings).unwrap();
        (String::from_utf8(out).unwrap(), report)
    }

    #[test]
    fn test_feeds_and_sends_in_order() {
        let source = InputSource::new(
            "job.nc",
            lines(&["; setup", "G21", "", "G0 X1 (rapid)", "M2"]),
        );
        let (output, report) = run(&[source], &Settings::default());

        assert_eq!(output, "G21\nG0 X1\nM2\n");
        assert_eq!(report.fed, 5);
        assert_eq!(report.sent, 3);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.holds, 0);
        assert_eq!(report.feeder.queue, 0);
        assert!(!report.feeder.pending);
    }

    #[test]
    fn test_multiple_sources_keep_order() {
        let a = InputSource::new("a", lines(&["G0 X1"]));
        let b = InputSource::new("b", lines(&["G0 X2", "G0 X3"]));
        let (output, _) = run(&[a, b], &Settings::default());
        assert_eq!(output, "G0 X1\nG0 X2\nG0 X3\n");
    }

    #[test]
    fn test_hold_on_tokens_pause_and_resume() {
        let settings = Settings {
            hold_on: vec!["M0".to_string(), "%wait".to_string()],
            resume_on_hold: true,
            ..Settings::default()
        };
        let source = InputSource::new("job.nc", lines(&["G0 X1", "m0", "%wait", "G0 X2"]));
        let (output, report) = run(&[source], &settings);

        assert_eq!(output, "G0 X1\nm0\n%wait\nG0 X2\n");
        assert_eq!(report.holds, 2);
        assert!(!report.feeder.hold);
        assert!(report.feeder.hold_reason.is_none());
    }

    #[test]
    fn test_hold_on_token_stops_drain() {
        let settings = Settings {
            hold_on: vec!["M0".to_string()],
            ..Settings::default()
        };
        let source = InputSource::new("job.nc", lines(&["G0", "M0", "; note", "G1"]));
        let (output, report) = run(&[source], &settings);

        assert_eq!(output, "G0\nM0\n");
        assert_eq!(report.sent, 2);
        assert_eq!(report.holds, 1);
        assert_eq!(report.skipped, 0);
        assert!(report.feeder.hold);
        assert_eq!(report.feeder.hold_reason, Some(json!({ "data": "M0" })));
        assert_eq!(report.feeder.queue, 2);
        assert!(report.feeder.pending);
    }

    #[test]
    fn test_hold_on_changes_output_only_without_resume() {
        let source = InputSource::new("job.nc", lines(&["G0", "M0", "G1"]));
        let plain = run(&[source.clone()], &Settings::default());
        let held = run(
            &[source],
            &Settings {
                hold_on: vec!["M0".to_string()],
                ..Settings::default()
            },
        );

        assert_eq!(plain.0, "G0\nM0\nG1\n");
        assert_eq!(held.0, "G0\nM0\n");
        assert_ne!(plain.1.feeder, held.1.feeder);
    }

    #[test]
    fn test_filter_error_stops_feed() {
        let source = InputSource::new("bad.nc", lines(&["G0 X1", "G1 (broken", "G0 X2"]));
        let mut out = Vec::new();
        let err = run_feed(&[source], &mut out, &Settings::default()).unwrap_err();

        assert!(matches!(err, DriverError::Feeder(_)));
        assert_eq!(String::from_utf8(out).unwrap(), "G0 X1\n");
    }

    #[test]
    fn test_uppercase_and_keep_comments() {
        let mut settings = Settings::default();
        settings.filter.strip_comments = false;
        settings.filter.uppercase = true;
        let source = InputSource::new("job.nc", lines(&["g0 x1 ; note"]));
        let (output, _) = run(&[source], &settings);
        assert_eq!(output, "G0 X1 ; NOTE\n");
    }

    #[test]
    fn test_input_from_reader() {
        let reader = std::io::Cursor::new("G0\nG1\n");
        let source = InputSource::from_reader("stdin", reader).unwrap();
        assert_eq!(source.lines, vec!["G0", "G1"]);
        assert_eq!(source.name, "stdin");
    }

    #[test]
    fn test_hold_token_matching() {
        let tokens = vec!["M0".to_string()];
        assert_eq!(hold_token("M0 ; pause", &tokens), Some("M0"));
        assert_eq!(hold_token("m0", &tokens), Some("M0"));
        assert_eq!(hold_token("M01", &tokens), None);
        assert_eq!(hold_token("", &tokens), None);
    }
}
