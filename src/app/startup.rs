//! Application startup
//!
//! Parses arguments, resolves configuration, initialises logging, then runs the
//! feed. Returns the process exit code.

use crate::app::cli::args::Args;
use crate::app::cli::config::{load_config_file, Settings};
use crate::app::driver::{run_feed, FeedReport, InputSource};
use crate::app::error::{DriverError, DriverResult};
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::init_logging;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Write};
use std::path::PathBuf;

pub fn startup() -> i32 {
    let args = Args::parse();

    let settings = match load_config_file(args.config_file.as_deref())
        .and_then(|config| Settings::resolve(config.as_ref(), &args))
    {
        Ok(settings) => settings,
        Err(e) => {
            // Logging is not up yet
            eprintln!("Error: {e}");
            return 1;
        }
    };

    let use_color = settings
        .color
        .unwrap_or_else(|| io::stderr().is_terminal());
    if let Err(e) = init_logging(
        settings.log_level.as_deref(),
        settings.log_format.as_deref(),
        settings.log_file.as_deref(),
        use_color,
    ) {
        eprintln!("Error: failed to initialise logging: {e}");
        return 1;
    }

    log::info!(
        "cmdfeed {} starting",
        crate::core::version::long_version()
    );
    log::debug!("Resolved settings: {:?}", settings);

    match run(&args, &settings) {
        Ok(report) => {
            if args.status {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => eprintln!("{json}"),
                    Err(e) => log::warn!("Could not serialise feed report: {}", e),
                }
            }
            0
        }
        Err(e) => {
            log_error_with_context(&e, "Feeding commands");
            1
        }
    }
}

fn run(args: &Args, settings: &Settings) -> DriverResult<FeedReport> {
    let sources = read_sources(&args.inputs)?;

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(DriverError::Output)?;
            let mut out = io::BufWriter::new(file);
            run_feed(&sources, &mut out, settings)
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            let report = run_feed(&sources, &mut out, settings)?;
            out.flush()?;
            Ok(report)
        }
    }
}

fn read_sources(inputs: &[PathBuf]) -> DriverResult<Vec<InputSource>> {
    if inputs.is_empty() {
        return Ok(vec![InputSource::from_reader("stdin", io::stdin().lock())?]);
    }

    inputs
        .iter()
        .map(|path| {
            let name = path.display().to_string();
            if name == "-" {
                return InputSource::from_reader("stdin", io::stdin().lock());
            }
            let file = File::open(path).map_err(|source| DriverError::input(name.clone(), source))?;
            InputSource::from_reader(name, BufReader::new(file))
        })
        .collect()
}
