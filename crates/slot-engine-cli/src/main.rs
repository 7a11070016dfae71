//! `slots` CLI — compute bookable appointment slots from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Compute slots for a JSON request (stdin → stdout)
//! cat request.json | slots compute
//!
//! # From a file, pinning the clock and step
//! slots compute -i request.json --now 2024-03-20T10:15:00 --step 15
//!
//! # Is a particular start time still free?
//! slots check -i request.json --slot 10:30
//!
//! # Show the working window a schedule gives for a date
//! slots day -i schedule.json --date 2024-03-20
//! ```
//!
//! Results are printed as JSON on stdout; logs go to stderr.

mod config;

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use serde::Serialize;
use slot_engine::schedule::{resolve_day, weekday_name, DayResolution};
use slot_engine::time::parse_date;
use slot_engine::{AvailabilityRequest, Minutes, WeeklySchedule};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Compute bookable appointment slots"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./slots.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute available slots for an availability request
    Compute {
        /// Input request JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Current local time, e.g. 2024-03-20T10:15:00 (overrides the request and the clock)
        #[arg(long, value_parser = parse_now)]
        now: Option<NaiveDateTime>,
        /// Minutes between candidate slots (overrides the request and the config)
        #[arg(long)]
        step: Option<Minutes>,
    },
    /// Check whether one start time is bookable for an availability request
    Check {
        /// Input request JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Start time to check, HH:MM
        #[arg(long)]
        slot: String,
        /// Current local time, e.g. 2024-03-20T10:15:00
        #[arg(long, value_parser = parse_now)]
        now: Option<NaiveDateTime>,
        /// Minutes between candidate slots
        #[arg(long)]
        step: Option<Minutes>,
    },
    /// Show the working window a weekly schedule gives for a date
    Day {
        /// Weekly schedule JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Calendar date, YYYY-MM-DD
        #[arg(long)]
        date: String,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DayOutput {
    date: String,
    weekday: &'static str,
    is_day_off: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_time: Option<String>,
}

#[derive(Serialize)]
struct CheckOutput {
    slot: String,
    available: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&config.logging.filter, cli.verbose)?;
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Compute {
            input,
            output,
            now,
            step,
        } => {
            let mut request = read_request(input.as_deref())?;
            if now.is_some() {
                request.now = now;
            }
            if step.is_some() {
                request.step = step;
            }

            let slots = request
                .evaluate(Some(local_now()), config.engine.step_minutes)
                .context("Failed to compute available slots")?;
            info!(date = %request.date, slots = slots.len(), "computed available slots");

            write_output(output.as_deref(), &serde_json::to_string(&slots)?)?;
        }
        Commands::Check {
            input,
            slot,
            now,
            step,
        } => {
            let mut request = read_request(input.as_deref())?;
            if now.is_some() {
                request.now = now;
            }
            if step.is_some() {
                request.step = step;
            }

            let available = request
                .admits(&slot, Some(local_now()), config.engine.step_minutes)
                .context("Failed to check slot")?;

            let out = CheckOutput { slot, available };
            write_output(None, &serde_json::to_string(&out)?)?;
        }
        Commands::Day { input, date } => {
            let raw = read_input(input.as_deref())?;
            let schedule: WeeklySchedule =
                serde_json::from_str(&raw).context("Failed to parse weekly schedule JSON")?;
            let day = parse_date(&date).context("Failed to parse date")?;
            let weekday = weekday_name(day.weekday());
            let resolution = resolve_day(&schedule, day).context("Failed to resolve date")?;

            let out = match resolution {
                DayResolution::Open(window) => DayOutput {
                    date,
                    weekday,
                    is_day_off: false,
                    start_time: Some(window.start().to_string()),
                    end_time: Some(window.end().to_string()),
                },
                DayResolution::Closed => DayOutput {
                    date,
                    weekday,
                    is_day_off: true,
                    start_time: None,
                    end_time: None,
                },
            };
            write_output(None, &serde_json::to_string(&out)?)?;
        }
    }

    Ok(())
}

fn init_logging(filter: &str, verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_new(filter)
            .with_context(|| format!("Invalid log filter: {}", filter))?
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

/// The machine's local wall-clock time.
fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Accept `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DDTHH:MM`.
fn parse_now(s: &str) -> std::result::Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|e| format!("invalid timestamp '{}': {}", s, e))
}

fn read_request(path: Option<&str>) -> Result<AvailabilityRequest> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("Failed to parse availability request JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
