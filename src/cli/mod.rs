//! Command-line parsing for the `xoso` ticket checker.
//!
//! Argument parsing stays here; command dispatch lives in `app`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::DEFAULT_RETENTION_DAYS;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "xoso", version, about = "Southern Vietnam lottery ticket checker")]
pub struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Results store file (overrides XOSO_STORE_PATH).
    #[arg(long, value_name = "JSON", global = true)]
    pub store: Option<PathBuf>,

    /// Overall scrape deadline in seconds (overrides XOSO_DEADLINE_SECS).
    #[arg(long, global = true)]
    pub deadline_secs: Option<f64>,

    /// Per-request HTTP timeout in seconds (overrides XOSO_REQUEST_TIMEOUT_SECS).
    #[arg(long, global = true)]
    pub request_timeout_secs: Option<f64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check whether a ticket won for a station and draw date.
    Check(CheckArgs),
    /// Print the drawn results for a station and date.
    Results(ResultsArgs),
    /// List stations, optionally only those drawing on a given day.
    Stations(StationsArgs),
    /// Delete stored results older than the retention window.
    Cleanup(CleanupArgs),
}

#[derive(Debug, Args, Clone)]
pub struct CheckArgs {
    /// Six-digit ticket number; spaces and dashes are ignored.
    #[arg(short, long)]
    pub ticket: String,

    /// Station code or slug (TP, DT, tphcm, ...).
    #[arg(short, long)]
    pub station: String,

    /// Draw date, YYYY-MM-DD.
    #[arg(short, long)]
    pub date: String,

    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ResultsArgs {
    #[arg(short, long)]
    pub station: String,

    /// Draw date, YYYY-MM-DD.
    #[arg(short, long)]
    pub date: String,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct StationsArgs {
    /// Weekday, 0 = Sunday .. 6 = Saturday.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=6), conflicts_with = "date")]
    pub day: Option<u8>,

    /// Stations drawing on this date's weekday (YYYY-MM-DD).
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct CleanupArgs {
    #[arg(long, default_value_t = DEFAULT_RETENTION_DAYS)]
    pub retention_days: u32,
}
