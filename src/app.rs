//! Top-level application orchestration.
//!
//! `src/main.rs` is tiny; this module is the "real main" that:
//! - parses CLI arguments and installs logging
//! - layers configuration (defaults, environment, flags)
//! - dispatches to the check, results, stations and cleanup commands

use std::time::Duration;

use clap::Parser;
use serde::Serialize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::{CheckArgs, CleanupArgs, Cli, Command, ResultsArgs, StationsArgs};
use crate::config::{ScrapeConfig, store_path_from_env};
use crate::domain::{station, vietnam_today};
use crate::error::AppError;
use crate::scrape::Scraper;
use crate::store::JsonStore;

pub mod pipeline;

/// Entry point for the `xoso` binary.
pub async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Command::Check(args) => handle_check(&cli, args).await,
        Command::Results(args) => handle_results(&cli, args).await,
        Command::Stations(args) => handle_stations(args),
        Command::Cleanup(args) => handle_cleanup(&cli, args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    // Only fails if a subscriber is already set, e.g. when embedded.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

async fn handle_check(cli: &Cli, args: &CheckArgs) -> Result<(), AppError> {
    let mut store = open_store(cli)?;
    let scraper = Scraper::new(scrape_config_from_args(cli)?)?;
    let request = pipeline::CheckRequest {
        ticket: args.ticket.clone(),
        station: args.station.clone(),
        draw_date: args.date.clone(),
    };

    let output = pipeline::run_check(&mut store, &scraper, &request, vietnam_today()).await?;

    if args.json {
        print_json(&output)
    } else {
        print!("{}", crate::report::format_check_summary(&output));
        Ok(())
    }
}

async fn handle_results(cli: &Cli, args: &ResultsArgs) -> Result<(), AppError> {
    let station = pipeline::parse_station(&args.station)?;
    let draw_date = pipeline::parse_past_date(&args.date, vietnam_today())?;
    let mut store = open_store(cli)?;
    let scraper = Scraper::new(scrape_config_from_args(cli)?)?;

    let (records, _) = pipeline::load_records(&mut store, &scraper, &station, draw_date).await?;

    if args.json {
        print_json(&records)
    } else {
        print!("{}", crate::report::format_results_table(&station, draw_date, &records));
        Ok(())
    }
}

fn handle_stations(args: &StationsArgs) -> Result<(), AppError> {
    let day = match (&args.day, &args.date) {
        (Some(day), _) => Some(*day),
        (None, Some(raw)) => {
            let date = crate::domain::parse_draw_date(raw)
                .ok_or_else(|| AppError::invalid_input(format!("Invalid date '{raw}', expected YYYY-MM-DD.")))?;
            Some(station::draw_day_of(date))
        }
        (None, None) => None,
    };

    let stations = match day {
        Some(day) => station::by_draw_day(day),
        None => station::STATIONS.iter().collect(),
    };
    print!("{}", crate::report::format_stations(&stations));
    Ok(())
}

fn handle_cleanup(cli: &Cli, args: &CleanupArgs) -> Result<(), AppError> {
    let mut store = open_store(cli)?;
    let report = pipeline::cleanup(&mut store, vietnam_today(), args.retention_days)?;
    print!("{}", crate::report::format_cleanup(&report));
    Ok(())
}

fn open_store(cli: &Cli) -> Result<JsonStore, AppError> {
    let path = cli.store.clone().unwrap_or_else(store_path_from_env);
    Ok(JsonStore::open(path)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::new(crate::error::exit::INTERNAL, format!("Failed to serialize output: {e}")))?;
    println!("{text}");
    Ok(())
}

/// Environment configuration with CLI overrides applied.
pub fn scrape_config_from_args(cli: &Cli) -> Result<ScrapeConfig, AppError> {
    let mut config = ScrapeConfig::from_env()?;
    if let Some(secs) = cli.deadline_secs {
        config.deadline = flag_secs("--deadline-secs", secs)?;
    }
    if let Some(secs) = cli.request_timeout_secs {
        config.request_timeout = flag_secs("--request-timeout-secs", secs)?;
    }
    Ok(config)
}

fn flag_secs(flag: &str, secs: f64) -> Result<Duration, AppError> {
    if secs.is_finite() && secs > 0.0 {
        Ok(Duration::from_secs_f64(secs))
    } else {
        Err(AppError::invalid_input(format!(
            "{flag} must be a positive number of seconds, got {secs}."
        )))
    }
}
