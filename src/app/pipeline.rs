//! Shared check workflow used by the `check` and `results` commands.
//!
//! store lookup -> scrape on miss -> store write-back -> match
//!
//! The CLI handlers only parse arguments and print; everything that decides an
//! outcome lives here so it can be tested against a temp store and a fake
//! fetcher.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::domain::{MatchOutcome, PrizeRecord, Ticket, parse_draw_date, station};
use crate::error::AppError;
use crate::matcher::find_matches;
use crate::scrape::{PageFetcher, Scraper};
use crate::store::RecordStore;

/// Raw user input for one ticket check.
#[derive(Debug, Clone)]
pub struct CheckRequest {
    pub ticket: String,
    pub station: String,
    pub draw_date: String,
}

/// Where the records of a check came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordOrigin {
    Cached,
    Scraped,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckOutput {
    pub ticket: Ticket,
    pub station: String,
    pub draw_date: NaiveDate,
    pub records: Vec<PrizeRecord>,
    pub outcome: MatchOutcome,
    pub origin: RecordOrigin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    pub cutoff: NaiveDate,
    pub removed: usize,
}

/// Validate a station identifier and resolve it to its store key.
///
/// Catalog spellings (`TP`, `tp`, `tphcm`) share one key; unknown identifiers
/// are kept as typed.
pub fn parse_station(raw: &str) -> Result<String, AppError> {
    if raw.trim().is_empty() {
        return Err(AppError::invalid_input("Station must not be empty."));
    }
    Ok(station::canonical_code(raw))
}

/// Validate a `YYYY-MM-DD` draw date that is not after `today`.
pub fn parse_past_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, AppError> {
    let draw_date = parse_draw_date(raw)
        .ok_or_else(|| AppError::invalid_input(format!("Invalid draw date '{raw}', expected YYYY-MM-DD.")))?;
    if draw_date > today {
        return Err(AppError::no_results(format!(
            "No results yet: {draw_date} has not been drawn."
        )));
    }
    Ok(draw_date)
}

/// Records for `station` on `draw_date`, from the store or freshly scraped.
///
/// Scraped rows are written back; a failed write is logged and the in-memory
/// rows are still returned.
pub async fn load_records<S, F>(
    store: &mut S,
    scraper: &Scraper<F>,
    station: &str,
    draw_date: NaiveDate,
) -> Result<(Vec<PrizeRecord>, RecordOrigin), AppError>
where
    S: RecordStore,
    F: PageFetcher,
{
    let cached = store.lookup(station, draw_date)?;
    if !cached.is_empty() {
        tracing::info!(station, %draw_date, records = cached.len(), "store hit");
        return Ok((cached, RecordOrigin::Cached));
    }

    let scraped = scraper.acquire_results(station, draw_date).await?;
    if let Err(err) = store.upsert(&scraped) {
        tracing::warn!(station, %draw_date, error = %err, "failed to persist scraped results");
    }
    Ok((scraped, RecordOrigin::Scraped))
}

/// Run one ticket check end to end.
pub async fn run_check<S, F>(
    store: &mut S,
    scraper: &Scraper<F>,
    request: &CheckRequest,
    today: NaiveDate,
) -> Result<CheckOutput, AppError>
where
    S: RecordStore,
    F: PageFetcher,
{
    let ticket = Ticket::clean(&request.ticket).ok_or_else(|| {
        AppError::invalid_input(format!(
            "Invalid ticket '{}', expected {} digits.",
            request.ticket,
            Ticket::LEN
        ))
    })?;
    let station = parse_station(&request.station)?;
    let draw_date = parse_past_date(&request.draw_date, today)?;

    let (records, origin) = load_records(store, scraper, &station, draw_date).await?;
    if records.is_empty() {
        return Err(AppError::no_results(format!(
            "No results found for station {station} on {draw_date}."
        )));
    }

    let outcome = find_matches(ticket.as_str(), &records);
    tracing::info!(
        ticket = ticket.as_str(),
        station = %station,
        %draw_date,
        wins = outcome.matches.len(),
        total = outcome.total,
        "checked ticket"
    );

    Ok(CheckOutput {
        ticket,
        station,
        draw_date,
        records,
        outcome,
        origin,
    })
}

/// Delete stored rows drawn more than `retention_days` before `today`.
pub fn cleanup<S: RecordStore>(store: &mut S, today: NaiveDate, retention_days: u32) -> Result<CleanupReport, AppError> {
    let cutoff = today
        .checked_sub_days(Days::new(u64::from(retention_days)))
        .ok_or_else(|| AppError::invalid_input(format!("Retention of {retention_days} days is out of range.")))?;
    let removed = store.delete_before(cutoff)?;
    tracing::info!(%cutoff, removed, "cleanup finished");
    Ok(CleanupReport { cutoff, removed })
}
