//! Local persistence for scraped results.
//!
//! The check pipeline consults a store before scraping and writes scraped rows
//! back, so each (station, date) is fetched from the network at most once in
//! the common case. Rows are keyed by (station, date, category, rank); writing
//! a row whose key already exists is a no-op.

mod json;

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::PrizeRecord;

pub use json::JsonStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access store '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Store file '{path}' is not valid JSON: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Keyed record storage with duplicate-ignoring upsert and range delete.
pub trait RecordStore {
    /// Rows for one station and date, ordered by category then rank.
    fn lookup(&self, station: &str, draw_date: NaiveDate) -> Result<Vec<PrizeRecord>, StoreError>;

    /// Insert rows whose key is new; returns how many were inserted.
    fn upsert(&mut self, records: &[PrizeRecord]) -> Result<usize, StoreError>;

    /// Remove every row drawn before `cutoff`; returns how many were removed.
    fn delete_before(&mut self, cutoff: NaiveDate) -> Result<usize, StoreError>;
}
