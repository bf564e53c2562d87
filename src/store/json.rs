//! Record store backed by a single JSON file.
//!
//! The whole file is loaded at open and rewritten after each change. Result sets
//! are small (a few hundred rows per week of draws) and pruned by `cleanup`.

use std::collections::BTreeMap;
use std::fs::{File, create_dir_all};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use chrono::NaiveDate;

use super::{RecordStore, StoreError};
use crate::domain::{PrizeRecord, RecordKey};

pub struct JsonStore {
    path: PathBuf,
    rows: BTreeMap<RecordKey, PrizeRecord>,
}

impl JsonStore {
    /// Open `path`, starting empty if the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let rows = match File::open(&path) {
            Ok(file) => {
                let records: Vec<PrizeRecord> = serde_json::from_reader(BufReader::new(file))
                    .map_err(|source| StoreError::Format { path: path.clone(), source })?;
                let total = records.len();
                let rows: BTreeMap<RecordKey, PrizeRecord> = records
                    .into_iter()
                    .filter(PrizeRecord::has_valid_value)
                    .map(|r| (r.key(), r))
                    .collect();
                if rows.len() < total {
                    tracing::warn!(path = %path.display(), skipped = total - rows.len(), "skipped malformed store rows");
                }
                rows
            }
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        tracing::debug!(path = %path.display(), rows = rows.len(), "opened store");
        Ok(Self { path, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            create_dir_all(dir).map_err(|e| self.io_err(e))?;
        }
        let file = File::create(&self.path).map_err(|e| self.io_err(e))?;
        let records: Vec<&PrizeRecord> = self.rows.values().collect();
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &records).map_err(|source| StoreError::Format {
            path: self.path.clone(),
            source,
        })?;
        writer.flush().map_err(|e| self.io_err(e))
    }
}

impl RecordStore for JsonStore {
    fn lookup(&self, station: &str, draw_date: NaiveDate) -> Result<Vec<PrizeRecord>, StoreError> {
        Ok(self
            .rows
            .values()
            .filter(|r| r.station_code == station && r.draw_date == draw_date)
            .cloned()
            .collect())
    }

    fn upsert(&mut self, records: &[PrizeRecord]) -> Result<usize, StoreError> {
        let mut inserted = 0;
        for record in records {
            if let std::collections::btree_map::Entry::Vacant(slot) = self.rows.entry(record.key()) {
                slot.insert(record.clone());
                inserted += 1;
            }
        }
        if inserted > 0 {
            self.save()?;
        }
        tracing::debug!(inserted, skipped = records.len() - inserted, "upserted rows");
        Ok(inserted)
    }

    fn delete_before(&mut self, cutoff: NaiveDate) -> Result<usize, StoreError> {
        let before = self.rows.len();
        self.rows.retain(|key, _| key.draw_date >= cutoff);
        let removed = before - self.rows.len();
        if removed > 0 {
            self.save()?;
        }
        Ok(removed)
    }
}
