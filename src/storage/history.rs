//! Append-only search history kept in a single JSON array file
//!
//! The whole file is the source of truth. `append` is a read-modify-write
//! without locking, so concurrent appends from separate requests can lose an
//! entry. Each write lands through its own temporary file, so the file on
//! disk is always one complete array.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use super::{to_indented_json, write_atomic};
use crate::models::HistoryEntry;
use crate::{Result, WeatherDeskError};

/// Persistent, ordered record of successful searches
pub trait HistoryStore: Send + Sync {
    /// All entries, oldest first. Empty when nothing has been stored yet.
    fn read_all(&self) -> Result<Vec<HistoryEntry>>;

    /// Add `entry` after all existing entries
    fn append(&self, entry: HistoryEntry) -> Result<()>;
}

/// History store backed by one JSON file
#[derive(Debug, Clone)]
pub struct JsonHistoryStore {
    path: PathBuf,
}

impl JsonHistoryStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for JsonHistoryStore {
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    fn read_all(&self) -> Result<Vec<HistoryEntry>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("History file not found, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(WeatherDeskError::storage_corrupt(&self.path, e.to_string())),
        };

        serde_json::from_str(&content)
            .map_err(|e| WeatherDeskError::storage_corrupt(&self.path, e.to_string()))
    }

    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    fn append(&self, entry: HistoryEntry) -> Result<()> {
        let mut history = self.read_all()?;
        history.push(entry);

        let bytes = to_indented_json(&history)
            .map_err(|e| WeatherDeskError::storage_write(&self.path, e.to_string()))?;
        write_atomic(&self.path, &bytes)
            .map_err(|e| WeatherDeskError::storage_write(&self.path, e.to_string()))?;

        debug!("History now holds {} entries", history.len());
        Ok(())
    }
}
