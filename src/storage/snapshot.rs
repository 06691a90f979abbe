//! One-off forecast snapshots, one JSON file per save

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use serde_json::Value;
use tracing::{info, instrument};

use super::{to_indented_json, write_atomic};
use crate::models::{SnapshotRecord, TIMESTAMP_FORMAT};
use crate::{Result, WeatherDeskError};

/// Timestamp format embedded in snapshot file names
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Writes forecast snapshots
pub trait SnapshotStore: Send + Sync {
    /// Persist the forecast and return the written file path
    fn save(&self, location: &str, country: &str, forecast: &Value) -> Result<PathBuf>;
}

/// Snapshot store writing `{location}_{timestamp}.json` files into one directory.
/// Saving the same location twice within a second overwrites the first file.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save as of `at`, used for both the file name and `saved_at`
    #[instrument(skip(self, forecast), fields(dir = %self.dir.display()))]
    pub fn save_at(
        &self,
        location: &str,
        country: &str,
        forecast: &Value,
        at: NaiveDateTime,
    ) -> Result<PathBuf> {
        let file_name = format!("{}_{}.json", location, at.format(FILE_TIMESTAMP_FORMAT));
        let path = self.dir.join(&file_name);

        if location.contains(['/', '\\', '\0']) || location.contains("..") {
            return Err(WeatherDeskError::storage_write(
                &path,
                "location is not usable as a file name",
            ));
        }

        let record = SnapshotRecord {
            location: location.to_string(),
            country: country.to_string(),
            forecast: forecast.clone(),
            saved_at: at.format(TIMESTAMP_FORMAT).to_string(),
        };

        let bytes = to_indented_json(&record)
            .map_err(|e| WeatherDeskError::storage_write(&path, e.to_string()))?;
        write_atomic(&path, &bytes)
            .map_err(|e| WeatherDeskError::storage_write(&path, e.to_string()))?;

        info!("Weather data for {} saved in {}", location, path.display());
        Ok(path)
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn save(&self, location: &str, country: &str, forecast: &Value) -> Result<PathBuf> {
        self.save_at(location, country, forecast, Local::now().naive_local())
    }
}
