//! Search history entries

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::TIMESTAMP_FORMAT;

/// One successful search, as stored in the history file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub location: String,
    pub country: String,
    /// Local time, `YYYY-MM-DD HH:MM:SS`
    #[serde(rename = "date", alias = "timestamp")]
    pub timestamp: String,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(location: impl Into<String>, country: impl Into<String>, at: NaiveDateTime) -> Self {
        Self {
            location: location.into(),
            country: country.into(),
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}
