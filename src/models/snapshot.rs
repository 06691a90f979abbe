//! Saved forecast snapshots

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single forecast result as written to its own snapshot file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub location: String,
    pub country: String,
    /// Forecast JSON exactly as it was submitted
    pub forecast: Value,
    /// Local time, `YYYY-MM-DD HH:MM:SS`
    pub saved_at: String,
}
