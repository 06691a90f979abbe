//! Data models for the `WeatherDesk` service
//!
//! This module contains the core domain models organized by concern:
//! - Location: query normalization and geocoding results
//! - Forecast: upstream day records and the shaped display form
//! - History: persisted search history entries
//! - Snapshot: saved copies of a single forecast result

pub mod forecast;
pub mod history;
pub mod location;
pub mod snapshot;

pub use forecast::{FORECAST_DAYS, ForecastDay, UpstreamDay, shape_forecast};
pub use history::HistoryEntry;
pub use location::{GeoResult, LocationQuery};
pub use snapshot::SnapshotRecord;

/// Human-readable local timestamp format used in stored records
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
