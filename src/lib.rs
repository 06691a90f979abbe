//! `WeatherDesk` - city weather lookup web service
//!
//! Resolves a city through a geocoding service, fetches its multi-day
//! forecast, records each successful search in a JSON history file, and lets
//! users save individual forecasts as snapshot files.

pub mod api;
pub mod config;
pub mod error;
pub mod geocoding;
pub mod logging;
pub mod lookup;
pub mod metrics;
pub mod models;
pub mod storage;
pub mod views;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use crate::config::WeatherDeskConfig;
pub use error::{Upstream, WeatherDeskError};
pub use geocoding::{GeocodeProvider, OpenMeteoGeocoder};
pub use lookup::{LookupOutcome, LookupReport, WeatherLookup};
pub use crate::metrics::{CityCounter, PrometheusCityCounter};
pub use models::{ForecastDay, GeoResult, HistoryEntry, LocationQuery, SnapshotRecord};
pub use storage::{FileSnapshotStore, HistoryStore, JsonHistoryStore, SnapshotStore};
pub use weather::{ForecastProvider, TimelineWeatherClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherDeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
