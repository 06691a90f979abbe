//! City weather lookup: the `/results` flow
//!
//! Geocode, then fetch the forecast, then shape it, record the search and
//! count it. Upstream failures end the lookup with a user-facing message and
//! leave history and metrics untouched. Storage failures are returned as
//! errors.

use std::sync::Arc;

use chrono::Local;
use serde::Serialize;
use tokio::task;
use tracing::{error, info, instrument, warn};

use crate::geocoding::GeocodeProvider;
use crate::metrics::CityCounter;
use crate::models::{ForecastDay, HistoryEntry, LocationQuery, shape_forecast};
use crate::storage::HistoryStore;
use crate::weather::ForecastProvider;
use crate::{Result, WeatherDeskError};

/// Successful lookup, ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupReport {
    pub location: String,
    pub country: String,
    pub forecast: Vec<ForecastDay>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(LookupReport),
    /// The lookup ended early; carries the message shown to the user
    Failed(String),
}

/// Orchestrates a single city lookup across the upstream services and stores
pub struct WeatherLookup {
    geocoder: Arc<dyn GeocodeProvider>,
    weather: Arc<dyn ForecastProvider>,
    history: Arc<dyn HistoryStore>,
    counter: Arc<dyn CityCounter>,
}

impl WeatherLookup {
    pub fn new(
        geocoder: Arc<dyn GeocodeProvider>,
        weather: Arc<dyn ForecastProvider>,
        history: Arc<dyn HistoryStore>,
        counter: Arc<dyn CityCounter>,
    ) -> Self {
        Self {
            geocoder,
            weather,
            history,
            counter,
        }
    }

    #[instrument(skip(self))]
    pub async fn lookup(&self, raw_location: &str) -> Result<LookupOutcome> {
        let location = LocationQuery::normalize(raw_location);
        info!("Request for weather data received for location: {}", location);

        let geo = match self.geocoder.geocode(&location).await {
            Ok(geo) => geo,
            Err(e) => return Ok(Self::failed(&location, e)),
        };

        let days = match self.weather.forecast(&location).await {
            Ok(days) => days,
            Err(e) => return Ok(Self::failed(&location, e)),
        };

        let forecast = shape_forecast(&days);
        let country = geo.country;

        let entry = HistoryEntry::new(
            location.as_str(),
            country.as_str(),
            Local::now().naive_local(),
        );
        let history = Arc::clone(&self.history);
        task::spawn_blocking(move || history.append(entry)).await??;
        self.counter.increment(location.as_str());

        info!("Weather data for {} retrieved successfully", location);
        Ok(LookupOutcome::Found(LookupReport {
            location: location.into_inner(),
            country,
            forecast,
        }))
    }

    fn failed(location: &LocationQuery, err: WeatherDeskError) -> LookupOutcome {
        match &err {
            WeatherDeskError::LocationNotFound { .. } => {
                warn!("Location not found: {}", location);
            }
            _ => error!("Lookup for {} failed: {}", location, err),
        }
        LookupOutcome::Failed(err.user_message())
    }
}
