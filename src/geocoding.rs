//! Geocoding client for the Open-Meteo search API
//!
//! Resolves a free-text location name to its country and confirms that the
//! place exists before any weather lookup is attempted.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::models::{GeoResult, LocationQuery};
use crate::{Result, Upstream, WeatherDeskError};

/// Resolves location names to geographic metadata
#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    /// Look up `location`, failing with `LocationNotFound` when nothing matches
    async fn geocode(&self, location: &LocationQuery) -> Result<GeoResult>;
}

/// Build the shared HTTP client used for upstream calls
pub fn build_http_client(timeout_seconds: u32) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds.into()))
        .user_agent(concat!("WeatherDesk/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| WeatherDeskError::config(format!("Failed to create HTTP client: {e}")))
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingPlace>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingPlace {
    name: Option<String>,
    country: Option<String>,
}

/// Open-Meteo geocoding client
pub struct OpenMeteoGeocoder {
    client: Client,
    endpoint: String,
}

impl OpenMeteoGeocoder {
    #[must_use]
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    fn search_url(&self, location: &LocationQuery) -> String {
        format!(
            "{}?name={}",
            self.endpoint,
            urlencoding::encode(location.as_str())
        )
    }
}

#[async_trait]
impl GeocodeProvider for OpenMeteoGeocoder {
    #[instrument(skip(self), fields(location = %location))]
    async fn geocode(&self, location: &LocationQuery) -> Result<GeoResult> {
        let start_time = Instant::now();
        let url = self.search_url(location);
        debug!("Geocoding request URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| WeatherDeskError::upstream(Upstream::Geocoding, e.to_string()))?;

        let body: GeocodingResponse = response.json().await.map_err(|e| {
            WeatherDeskError::upstream(
                Upstream::Geocoding,
                format!("Invalid geocoding response: {e}"),
            )
        })?;

        let first = body
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| WeatherDeskError::location_not_found(location.as_str()))?;

        info!(
            "Geocoded '{}' to {} ({}) in {:.3}s",
            location,
            first.name.as_deref().unwrap_or("?"),
            first.country.as_deref().unwrap_or("no country"),
            start_time.elapsed().as_secs_f64()
        );

        Ok(GeoResult::new(first.country))
    }
}
