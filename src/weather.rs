//! Weather client for the Visual Crossing timeline API

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::models::{LocationQuery, UpstreamDay};
use crate::{Result, Upstream, WeatherDeskError};

/// Fetches multi-day forecasts
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Raw daily forecast for `location`, in upstream order
    async fn forecast(&self, location: &LocationQuery) -> Result<Vec<UpstreamDay>>;
}

#[derive(Debug, Deserialize)]
struct TimelineResponse {
    days: Vec<UpstreamDay>,
}

/// Visual Crossing timeline client
pub struct TimelineWeatherClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl TimelineWeatherClient {
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    fn timeline_url(&self, location: &LocationQuery) -> String {
        format!(
            "{}{}?unitGroup=metric&key={}&contentType=json",
            self.base_url,
            urlencoding::encode(location.as_str()),
            urlencoding::encode(self.api_key.as_deref().unwrap_or_default())
        )
    }
}

#[async_trait]
impl ForecastProvider for TimelineWeatherClient {
    #[instrument(skip(self), fields(location = %location))]
    async fn forecast(&self, location: &LocationQuery) -> Result<Vec<UpstreamDay>> {
        let start_time = Instant::now();

        let response = self
            .client
            .get(self.timeline_url(location))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| {
                // the request URL carries the API key
                WeatherDeskError::upstream(Upstream::Weather, e.without_url().to_string())
            })?;

        let body: TimelineResponse = response.json().await.map_err(|e| {
            WeatherDeskError::upstream(
                Upstream::Weather,
                format!("Invalid weather response: {}", e.without_url()),
            )
        })?;

        let total_duration = start_time.elapsed();
        info!(
            "Retrieved {} forecast days for '{}' in {:.3}s",
            body.days.len(),
            location,
            total_duration.as_secs_f64()
        );
        if total_duration.as_secs() > 5 {
            warn!(
                "Slow weather API response: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(body.days)
    }
}
