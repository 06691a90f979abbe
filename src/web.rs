use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::api::{self, AppState};
use crate::config::WeatherDeskConfig;
use crate::geocoding::{OpenMeteoGeocoder, build_http_client};
use crate::lookup::WeatherLookup;
use crate::metrics::PrometheusCityCounter;
use crate::storage::{FileSnapshotStore, JsonHistoryStore};
use crate::weather::TimelineWeatherClient;

const MAX_BODY_BYTES: usize = 64 * 1024;

/// Wire the production collaborators described by `config`
pub fn build_state(config: &WeatherDeskConfig) -> Result<AppState> {
    if config.api_key.is_none() {
        warn!("API_KEY is not set, weather lookups will be rejected upstream");
    }

    let client = build_http_client(config.timeout_seconds)?;
    let history = Arc::new(JsonHistoryStore::new(&config.history_file));
    let counter = Arc::new(PrometheusCityCounter::new());

    let lookup = WeatherLookup::new(
        Arc::new(OpenMeteoGeocoder::new(client.clone(), &config.geocoding_url)),
        Arc::new(TimelineWeatherClient::new(
            client,
            &config.base_url,
            config.api_key.clone(),
        )),
        history.clone(),
        counter.clone(),
    );

    Ok(AppState {
        lookup: Arc::new(lookup),
        history,
        snapshots: Arc::new(FileSnapshotStore::new(&config.snapshot_dir)),
        counter,
        background_color: config.bg_color.clone(),
    })
}

/// Routes plus request tracing and body limits
pub fn app(state: AppState) -> Router {
    api::router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES)),
    )
}

pub async fn run(config: WeatherDeskConfig) -> Result<()> {
    let app = app(build_state(&config)?);

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    tracing::info!("Web server running at http://{}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
        })
        .await
        .context("Web server failed")
}
