use std::sync::Arc;

use axum::{
    Form, Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::Value;
use tokio::task;
use tracing::{error, info};

use crate::{
    WeatherDeskError,
    lookup::{LookupOutcome, WeatherLookup},
    metrics::CityCounter,
    models::ForecastDay,
    storage::{HistoryStore, SnapshotStore},
    views::{self, ResultsView},
};

/// Handles shared by all routes
#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<WeatherLookup>,
    pub history: Arc<dyn HistoryStore>,
    pub snapshots: Arc<dyn SnapshotStore>,
    pub counter: Arc<dyn CityCounter>,
    pub background_color: String,
}

#[derive(Debug, Deserialize)]
pub struct LocationForm {
    pub location: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SaveForm {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub country: String,
    /// JSON-encoded list of forecast days
    #[serde(default)]
    pub forecast: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/results", post(results))
        .route("/save_weather_data", post(save_weather_data))
        .route("/history", get(history))
        .route("/metrics", get(metrics))
        .with_state(state)
}

fn internal_error(err: &WeatherDeskError) -> Response {
    error!("Request failed: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(err.user_message()),
    )
        .into_response()
}

async fn home(State(state): State<AppState>) -> Html<String> {
    info!("Home page accessed");
    Html(views::home_page(&state.background_color, None))
}

async fn results(State(state): State<AppState>, Form(form): Form<LocationForm>) -> Response {
    match state.lookup.lookup(&form.location).await {
        Ok(LookupOutcome::Found(report)) => Html(views::results_page(&ResultsView {
            location: &report.location,
            country: &report.country,
            forecast: &report.forecast,
            message: None,
        }))
        .into_response(),
        Ok(LookupOutcome::Failed(message)) => {
            Html(views::home_page(&state.background_color, Some(&message))).into_response()
        }
        Err(e) => internal_error(&e),
    }
}

async fn save_weather_data(
    State(state): State<AppState>,
    Form(form): Form<SaveForm>,
) -> Html<String> {
    let forecast = match serde_json::from_str::<Value>(&form.forecast) {
        Ok(forecast) => forecast,
        Err(e) => return save_failed(&form.location, &format!("invalid forecast payload: {e}")),
    };

    let snapshots = Arc::clone(&state.snapshots);
    let (location, country, submitted) =
        (form.location.clone(), form.country.clone(), forecast.clone());
    let saved = task::spawn_blocking(move || snapshots.save(&location, &country, &submitted))
        .await
        .map_err(WeatherDeskError::from)
        .and_then(|saved| saved);

    match saved {
        Ok(_) => {
            let days = displayable_days(&forecast);
            Html(views::results_page(&ResultsView {
                location: &form.location,
                country: &form.country,
                forecast: &days,
                message: Some("Weather data saved successfully!"),
            }))
        }
        Err(e) => save_failed(&form.location, &e.to_string()),
    }
}

fn save_failed(location: &str, reason: &str) -> Html<String> {
    error!("Error saving weather data for {}: {}", location, reason);
    Html(views::results_page(&ResultsView {
        message: Some("Error saving weather data."),
        ..ResultsView::default()
    }))
}

/// Forecast rows that fit the results table; other submitted entries are saved but not shown
fn displayable_days(forecast: &Value) -> Vec<ForecastDay> {
    forecast
        .as_array()
        .map(|days| {
            days.iter()
                .filter_map(|day| ForecastDay::deserialize(day).ok())
                .collect()
        })
        .unwrap_or_default()
}

async fn history(State(state): State<AppState>) -> Response {
    info!("History page accessed");
    let history = Arc::clone(&state.history);
    let entries = task::spawn_blocking(move || history.read_all())
        .await
        .map_err(WeatherDeskError::from)
        .and_then(|entries| entries);
    match entries {
        Ok(entries) => Html(views::history_page(&entries)).into_response(),
        Err(e) => internal_error(&e),
    }
}

async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    info!("Metrics endpoint accessed");
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.counter.render(),
    )
}
