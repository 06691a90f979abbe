//! Integration tests for the WeatherDesk HTTP surface
//!
//! Upstream geocoding and weather services are replaced by a wiremock server;
//! history and snapshots go to temporary directories.

use std::fs;
use std::path::PathBuf;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use tempfile::TempDir;
use tower::ServiceExt;
use weatherdesk::{HistoryEntry, SnapshotRecord, WeatherDeskConfig, web};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct TestApp {
    app: Router,
    server: MockServer,
    dir: TempDir,
}

impl TestApp {
    async fn start() -> Self {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().expect("temp dir");

        let config = WeatherDeskConfig {
            api_key: Some("test-key".to_string()),
            base_url: format!("{}/timeline/", server.uri()),
            geocoding_url: format!("{}/v1/search", server.uri()),
            bg_color: "#C0FFEE".to_string(),
            history_file: dir.path().join("search_history.json"),
            snapshot_dir: dir.path().join("saved_data"),
            timeout_seconds: 2,
            ..WeatherDeskConfig::default()
        };
        let state = web::build_state(&config).expect("state");

        Self {
            app: web::app(state),
            server,
            dir,
        }
    }

    fn history_file(&self) -> PathBuf {
        self.dir.path().join("search_history.json")
    }

    fn snapshot_dir(&self) -> PathBuf {
        self.dir.path().join("saved_data")
    }

    fn history(&self) -> Vec<HistoryEntry> {
        serde_json::from_str(&fs::read_to_string(self.history_file()).expect("history file"))
            .expect("history json")
    }

    async fn mock_geocoding(&self, name: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("name", name))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    async fn mock_weather(&self, name: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(format!("/timeline/{name}")))
            .and(query_param("unitGroup", "metric"))
            .and(query_param("key", "test-key"))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    async fn get(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request");
        self.send(request).await
    }

    async fn post_form(&self, uri: &str, form: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .expect("request");
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.app.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn geocoding_hit(country: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "results": [
            { "name": "Paris", "latitude": 48.85, "longitude": 2.35, "country": country }
        ]
    }))
}

fn weather_days(count: usize) -> ResponseTemplate {
    let days: Vec<_> = (0..count)
        .map(|i| {
            serde_json::json!({
                "datetime": format!("2024-05-{:02}", i + 1),
                "tempmax": 20.5 + i as f64,
                "tempmin": 10.25 + i as f64,
                "humidity": 60.0 + i as f64,
                "conditions": "Clear"
            })
        })
        .collect();
    ResponseTemplate::new(200).set_body_json(serde_json::json!({ "days": days }))
}

#[tokio::test]
async fn test_home_page_uses_background_color() {
    let app = TestApp::start().await;

    let (status, body) = app.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("background-color: #C0FFEE;"));
    assert!(body.contains("action=\"/results\""));
}

#[tokio::test]
async fn test_results_success_records_history_and_metric() {
    let app = TestApp::start().await;
    app.mock_geocoding("Paris", geocoding_hit("France")).await;
    app.mock_weather("Paris", weather_days(10)).await;

    let (status, body) = app.post_form("/results", "location=%20paris%20").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Weather for Paris, France"), "{body}");
    assert!(body.contains("<td>2024-05-07</td>"));
    assert!(!body.contains("<td>2024-05-08</td>"));

    let history = app.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].location, "Paris");
    assert_eq!(history[0].country, "France");

    let (status, metrics) = app.get("/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        metrics.contains("city_views_total{city=\"Paris\"} 1"),
        "{metrics}"
    );

    app.post_form("/results", "location=Paris").await;
    assert_eq!(app.history().len(), 2);
    let (_, metrics) = app.get("/metrics").await;
    assert!(metrics.contains("city_views_total{city=\"Paris\"} 2"));
}

#[tokio::test]
async fn test_results_location_not_found() {
    let app = TestApp::start().await;
    app.mock_geocoding(
        "Atlantis",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": [] })),
    )
    .await;

    let (status, body) = app.post_form("/results", "location=atlantis").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Location not found."));
    assert!(!app.history_file().exists());
}

#[tokio::test]
async fn test_results_missing_results_key_is_not_found() {
    let app = TestApp::start().await;
    app.mock_geocoding(
        "Atlantis",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "generationtime_ms": 0.3 })),
    )
    .await;

    let (_, body) = app.post_form("/results", "location=Atlantis").await;

    assert!(body.contains("Location not found."));
}

#[tokio::test]
async fn test_results_geocoding_failure() {
    let app = TestApp::start().await;
    app.mock_geocoding("Paris", ResponseTemplate::new(500)).await;

    let (status, body) = app.post_form("/results", "location=Paris").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Error fetching location data."));
    assert!(!app.history_file().exists());
}

#[tokio::test]
async fn test_results_weather_failure_leaves_history_unchanged() {
    let app = TestApp::start().await;
    app.mock_geocoding("Paris", geocoding_hit("France")).await;
    app.mock_weather("Paris", ResponseTemplate::new(401)).await;

    let (status, body) = app.post_form("/results", "location=Paris").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Error fetching weather data"));
    assert!(!app.history_file().exists());

    let (_, metrics) = app.get("/metrics").await;
    assert!(!metrics.contains("city=\"Paris\""));
}

#[tokio::test]
async fn test_results_with_corrupt_history_is_server_error() {
    let app = TestApp::start().await;
    app.mock_geocoding("Paris", geocoding_hit("France")).await;
    app.mock_weather("Paris", weather_days(7)).await;
    fs::write(app.history_file(), "{\"not\": \"a list\"}").unwrap();

    let (status, _) = app.post_form("/results", "location=Paris").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_history_page() {
    let app = TestApp::start().await;

    let (status, body) = app.get("/history").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("<li>"));

    fs::write(
        app.history_file(),
        r#"[{"location":"Oslo","country":"Norway","date":"2024-01-01 08:00:00"}]"#,
    )
    .unwrap();

    let (status, body) = app.get("/history").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Oslo (Norway) at 2024-01-01 08:00:00"));
}

#[tokio::test]
async fn test_history_page_with_corrupt_file() {
    let app = TestApp::start().await;
    fs::write(app.history_file(), "not json").unwrap();

    let (status, _) = app.get("/history").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_save_weather_data_writes_snapshot() {
    let app = TestApp::start().await;
    let forecast = r#"[{"date":"2024-05-01","day_temp":21.5,"night_temp":11.0,"humidity":60.0}]"#;
    let form = format!(
        "location=Paris&country=France&forecast={}",
        urlencoding::encode(forecast)
    );

    let (status, body) = app.post_form("/save_weather_data", &form).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Weather data saved successfully!"));
    assert!(body.contains("Weather for Paris, France"));

    let files: Vec<PathBuf> = fs::read_dir(app.snapshot_dir())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_str().unwrap().to_string();
    assert!(name.starts_with("Paris_") && name.ends_with(".json"), "{name}");

    let record: SnapshotRecord =
        serde_json::from_str(&fs::read_to_string(&files[0]).unwrap()).unwrap();
    assert_eq!(record.location, "Paris");
    assert_eq!(record.country, "France");
    assert_eq!(record.forecast[0]["day_temp"], 21.5);
}

#[tokio::test]
async fn test_save_weather_data_keeps_submitted_forecast_verbatim() {
    let app = TestApp::start().await;
    let forecast = r#"[{"date":"2024-05-01","day_temp":20,"night_temp":10,"humidity":50,"wind":"calm"}]"#;
    let form = format!(
        "location=Oslo&country=Norway&forecast={}",
        urlencoding::encode(forecast)
    );

    let (status, body) = app.post_form("/save_weather_data", &form).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Weather data saved successfully!"));
    assert!(body.contains("<td>2024-05-01</td>"));

    let file = fs::read_dir(app.snapshot_dir())
        .unwrap()
        .next()
        .unwrap()
        .unwrap()
        .path();
    let written = fs::read_to_string(file).unwrap();
    assert!(written.contains("\"day_temp\": 20,"), "{written}");
    assert!(written.contains("\"wind\": \"calm\""), "{written}");
}

#[tokio::test]
async fn test_save_weather_data_accepts_any_json_forecast() {
    let app = TestApp::start().await;

    let (status, body) = app
        .post_form(
            "/save_weather_data",
            "location=Oslo&country=Norway&forecast=%7B%22note%22%3A%22none%22%7D",
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Weather data saved successfully!"));
    assert_eq!(fs::read_dir(app.snapshot_dir()).unwrap().count(), 1);
}

#[tokio::test]
async fn test_save_weather_data_with_bad_forecast() {
    let app = TestApp::start().await;

    let (status, body) = app
        .post_form("/save_weather_data", "location=Paris&country=France&forecast=oops")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Error saving weather data."));
    assert!(!body.contains("Weather for Paris"));
    assert!(!app.snapshot_dir().exists());
}
