//! Integration tests for HTTP handlers
#![allow(clippy::expect_used)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use application::{
    WeatherHistoryService,
    error::ApplicationError,
    ports::{HistorySession, HistorySourcePort},
};
use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use domain::{AirportCode, Month, RawYearDocument};
use infrastructure::{AppConfig, QueryConfig};
use presentation_http::{REQUEST_ID_HEADER, routes::create_router, state::AppState};
use serde_json::{Value, json};

const HEADER: &str = "EST,Max TemperatureF,Mean TemperatureF";

/// Canned response for one year
#[derive(Clone)]
enum Canned {
    Csv(String),
    Unavailable,
}

/// History source serving canned CSV per year; unknown years get a header-only body
#[derive(Default)]
struct FakeHistory {
    years: HashMap<i32, Canned>,
    requests: Arc<Mutex<Vec<(String, i32, i32)>>>,
    closes: Arc<AtomicUsize>,
}

impl FakeHistory {
    fn with_rows(mut self, year: i32, rows: &[&str]) -> Self {
        let mut body = String::from(HEADER);
        for row in rows {
            body.push('\n');
            body.push_str(row);
        }
        self.years.insert(year, Canned::Csv(body));
        self
    }

    fn unavailable(mut self, year: i32) -> Self {
        self.years.insert(year, Canned::Unavailable);
        self
    }
}

struct FakeSession {
    years: HashMap<i32, Canned>,
    requests: Arc<Mutex<Vec<(String, i32, i32)>>>,
    closes: Arc<AtomicUsize>,
}

#[async_trait]
impl HistorySession for FakeSession {
    async fn fetch_year(
        &self,
        airport_code: &AirportCode,
        month: Month,
        year: i32,
    ) -> Result<RawYearDocument, ApplicationError> {
        self.requests
            .lock()
            .expect("requests lock")
            .push((airport_code.to_string(), month.value(), year));

        match self.years.get(&year) {
            Some(Canned::Csv(body)) => Ok(RawYearDocument::new(year, body.clone())),
            Some(Canned::Unavailable) => Err(ApplicationError::FetchFailed {
                year,
                reason: "HTTP 503 Service Unavailable".to_string(),
            }),
            None => Ok(RawYearDocument::new(year, HEADER)),
        }
    }

    fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

impl HistorySourcePort for FakeHistory {
    fn open_session(&self) -> Result<Box<dyn HistorySession>, ApplicationError> {
        Ok(Box::new(FakeSession {
            years: self.years.clone(),
            requests: Arc::clone(&self.requests),
            closes: Arc::clone(&self.closes),
        }))
    }
}

fn kjfk_history() -> FakeHistory {
    FakeHistory::default()
        .with_rows(2020, &["2020-1-1,50,32", "2020-1-2,48,30"])
        .with_rows(2021, &["2021-1-1,40,20", "2021-1-2,41,24", "2021-1-3,45,28"])
}

fn create_test_server_with(history: FakeHistory, config: AppConfig) -> TestServer {
    let service = WeatherHistoryService::new(Arc::new(history));
    let router = create_router(AppState::new(service, config));
    TestServer::new(router).expect("Failed to create test server")
}

fn create_test_server(history: FakeHistory) -> TestServer {
    create_test_server_with(history, AppConfig::default())
}

fn year_keys(body: &Value) -> Vec<String> {
    body.as_object()
        .expect("response should be an object")
        .keys()
        .cloned()
        .collect()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(FakeHistory::default());

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

// ============================================================================
// Weather report
// ============================================================================

#[tokio::test]
async fn test_weather_report_for_two_years() {
    let server = create_test_server(kjfk_history());

    let response = server
        .get("/weather/KJFK/1?startYear=2020&endYear=2021")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(year_keys(&body), vec!["2020", "2021"]);
    assert_eq!(
        body["2020"],
        json!({
            "days": 2,
            "minDailyMeanTemp": 30,
            "meanDailyMeanTemp": 31.0,
            "maxDailyMeanTemp": 32
        })
    );
    assert_eq!(
        body["2021"],
        json!({
            "days": 3,
            "minDailyMeanTemp": 20,
            "meanDailyMeanTemp": 24.0,
            "maxDailyMeanTemp": 28
        })
    );
}

#[tokio::test]
async fn test_weather_passes_airport_and_month_through() {
    let history = kjfk_history();
    let requests = Arc::clone(&history.requests);
    let server = create_test_server(history);

    server
        .get("/weather/KJFK/13?startYear=2020&endYear=2020")
        .await
        .assert_status_ok();

    let requests = requests.lock().expect("requests lock");
    assert_eq!(*requests, vec![("KJFK".to_string(), 13, 2020)]);
}

#[tokio::test]
async fn test_weather_defaults_to_1950_through_2014() {
    let server = create_test_server(FakeHistory::default());

    let response = server.get("/weather/KJFK/7").await;

    response.assert_status_ok();
    let body: Value = response.json();
    let keys = year_keys(&body);
    assert_eq!(keys.len(), 65);
    assert_eq!(keys.first().map(String::as_str), Some("1950"));
    assert_eq!(keys.last().map(String::as_str), Some("2014"));
}

#[tokio::test]
async fn test_weather_non_positive_years_use_defaults() {
    let server = create_test_server(FakeHistory::default());

    let response = server.get("/weather/KJFK/7?startYear=0&endYear=-3").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(year_keys(&body).len(), 65);
}

#[tokio::test]
async fn test_weather_empty_years_use_defaults() {
    let server = create_test_server(FakeHistory::default());

    let response = server.get("/weather/KJFK/7?startYear=&endYear=").await;

    response.assert_status_ok();
    let body: Value = response.json();
    let keys = year_keys(&body);
    assert_eq!(keys.len(), 65);
    assert_eq!(keys.first().map(String::as_str), Some("1950"));
}

#[tokio::test]
async fn test_weather_swaps_reversed_years() {
    let server = create_test_server(kjfk_history());

    let response = server
        .get("/weather/KJFK/1?startYear=2021&endYear=2020")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(year_keys(&body), vec!["2020", "2021"]);
}

#[tokio::test]
async fn test_weather_only_end_year_below_default_start() {
    let server = create_test_server(FakeHistory::default());

    // startYear defaults to 1950, then the bounds are swapped
    let response = server.get("/weather/KJFK/1?endYear=1948").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(year_keys(&body), vec!["1948", "1949", "1950"]);
}

#[tokio::test]
async fn test_weather_uses_configured_defaults() {
    let config = AppConfig {
        query: QueryConfig {
            default_start_year: 2000,
            default_end_year: 2002,
            ..Default::default()
        },
        ..Default::default()
    };
    let server = create_test_server_with(FakeHistory::default(), config);

    let response = server.get("/weather/KJFK/1").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(year_keys(&body), vec!["2000", "2001", "2002"]);
}

#[tokio::test]
async fn test_weather_empty_year_reports_nulls() {
    let history = FakeHistory::default().with_rows(2019, &["2019-1-1,50,", "2019-1-2,50,"]);
    let server = create_test_server(history);

    let response = server
        .get("/weather/KJFK/1?startYear=2019&endYear=2019")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        body["2019"],
        json!({
            "days": 0,
            "minDailyMeanTemp": null,
            "meanDailyMeanTemp": null,
            "maxDailyMeanTemp": null
        })
    );
}

#[tokio::test]
async fn test_weather_closes_session_once() {
    let history = kjfk_history();
    let closes = Arc::clone(&history.closes);
    let server = create_test_server(history);

    server
        .get("/weather/KJFK/1?startYear=2020&endYear=2021")
        .await
        .assert_status_ok();

    assert_eq!(closes.load(Ordering::SeqCst), 1);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_weather_fetch_failure_returns_service_unavailable() {
    let history = kjfk_history().unavailable(2021);
    let server = create_test_server(history);

    let response = server
        .get("/weather/KJFK/1?startYear=2020&endYear=2021")
        .await;

    response.assert_status_service_unavailable();
    let body: Value = response.json();
    assert_eq!(body["code"], "service_unavailable");
    assert!(body.get("2020").is_none());
}

#[tokio::test]
async fn test_weather_parse_failure_returns_internal_error() {
    let history = kjfk_history().with_rows(2021, &["2021-1-1,40,twenty"]);
    let server = create_test_server(history);

    let response = server
        .get("/weather/KJFK/1?startYear=2020&endYear=2021")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["code"], "internal_error");
    assert!(body.get("2020").is_none());
}

#[tokio::test]
async fn test_weather_non_integer_month_is_bad_request() {
    let server = create_test_server(FakeHistory::default());

    let response = server.get("/weather/KJFK/january").await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["code"], "bad_request");
}

#[tokio::test]
async fn test_weather_non_integer_year_is_bad_request() {
    let server = create_test_server(FakeHistory::default());

    let response = server.get("/weather/KJFK/1?startYear=abc").await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_weather_invalid_airport_code_is_bad_request() {
    let history = FakeHistory::default();
    let requests = Arc::clone(&history.requests);
    let server = create_test_server(history);

    let response = server
        .get("/weather/K%3FFK/1?startYear=2020&endYear=2020")
        .await;

    response.assert_status_bad_request();
    assert!(requests.lock().expect("requests lock").is_empty());
}

#[tokio::test]
async fn test_weather_range_over_max_span_is_bad_request() {
    let history = FakeHistory::default();
    let requests = Arc::clone(&history.requests);
    let config = AppConfig {
        query: QueryConfig {
            max_span: Some(10),
            ..Default::default()
        },
        ..Default::default()
    };
    let server = create_test_server_with(history, config);

    let response = server
        .get("/weather/KJFK/1?startYear=1&endYear=2147483647")
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["code"], "bad_request");
    assert!(requests.lock().expect("requests lock").is_empty());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let server = create_test_server(FakeHistory::default());

    let response = server.get("/forecast/KJFK").await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["code"], "not_found");
}

// ============================================================================
// Error details
// ============================================================================

#[tokio::test]
async fn test_error_details_exposed_by_default() {
    let history = kjfk_history().with_rows(2021, &["2021-1-1,40,twenty"]);
    let server = create_test_server(history);

    let response = server
        .get("/weather/KJFK/1?startYear=2021&endYear=2021")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    let details = body["details"].as_str().expect("details should be present");
    assert!(details.contains("twenty"));
}

#[tokio::test]
async fn test_error_details_hidden_when_disabled() {
    let history = kjfk_history().with_rows(2021, &["2021-1-1,40,twenty"]);
    let mut config = AppConfig::default();
    config.server.expose_internal_errors = false;
    let server = create_test_server_with(history, config);

    let response = server
        .get("/weather/KJFK/1?startYear=2021&endYear=2021")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "An internal error occurred");
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_service_unavailable_message_hidden_when_disabled() {
    let history = kjfk_history().unavailable(2020);
    let mut config = AppConfig::default();
    config.server.expose_internal_errors = false;
    let server = create_test_server_with(history, config);

    let response = server
        .get("/weather/KJFK/1?startYear=2020&endYear=2020")
        .await;

    response.assert_status_service_unavailable();
    let body: Value = response.json();
    assert_eq!(body["error"], "Service temporarily unavailable");
}

// ============================================================================
// Request ID
// ============================================================================

#[tokio::test]
async fn test_request_id_is_generated() {
    let server = create_test_server(FakeHistory::default());

    let response = server.get("/health").await;

    let id = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .expect("request id header");
    assert!(uuid::Uuid::parse_str(id.to_str().expect("ascii header")).is_ok());
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server(FakeHistory::default());
    let id = "0190a6d2-4b6e-7c1d-9a3e-5f2b8c4d1e7a";

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static(id),
        )
        .await;

    assert_eq!(
        response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok()),
        Some(id)
    );
}
