#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use chrono::NaiveDate;
use reqwest::Client;
use serde_json::{json, Value};
use uuid::Uuid;

use fitview::config::Config;
use fitview::fitbit::Metric;

pub const TOKEN: &str = "test-access-token";

// ── Mock tracker API ────────────────────────────────────────────

struct MockState {
    token: String,
    routes: Mutex<HashMap<String, (StatusCode, String)>>,
    hits: AtomicUsize,
}

/// In-process stand-in for the tracker API. Routes are keyed by request path;
/// requests without the expected bearer token get 401.
pub struct MockApi {
    pub addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockApi {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn respond_raw(&self, metric: Metric, date: NaiveDate, status: StatusCode, body: &str) {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert(metric.path(date), (status, body.to_string()));
    }

    pub fn respond(&self, metric: Metric, date: NaiveDate, body: &Value) {
        self.respond_raw(metric, date, StatusCode::OK, &body.to_string());
    }

    pub fn fail(&self, metric: Metric, date: NaiveDate, status: StatusCode) {
        self.respond_raw(metric, date, status, r#"{"errors":[{"errorType":"system"}]}"#);
    }

    /// Number of requests received so far.
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }
}

async fn mock_handler(
    State(state): State<Arc<MockState>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);

    let expected = format!("Bearer {}", state.token);
    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            axum::Json(json!({ "errors": [{ "errorType": "invalid_token" }] })),
        )
            .into_response();
    }

    let route = state.routes.lock().unwrap().get(uri.path()).cloned();
    match route {
        Some((status, body)) => (status, [(CONTENT_TYPE, "application/json")], body).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub async fn spawn_mock_api() -> MockApi {
    let state = Arc::new(MockState {
        token: TOKEN.to_string(),
        routes: Mutex::new(HashMap::new()),
        hits: AtomicUsize::new(0),
    });

    let router = Router::new().fallback(mock_handler).with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock API");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Mock API failed");
    });

    MockApi { addr, state }
}

// ── Fixtures ────────────────────────────────────────────────────

pub fn intraday_body(key: &str, points: &[(&str, f64)]) -> Value {
    let dataset: Vec<Value> = points
        .iter()
        .map(|(time, value)| json!({ "time": time, "value": value }))
        .collect();
    json!({ key: { "dataset": dataset, "datasetInterval": 1, "datasetType": "minute" } })
}

pub fn heart_body() -> Value {
    intraday_body(
        "activities-heart-intraday",
        &[("00:00:00", 62.0), ("00:01:00", 64.0), ("00:02:00", 61.0)],
    )
}

pub fn steps_body() -> Value {
    intraday_body("activities-steps-intraday", &[("08:00:00", 0.0), ("08:01:00", 87.0)])
}

pub fn weight_body() -> Value {
    intraday_body("weight-intraday", &[("07:30:00", 71.4)])
}

pub fn spo2_body() -> Value {
    intraday_body("spo2-intraday", &[("02:00:00", 96.0), ("02:05:00", 95.5)])
}

pub fn activity_body() -> Value {
    json!({
        "activities": [],
        "summary": {
            "sedentaryMinutes": 612,
            "lightlyActiveMinutes": 201,
            "moderatelyActiveMinutes": 34,
            "veryActiveMinutes": 18,
            "steps": 9120
        }
    })
}

pub fn sleep_body() -> Value {
    json!({
        "sleep": [
            {
                "isMainSleep": true,
                "levels": {
                    "summary": {
                        "deep": { "count": 3, "minutes": 84 },
                        "light": { "count": 20, "minutes": 221 },
                        "rem": { "count": 5, "minutes": 95 },
                        "wake": { "count": 18, "minutes": 40 }
                    },
                    "data": [
                        { "dateTime": "2025-06-09T23:10:00.000", "level": "wake", "seconds": 120 },
                        { "dateTime": "2025-06-09T23:12:00.000", "level": "light", "seconds": 900 },
                        { "dateTime": "2025-06-09T23:27:00.000", "level": "deep", "seconds": 1800 },
                        { "dateTime": "2025-06-09T23:57:00.000", "level": "rem", "seconds": 600 },
                        { "dateTime": "2025-06-10T00:07:00.000", "level": "light", "seconds": 300 }
                    ]
                }
            }
        ]
    })
}

// ── Dashboard app ───────────────────────────────────────────────

/// Date every dashboard test treats as today.
pub fn pinned_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
}

pub fn test_config(api_base_url: String, log_file: PathBuf) -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        logger_port: 0,
        api_base_url,
        request_timeout: Duration::from_secs(5),
        history_days: 90,
        log_file,
        max_body_size: 1_048_576,
        log_level: "warn".to_string(),
        today: Some(pinned_today()),
    }
}

/// A running dashboard wired to its own mock API, preloaded with data for today.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub api: MockApi,
    pub today: NaiveDate,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST the JSON chart request, return (body, status).
    pub async fn charts(&self, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/v1/charts"))
            .json(body)
            .send()
            .await
            .expect("charts request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Charts for today with the valid token.
    pub async fn charts_today(&self) -> Value {
        let (body, status) = self
            .charts(&json!({ "token": TOKEN, "date": self.today.to_string() }))
            .await;
        assert_eq!(status, StatusCode::OK);
        body
    }

    /// Submit the HTML form, return (page, status).
    pub async fn submit_form(&self, data: &[(&str, &str)]) -> (String, StatusCode) {
        let resp = self
            .client
            .post(self.url("/"))
            .form(data)
            .send()
            .await
            .expect("form submit failed");
        let status = resp.status();
        (resp.text().await.unwrap_or_default(), status)
    }

    pub fn load_defaults(&self) {
        let d = self.today;
        self.api.respond(Metric::HeartRate, d, &heart_body());
        self.api.respond(Metric::Steps, d, &steps_body());
        self.api.respond(Metric::Weight, d, &weight_body());
        self.api.respond(Metric::Spo2, d, &spo2_body());
        self.api.respond(Metric::Activity, d, &activity_body());
        self.api.respond(Metric::Sleep, d, &sleep_body());
    }
}

pub async fn spawn_app() -> TestApp {
    let api = spawn_mock_api().await;
    let config = test_config(api.base_url(), std::env::temp_dir().join("unused.log"));

    let app = fitview::build_app(config).expect("Failed to build app");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let test_app = TestApp {
        addr,
        client: Client::new(),
        api,
        today: pinned_today(),
    };
    test_app.load_defaults();
    test_app
}

// ── Logger app ──────────────────────────────────────────────────

pub struct LoggerApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub log_file: PathBuf,
}

impl LoggerApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn log(&self, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/log"))
            .json(body)
            .send()
            .await
            .expect("log request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub fn lines(&self) -> Vec<String> {
        std::fs::read_to_string(&self.log_file)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

/// Spawn the logging service writing to a fresh temporary file.
pub async fn spawn_logger() -> LoggerApp {
    let log_file = std::env::temp_dir().join(format!(
        "fitview_test_{}.log",
        Uuid::now_v7().simple()
    ));
    let config = test_config("http://127.0.0.1:9".to_string(), log_file.clone());

    let app = fitview::build_logger_app(&config)
        .await
        .expect("Failed to build logger app");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Logger failed");
    });

    LoggerApp {
        addr,
        client: Client::new(),
        log_file,
    }
}

/// Remove the temporary log file.
pub fn cleanup_logger(app: LoggerApp) {
    let _ = std::fs::remove_file(&app.log_file);
}
