pub mod charts;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod fitbit;
pub mod logsink;
pub mod routes;
pub mod shutdown;
pub mod state;
pub mod views;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::fitbit::FitbitClient;
use crate::logsink::LogSink;
use crate::state::{AppState, LoggerState, SharedLoggerState, SharedState};

/// Build the dashboard service: HTML page, JSON chart API and health check.
pub fn build_app(config: Config) -> Result<Router, reqwest::Error> {
    let fitbit = FitbitClient::new(&config.api_base_url, config.request_timeout)?;
    tracing::info!("Tracker API base: {}", config.api_base_url);

    let state: SharedState = Arc::new(AppState { config, fitbit });

    Ok(with_common_layers(
        Router::new()
            .merge(routes::api_routes())
            .merge(views::view_routes())
            .with_state(state),
    ))
}

/// Build the logging service. Opens the log file once; it stays open for the
/// lifetime of the process.
pub async fn build_logger_app(config: &Config) -> std::io::Result<Router> {
    let sink = LogSink::open(&config.log_file).await?;
    tracing::info!("Appending payloads to {}", sink.path().display());

    let state: SharedLoggerState = Arc::new(LoggerState { sink });

    Ok(with_common_layers(
        routes::logger_routes()
            .layer(DefaultBodyLimit::max(config.max_body_size))
            .with_state(state),
    ))
}

fn with_common_layers(router: Router) -> Router {
    router
        .route("/health", axum::routing::get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                )),
        )
}

async fn health() -> &'static str {
    "ok"
}

pub fn init_tracing(config: &Config) {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();
}
