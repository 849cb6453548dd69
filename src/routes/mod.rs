pub mod charts;
pub mod log;

use axum::routing::post;
use axum::Router;

use crate::state::{SharedLoggerState, SharedState};

pub fn api_routes() -> Router<SharedState> {
    Router::new().route("/api/v1/charts", post(charts::build))
}

pub fn logger_routes() -> Router<SharedLoggerState> {
    Router::new().route("/log", post(log::log_payload))
}
