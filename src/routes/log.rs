use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::SharedLoggerState;

pub async fn log_payload(
    State(state): State<SharedLoggerState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, AppError> {
    tracing::info!("Received data: {payload}");
    state.sink.append(&payload).await?;

    Ok(Json(json!({
        "status": "logged",
        "received": payload,
    })))
}
