use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::dashboard::input::ChartRequest;
use crate::dashboard::{pipeline, DashboardResponse};
use crate::state::SharedState;

/// JSON counterpart of the dashboard form. Always answers 200; failures,
/// including a body that does not parse as a request, are reported through
/// `show_error`.
pub async fn build(
    State(state): State<SharedState>,
    payload: Result<Json<ChartRequest>, JsonRejection>,
) -> Json<DashboardResponse> {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::warn!("Chart request rejected: {rejection}");
            return Json(DashboardResponse::failed());
        }
    };

    Json(pipeline::run(&state, &req).await)
}
