use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::charts::Figure;
use crate::fitbit::{FetchError, FitbitClient, Metric};
use crate::state::SharedState;

use super::input::{self, ChartRequest, Submission};
use super::transform;
use super::PipelineError;

/// Six figures in `Metric::ALL` order plus the error flag shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub charts: [Figure; 6],
    pub sleep_minutes: BTreeMap<String, u64>,
    pub show_error: bool,
}

impl DashboardResponse {
    pub fn failed() -> Self {
        Self {
            show_error: true,
            ..Self::default()
        }
    }

    pub fn chart(&self, metric: Metric) -> &Figure {
        let idx = Metric::ALL.iter().position(|m| *m == metric).unwrap_or(0);
        &self.charts[idx]
    }
}

/// Validate the submission, fetch all six metrics and build their charts.
/// Every failure collapses into `DashboardResponse::failed()`.
pub async fn run(state: &SharedState, req: &ChartRequest) -> DashboardResponse {
    let today = state.today();

    let submission = match input::validate(req, today, state.config.history_days) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!("Dashboard submission rejected: {e}");
            return DashboardResponse::failed();
        }
    };

    match build(&state.fitbit, &submission).await {
        Ok(response) => {
            tracing::info!("Rendered dashboard for {}", submission.date);
            response
        }
        Err(e) => {
            tracing::warn!("Dashboard pipeline failed for {}: {e}", submission.date);
            DashboardResponse::failed()
        }
    }
}

pub async fn build(
    client: &FitbitClient,
    submission: &Submission,
) -> Result<DashboardResponse, PipelineError> {
    let bodies = fetch_all(client, &submission.token, submission.date).await?;
    render(submission.date, &bodies)
}

/// Issue the six requests concurrently and wait for every outcome. The first
/// failure in display order fails the whole set.
pub async fn fetch_all(
    client: &FitbitClient,
    token: &str,
    date: NaiveDate,
) -> Result<Vec<Value>, FetchError> {
    let [hr, steps, weight, spo2, activity, sleep] = Metric::ALL;
    let (hr, steps, weight, spo2, activity, sleep) = tokio::join!(
        client.fetch(hr, token, date),
        client.fetch(steps, token, date),
        client.fetch(weight, token, date),
        client.fetch(spo2, token, date),
        client.fetch(activity, token, date),
        client.fetch(sleep, token, date),
    );

    [hr, steps, weight, spo2, activity, sleep]
        .into_iter()
        .try_fold(Vec::with_capacity(Metric::ALL.len()), |mut bodies, result| {
            bodies.push(result?);
            Ok::<_, FetchError>(bodies)
        })
}

/// Turn the six response bodies (in `Metric::ALL` order) into charts.
pub fn render(date: NaiveDate, bodies: &[Value]) -> Result<DashboardResponse, PipelineError> {
    let mut response = DashboardResponse::default();

    for ((slot, metric), body) in response.charts.iter_mut().zip(Metric::ALL).zip(bodies) {
        *slot = match metric {
            Metric::Activity => transform::activity_chart(date, body)?,
            Metric::Sleep => {
                let reduction = transform::reduce_sleep(body)?;
                response.sleep_minutes = reduction.stage_minutes.clone();
                transform::sleep_chart(date, &reduction)
            }
            line => transform::line_chart(line, date, body)?,
        };
    }

    Ok(response)
}
