use askama::Template;
use axum::extract::State;
use axum::response::Html;
use axum::Form;
use chrono::NaiveDate;

use crate::charts::Figure;
use crate::dashboard::input::{self, ChartRequest};
use crate::dashboard::{pipeline, DashboardResponse};
use crate::error::AppError;
use crate::fitbit::Metric;
use crate::state::SharedState;

pub const ERROR_MESSAGE: &str = "Something went wrong. Check your token and try again.";

#[derive(Template)]
#[template(path = "dashboard/index.html")]
struct DashboardTemplate {
    min_date: String,
    max_date: String,
    selected_date: String,
    show_error: bool,
    error_message: &'static str,
    charts: Vec<ChartSlot>,
    sleep_minutes: Vec<(String, u64)>,
}

struct ChartSlot {
    id: &'static str,
    figure_json: String,
}

fn dom_id(metric: Metric) -> &'static str {
    match metric {
        Metric::HeartRate => "graph-heart-rate",
        Metric::Steps => "graph-steps",
        Metric::Weight => "graph-weight",
        Metric::Spo2 => "graph-spo2",
        Metric::Activity => "graph-activity-minutes",
        Metric::Sleep => "graph-sleep",
    }
}

/// Serialize a figure for embedding inside a `<script>` element.
fn script_json(figure: &Figure) -> Result<String, AppError> {
    let json = serde_json::to_string(figure)
        .map_err(|e| AppError::Internal(format!("Figure serialization failed: {e}")))?;
    Ok(json.replace('<', "\\u003c"))
}

fn render(
    state: &SharedState,
    selected: Option<NaiveDate>,
    response: &DashboardResponse,
) -> Result<Html<String>, AppError> {
    let today = state.today();
    let (earliest, latest) = input::date_window(today, state.config.history_days);

    let charts = Metric::ALL
        .iter()
        .map(|metric| -> Result<ChartSlot, AppError> {
            Ok(ChartSlot {
                id: dom_id(*metric),
                figure_json: script_json(response.chart(*metric))?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let template = DashboardTemplate {
        min_date: earliest.to_string(),
        max_date: latest.to_string(),
        selected_date: selected.unwrap_or(today).to_string(),
        show_error: response.show_error,
        error_message: ERROR_MESSAGE,
        charts,
        sleep_minutes: response
            .sleep_minutes
            .iter()
            .map(|(stage, minutes)| (stage.clone(), *minutes))
            .collect(),
    };
    Ok(Html(template.render()?))
}

pub async fn index(State(state): State<SharedState>) -> Result<Html<String>, AppError> {
    render(&state, None, &DashboardResponse::default())
}

pub async fn submit(
    State(state): State<SharedState>,
    Form(req): Form<ChartRequest>,
) -> Result<Html<String>, AppError> {
    let response = pipeline::run(&state, &req).await;
    let selected = req
        .date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok());
    render(&state, selected, &response)
}
