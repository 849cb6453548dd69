use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::charts::{Axis, Figure, Trace};
use crate::fitbit::Metric;
use crate::fitbit::models::{
    ActivitySummary, IntradayPoint, IntradaySeries, SleepLevelPoint, SleepRecord, SleepResponse,
};

use super::PipelineError;

pub const ACTIVITY_LABELS: [&str; 4] = ["Sedentary", "Light", "Moderate", "Vigorous"];
const ACTIVITY_COLOR: &str = "green";

/// Marker colour for a sleep stage. Labels from the classic (non-staged) mode
/// have their own entries; anything else is gray.
pub fn stage_color(stage: &str) -> &'static str {
    match stage {
        "wake" => "red",
        "light" => "blue",
        "deep" => "purple",
        "rem" => "green",
        "asleep" => "blue",
        "restless" => "orange",
        _ => "gray",
    }
}

fn shape_error(metric: Metric, err: impl std::fmt::Display) -> PipelineError {
    PipelineError::Shape {
        metric,
        message: err.to_string(),
    }
}

fn expect_object(metric: Metric, body: &Value) -> Result<&Map<String, Value>, PipelineError> {
    body.as_object()
        .ok_or_else(|| shape_error(metric, "top-level value is not an object"))
}

/// Intraday `(time, value)` points for a line metric. An absent or null
/// container yields no points.
pub fn intraday_points(metric: Metric, body: &Value) -> Result<Vec<IntradayPoint>, PipelineError> {
    let obj = expect_object(metric, body)?;
    let Some(key) = metric.intraday_key() else {
        return Err(shape_error(metric, "metric has no intraday series"));
    };
    let Some(container) = obj.get(key) else {
        return Ok(Vec::new());
    };

    let series = Option::<IntradaySeries>::deserialize(container)
        .map_err(|e| shape_error(metric, e))?;
    Ok(series.and_then(|s| s.dataset).unwrap_or_default())
}

pub fn line_chart(metric: Metric, date: NaiveDate, body: &Value) -> Result<Figure, PipelineError> {
    let points = intraday_points(metric, body)?;
    if points.is_empty() {
        return Ok(Figure::no_data(metric.no_data_title()));
    }

    let (x, y): (Vec<String>, Vec<f64>) = points.into_iter().map(|p| (p.time, p.value)).unzip();

    Ok(Figure::new(
        metric.title(date),
        Axis::titled("Time"),
        Axis::titled(metric.y_axis_title()),
    )
    .with_trace(Trace::line(metric.name(), x, y)))
}

/// Minutes per activity level in `ACTIVITY_LABELS` order, or `None` when the
/// day has no summary at all.
pub fn activity_minutes(body: &Value) -> Result<Option<[f64; 4]>, PipelineError> {
    let metric = Metric::Activity;
    let obj = expect_object(metric, body)?;

    let summary = match obj.get("summary") {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Object(m)) if m.is_empty() => return Ok(None),
        Some(v) => ActivitySummary::deserialize(v).map_err(|e| shape_error(metric, e))?,
    };

    Ok(Some([
        summary.sedentary_minutes.unwrap_or(0.0),
        summary.lightly_active_minutes.unwrap_or(0.0),
        summary.moderately_active_minutes.unwrap_or(0.0),
        summary.very_active_minutes.unwrap_or(0.0),
    ]))
}

pub fn activity_chart(date: NaiveDate, body: &Value) -> Result<Figure, PipelineError> {
    let metric = Metric::Activity;
    let Some(minutes) = activity_minutes(body)? else {
        return Ok(Figure::no_data(metric.no_data_title()));
    };

    let x = ACTIVITY_LABELS.iter().map(|l| l.to_string()).collect();
    Ok(Figure::new(
        metric.title(date),
        Axis::titled("Activity Type"),
        Axis::titled(metric.y_axis_title()),
    )
    .with_trace(Trace::bar(x, minutes.to_vec(), ACTIVITY_COLOR)))
}

/// Main-sleep sessions of a day, reduced to per-stage totals and one
/// time-ordered list of stage transitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SleepReduction {
    pub stage_minutes: BTreeMap<String, u64>,
    pub points: Vec<SleepLevelPoint>,
}

impl SleepReduction {
    /// Distinct stage labels in order of first appearance.
    pub fn stages(&self) -> Vec<&str> {
        let mut stages: Vec<&str> = Vec::new();
        for point in &self.points {
            if !stages.contains(&point.level.as_str()) {
                stages.push(&point.level);
            }
        }
        stages
    }
}

pub fn reduce_sleep(body: &Value) -> Result<SleepReduction, PipelineError> {
    let metric = Metric::Sleep;
    expect_object(metric, body)?;
    let response = SleepResponse::deserialize(body).map_err(|e| shape_error(metric, e))?;

    let mut reduction = SleepReduction::default();
    let main_records = response
        .sleep
        .unwrap_or_default()
        .into_iter()
        .filter(SleepRecord::is_main_sleep);
    for raw in main_records {
        let record = SleepRecord::deserialize(&raw).map_err(|e| shape_error(metric, e))?;
        let levels = record.levels.unwrap_or_default();

        for (stage, summary) in levels.summary.unwrap_or_default() {
            *reduction.stage_minutes.entry(stage).or_insert(0) += summary.minutes.unwrap_or(0);
        }
        reduction.points.extend(levels.data.unwrap_or_default());
    }

    // ISO timestamps order lexically; the sort is stable for equal instants.
    reduction.points.sort_by(|a, b| a.date_time.cmp(&b.date_time));
    Ok(reduction)
}

pub fn sleep_chart(date: NaiveDate, reduction: &SleepReduction) -> Figure {
    let metric = Metric::Sleep;
    if reduction.points.is_empty() {
        return Figure::no_data(metric.no_data_title());
    }

    let mut figure = Figure::new(
        metric.title(date),
        Axis::titled("Time"),
        Axis::category(metric.y_axis_title()),
    );

    for stage in reduction.stages() {
        let times: Vec<String> = reduction
            .points
            .iter()
            .filter(|p| p.level == stage)
            .map(|p| p.date_time.clone())
            .collect();
        let labels = vec![stage.to_string(); times.len()];
        figure = figure.with_trace(Trace::markers(stage, times, labels, stage_color(stage)));
    }

    figure
}
