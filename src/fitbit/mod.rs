pub mod models;

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::StatusCode;
use serde_json::Value;

/// The six metrics charted on the dashboard, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    HeartRate,
    Steps,
    Weight,
    Spo2,
    Activity,
    Sleep,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::HeartRate,
        Metric::Steps,
        Metric::Weight,
        Metric::Spo2,
        Metric::Activity,
        Metric::Sleep,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::HeartRate => "Heart Rate",
            Metric::Steps => "Steps",
            Metric::Weight => "Weight",
            Metric::Spo2 => "SpO2",
            Metric::Activity => "Activity",
            Metric::Sleep => "Sleep",
        }
    }

    /// Chart title for a day that has data.
    pub fn title(&self, date: NaiveDate) -> String {
        match self {
            Metric::Activity => format!("Activity Minutes on {date}"),
            Metric::Sleep => format!("Sleep Stages on {date}"),
            other => format!("{} on {date}", other.name()),
        }
    }

    pub fn no_data_title(&self) -> String {
        format!("No {} Data Available", self.name())
    }

    /// Request path below the API base, already parameterized by date.
    pub fn path(&self, date: NaiveDate) -> String {
        let d = date.format("%Y-%m-%d");
        match self {
            Metric::HeartRate => format!("/1/user/-/activities/heart/date/{d}/1d/1min.json"),
            Metric::Steps => format!("/1/user/-/activities/steps/date/{d}/1d/1min.json"),
            Metric::Weight => format!("/1/user/-/body/log/weight/date/{d}.json"),
            Metric::Spo2 => format!("/1/user/-/spo2/date/{d}.json"),
            Metric::Activity => format!("/1/user/-/activities/date/{d}.json"),
            Metric::Sleep => format!("/1.2/user/-/sleep/date/{d}.json"),
        }
    }

    /// Top-level key holding the intraday dataset, for the line-chart metrics.
    pub fn intraday_key(&self) -> Option<&'static str> {
        match self {
            Metric::HeartRate => Some("activities-heart-intraday"),
            Metric::Steps => Some("activities-steps-intraday"),
            Metric::Weight => Some("weight-intraday"),
            Metric::Spo2 => Some("spo2-intraday"),
            Metric::Activity | Metric::Sleep => None,
        }
    }

    pub fn y_axis_title(&self) -> &'static str {
        match self {
            Metric::HeartRate => "BPM",
            Metric::Steps => "Steps per Minute",
            Metric::Weight => "Weight",
            Metric::Spo2 => "SpO2 (%)",
            Metric::Activity => "Minutes",
            Metric::Sleep => "Stage",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug)]
pub enum FetchError {
    Transport { metric: Metric, source: reqwest::Error },
    Status { metric: Metric, status: StatusCode },
    Decode { metric: Metric, message: String },
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Transport { metric, source } => {
                write!(f, "{metric} request failed: {source}")
            }
            FetchError::Status { metric, status } => {
                write!(f, "{metric} request returned {status}")
            }
            FetchError::Decode { metric, message } => {
                write!(f, "{metric} response is not valid JSON: {message}")
            }
        }
    }
}

/// Thin client over the tracker's REST API. The access token is supplied per call
/// and never stored.
#[derive(Clone)]
pub struct FitbitClient {
    client: reqwest::Client,
    base_url: String,
}

impl FitbitClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, metric: Metric, date: NaiveDate) -> String {
        format!("{}{}", self.base_url, metric.path(date))
    }

    /// Issue one authenticated GET for `metric` on `date`. Anything but 200 is a failure.
    pub async fn fetch(
        &self,
        metric: Metric,
        token: &str,
        date: NaiveDate,
    ) -> Result<Value, FetchError> {
        let url = self.url(metric, date);
        tracing::debug!("Fetching {metric} for {date}");

        let resp = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|source| FetchError::Transport { metric, source })?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status { metric, status });
        }

        resp.json::<Value>()
            .await
            .map_err(|e| FetchError::Decode {
                metric,
                message: e.to_string(),
            })
    }
}
