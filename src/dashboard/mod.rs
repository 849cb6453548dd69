pub mod input;
pub mod pipeline;
pub mod transform;

use chrono::NaiveDate;

use crate::fitbit::{FetchError, Metric};

pub use pipeline::DashboardResponse;

/// Why a submission produced the error outcome. Only ever logged; the caller
/// sees the same blank charts for every variant.
#[derive(Debug)]
pub enum PipelineError {
    MissingToken,
    MissingDate,
    InvalidDate(String),
    DateOutOfRange(NaiveDate),
    Fetch(FetchError),
    Shape { metric: Metric, message: String },
}

impl PipelineError {
    /// Input problems are detected before any request goes out.
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            PipelineError::MissingToken
                | PipelineError::MissingDate
                | PipelineError::InvalidDate(_)
                | PipelineError::DateOutOfRange(_)
        )
    }
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::MissingToken => write!(f, "No access token supplied"),
            PipelineError::MissingDate => write!(f, "No date selected"),
            PipelineError::InvalidDate(raw) => write!(f, "Invalid date: {raw}"),
            PipelineError::DateOutOfRange(date) => {
                write!(f, "Date outside selectable window: {date}")
            }
            PipelineError::Fetch(err) => write!(f, "{err}"),
            PipelineError::Shape { metric, message } => {
                write!(f, "Unexpected {metric} response: {message}")
            }
        }
    }
}

impl From<FetchError> for PipelineError {
    fn from(err: FetchError) -> Self {
        PipelineError::Fetch(err)
    }
}
