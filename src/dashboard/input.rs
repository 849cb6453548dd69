use chrono::{Days, NaiveDate};
use serde::Deserialize;

use super::PipelineError;

/// Raw submission as it arrives from the form or the JSON API.
/// Intentionally not `Debug`: it carries the access token.
#[derive(Default, Deserialize)]
pub struct ChartRequest {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// A submission that passed validation and may go to the network.
pub struct Submission {
    pub token: String,
    pub date: NaiveDate,
}

/// Inclusive range of selectable dates ending at `today`.
pub fn date_window(today: NaiveDate, history_days: u32) -> (NaiveDate, NaiveDate) {
    let earliest = today
        .checked_sub_days(Days::new(u64::from(history_days)))
        .unwrap_or(NaiveDate::MIN);
    (earliest, today)
}

pub fn validate(
    req: &ChartRequest,
    today: NaiveDate,
    history_days: u32,
) -> Result<Submission, PipelineError> {
    let token = req
        .token
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(PipelineError::MissingToken)?;

    let raw_date = req
        .date
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or(PipelineError::MissingDate)?;

    let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
        .map_err(|_| PipelineError::InvalidDate(raw_date.to_string()))?;

    let (earliest, latest) = date_window(today, history_days);
    if date < earliest || date > latest {
        return Err(PipelineError::DateOutOfRange(date));
    }

    Ok(Submission {
        token: token.to_string(),
        date,
    })
}
