use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::config::Config;
use crate::fitbit::FitbitClient;
use crate::logsink::LogSink;

pub type SharedState = Arc<AppState>;

/// Dashboard service state.
pub struct AppState {
    pub config: Config,
    pub fitbit: FitbitClient,
}

impl AppState {
    /// Last selectable date. Both the page and the pipeline read it here so
    /// they agree on the window.
    pub fn today(&self) -> NaiveDate {
        self.config.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

pub type SharedLoggerState = Arc<LoggerState>;

/// Logging service state. The sink is opened once at startup.
pub struct LoggerState {
    pub sink: LogSink,
}
