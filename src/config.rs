use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub logger_port: u16,
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub history_days: u32,
    pub log_file: PathBuf,
    pub max_body_size: usize,
    pub log_level: String,
    /// Fixed "today" for the date window; the local date when unset.
    pub today: Option<NaiveDate>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("FITVIEW_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid FITVIEW_HOST: {e}"))?;

        let port: u16 = env_or("FITVIEW_PORT", "8050")
            .parse()
            .map_err(|e| format!("Invalid FITVIEW_PORT: {e}"))?;

        let logger_port: u16 = env_or("FITVIEW_LOGGER_PORT", "8000")
            .parse()
            .map_err(|e| format!("Invalid FITVIEW_LOGGER_PORT: {e}"))?;

        let api_base_url = env_or("FITVIEW_API_BASE_URL", "https://api.fitbit.com")
            .trim_end_matches('/')
            .to_string();
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(format!("Invalid FITVIEW_API_BASE_URL: {api_base_url}"));
        }

        let timeout_secs: u64 = env_or("FITVIEW_REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .map_err(|e| format!("Invalid FITVIEW_REQUEST_TIMEOUT_SECS: {e}"))?;

        let history_days: u32 = env_or("FITVIEW_HISTORY_DAYS", "90")
            .parse()
            .map_err(|e| format!("Invalid FITVIEW_HISTORY_DAYS: {e}"))?;

        let log_file = PathBuf::from(env_or("FITVIEW_LOG_FILE", "requests.log"));

        let max_body_size: usize = env_or("FITVIEW_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid FITVIEW_MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("FITVIEW_LOG_LEVEL", "info");

        let today = match std::env::var("FITVIEW_TODAY") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .map_err(|e| format!("Invalid FITVIEW_TODAY: {e}"))?,
            ),
            _ => None,
        };

        Ok(Config {
            host,
            port,
            logger_port,
            api_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            history_days,
            log_file,
            max_body_size,
            log_level,
            today,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
