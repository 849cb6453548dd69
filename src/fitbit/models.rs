//! Response shapes of the tracker API. Containers are optional so that an absent
//! key reads the same as an empty one; the points inside them are not.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct IntradayPoint {
    pub time: String,
    pub value: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct IntradaySeries {
    #[serde(default)]
    pub dataset: Option<Vec<IntradayPoint>>,
}

/// `summary` object of the daily activity endpoint. Missing fields count as zero.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    pub sedentary_minutes: Option<f64>,
    pub lightly_active_minutes: Option<f64>,
    pub moderately_active_minutes: Option<f64>,
    pub very_active_minutes: Option<f64>,
}

/// Records stay raw until they are known to be main sleep, so a nap with an
/// odd shape never gets parsed.
#[derive(Debug, Default, Deserialize)]
pub struct SleepResponse {
    #[serde(default)]
    pub sleep: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
pub struct SleepRecord {
    #[serde(default)]
    pub levels: Option<SleepLevels>,
}

impl SleepRecord {
    pub fn is_main_sleep(record: &Value) -> bool {
        record.get("isMainSleep").and_then(Value::as_bool) == Some(true)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SleepLevels {
    #[serde(default)]
    pub summary: Option<BTreeMap<String, StageSummary>>,
    #[serde(default)]
    pub data: Option<Vec<SleepLevelPoint>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StageSummary {
    #[serde(default)]
    pub minutes: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepLevelPoint {
    pub date_time: String,
    pub level: String,
}
