//! Serde types for the subset of Terra webhook payloads the app ingests.
//!
//! Terra sends one JSON object per webhook with a `type` discriminator, a
//! `user` block identifying the wearer, and a `data` array whose element
//! shape depends on the type. Unknown fields are tolerated everywhere;
//! unknown types keep their data as raw JSON so nothing is lost in logs.

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub user: Option<TerraUser>,
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
}

impl WebhookPayload {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TerraUser {
    pub user_id: String,
    /// Upstream wearable, e.g. `OURA`, `GOOGLE`, `SAMSUNG`, `APPLE`.
    pub provider: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metadata {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

/// `type = "activity"`: a single workout or session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityData {
    #[serde(default)]
    pub metadata: Metadata,
    pub distance_data: Option<DistanceData>,
    pub calories_data: Option<CaloriesData>,
    pub heart_rate_data: Option<HeartRateData>,
    pub oxygen_data: Option<OxygenData>,
}

/// `type = "daily"`: a whole-day rollup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyData {
    #[serde(default)]
    pub metadata: Metadata,
    pub distance_data: Option<DailyDistanceData>,
    pub calories_data: Option<CaloriesData>,
    pub heart_rate_data: Option<HeartRateData>,
    pub oxygen_data: Option<OxygenData>,
}

/// `type = "sleep"`: a sleep session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SleepData {
    #[serde(default)]
    pub metadata: Metadata,
    pub sleep_durations_data: Option<SleepDurationsData>,
    pub heart_rate_data: Option<HeartRateData>,
    pub oxygen_data: Option<OxygenData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DistanceData {
    pub summary: Option<DistanceSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DistanceSummary {
    pub distance_meters: Option<f64>,
    pub steps: Option<f64>,
}

/// Daily payloads carry distance fields flat, not under `summary`.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyDistanceData {
    pub distance_meters: Option<f64>,
    pub steps: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaloriesData {
    pub total_burned_calories: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeartRateData {
    pub summary: Option<HeartRateSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeartRateSummary {
    pub avg_hr_bpm: Option<f64>,
    pub resting_hr_bpm: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OxygenData {
    pub avg_saturation_percentage: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SleepDurationsData {
    pub asleep: Option<AsleepDurations>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AsleepDurations {
    pub duration_asleep_state_seconds: Option<f64>,
}
