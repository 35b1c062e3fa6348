use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

/// A single provider-agnostic wearable measurement.
///
/// Webhook payloads from the aggregator are normalized into this shape
/// before hitting the database, so Oura, Google Fit and Apple Health data
/// all land in one table with one unit convention per metric.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WearableSample {
    pub id: Uuid,
    pub account_id: Uuid,
    pub provider: String,
    pub metric: Metric,
    pub value: f64,
    pub unit: String,
    pub recorded_at: DateTime<Utc>,
    pub received_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Metric {
    Steps,
    HeartRate,
    RestingHeartRate,
    SleepMinutes,
    CaloriesBurned,
    DistanceMeters,
    OxygenSaturation,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Steps => "steps",
            Metric::HeartRate => "heart_rate",
            Metric::RestingHeartRate => "resting_heart_rate",
            Metric::SleepMinutes => "sleep_minutes",
            Metric::CaloriesBurned => "calories_burned",
            Metric::DistanceMeters => "distance_meters",
            Metric::OxygenSaturation => "oxygen_saturation",
        }
    }

    /// Canonical storage unit for this metric.
    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Steps => "count",
            Metric::HeartRate | Metric::RestingHeartRate => "bpm",
            Metric::SleepMinutes => "min",
            Metric::CaloriesBurned => "kcal",
            Metric::DistanceMeters => "m",
            Metric::OxygenSaturation => "percent",
        }
    }

    pub fn parse_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "steps" => Ok(Metric::Steps),
            "heart_rate" => Ok(Metric::HeartRate),
            "resting_heart_rate" => Ok(Metric::RestingHeartRate),
            "sleep_minutes" => Ok(Metric::SleepMinutes),
            "calories_burned" => Ok(Metric::CaloriesBurned),
            "distance_meters" => Ok(Metric::DistanceMeters),
            "oxygen_saturation" => Ok(Metric::OxygenSaturation),
            other => Err(CoreError::InvalidValue {
                field: "wearable.metric",
                value: other.to_string(),
            }),
        }
    }
}
