//! Flatten Terra webhook payloads into provider-agnostic metric samples.
//!
//! Each payload kind contributes the metrics it actually carries; missing
//! sections contribute nothing. A payload with no recognized metrics
//! normalizes to an empty vec, not an error.

use chrono::{DateTime, Utc};
use tracing::debug;

use treatment_core::models::wearable::Metric;

use crate::payload::{ActivityData, DailyData, Metadata, SleepData, WebhookPayload};

/// One normalized measurement, not yet attached to an account.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSample {
    pub provider: String,
    pub terra_user_id: String,
    pub metric: Metric,
    pub value: f64,
    pub recorded_at: DateTime<Utc>,
}

/// Normalize one webhook payload. `received_at` anchors samples whose
/// payload carries no usable timestamp.
pub fn normalize(payload: &WebhookPayload, received_at: DateTime<Utc>) -> Vec<NormalizedSample> {
    let Some(user) = &payload.user else {
        debug!(kind = %payload.kind, "payload without user block, nothing to normalize");
        return Vec::new();
    };

    let provider = user
        .provider
        .as_deref()
        .unwrap_or("unknown")
        .to_lowercase();

    let mut out = Vec::new();

    for datum in &payload.data {
        let mut push = |metric: Metric, value: Option<f64>, recorded_at: DateTime<Utc>| {
            if let Some(value) = value {
                out.push(NormalizedSample {
                    provider: provider.clone(),
                    terra_user_id: user.user_id.clone(),
                    metric,
                    value,
                    recorded_at,
                });
            }
        };

        match payload.kind.as_str() {
            "activity" => {
                let Ok(d) = serde_json::from_value::<ActivityData>(datum.clone()) else {
                    continue;
                };
                let at = timestamp_of(&d.metadata, received_at);

                let summary = d.distance_data.as_ref().and_then(|x| x.summary.as_ref());
                push(Metric::Steps, summary.and_then(|s| s.steps), at);
                push(Metric::DistanceMeters, summary.and_then(|s| s.distance_meters), at);
                push(
                    Metric::CaloriesBurned,
                    d.calories_data.as_ref().and_then(|c| c.total_burned_calories),
                    at,
                );

                let hr = d.heart_rate_data.as_ref().and_then(|h| h.summary.as_ref());
                push(Metric::HeartRate, hr.and_then(|h| h.avg_hr_bpm), at);
                push(Metric::RestingHeartRate, hr.and_then(|h| h.resting_hr_bpm), at);
                push(
                    Metric::OxygenSaturation,
                    d.oxygen_data.as_ref().and_then(|o| o.avg_saturation_percentage),
                    at,
                );
            }
            "daily" => {
                let Ok(d) = serde_json::from_value::<DailyData>(datum.clone()) else {
                    continue;
                };
                let at = timestamp_of(&d.metadata, received_at);

                push(
                    Metric::Steps,
                    d.distance_data.as_ref().and_then(|x| x.steps),
                    at,
                );
                push(
                    Metric::DistanceMeters,
                    d.distance_data.as_ref().and_then(|x| x.distance_meters),
                    at,
                );
                push(
                    Metric::CaloriesBurned,
                    d.calories_data.as_ref().and_then(|c| c.total_burned_calories),
                    at,
                );

                let hr = d.heart_rate_data.as_ref().and_then(|h| h.summary.as_ref());
                push(Metric::RestingHeartRate, hr.and_then(|h| h.resting_hr_bpm), at);
                push(
                    Metric::OxygenSaturation,
                    d.oxygen_data.as_ref().and_then(|o| o.avg_saturation_percentage),
                    at,
                );
            }
            "sleep" => {
                let Ok(d) = serde_json::from_value::<SleepData>(datum.clone()) else {
                    continue;
                };
                let at = timestamp_of(&d.metadata, received_at);

                let asleep_minutes = d
                    .sleep_durations_data
                    .as_ref()
                    .and_then(|s| s.asleep.as_ref())
                    .and_then(|a| a.duration_asleep_state_seconds)
                    .map(|secs| secs / 60.0);
                push(Metric::SleepMinutes, asleep_minutes, at);

                let hr = d.heart_rate_data.as_ref().and_then(|h| h.summary.as_ref());
                push(Metric::RestingHeartRate, hr.and_then(|h| h.resting_hr_bpm), at);
                push(
                    Metric::OxygenSaturation,
                    d.oxygen_data.as_ref().and_then(|o| o.avg_saturation_percentage),
                    at,
                );
            }
            other => {
                debug!(kind = other, "unhandled terra payload kind");
            }
        }
    }

    out
}

/// Session end wins; a session with only a start uses that; otherwise the
/// time we received the webhook.
fn timestamp_of(metadata: &Metadata, received_at: DateTime<Utc>) -> DateTime<Utc> {
    metadata.end_time.or(metadata.start_time).unwrap_or(received_at)
}
