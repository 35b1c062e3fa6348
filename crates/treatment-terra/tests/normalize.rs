use chrono::{TimeZone, Utc};
use serde_json::json;

use treatment_core::models::wearable::Metric;
use treatment_terra::normalize::normalize;
use treatment_terra::payload::WebhookPayload;

fn received_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 8, 0, 0).unwrap()
}

fn parse(value: serde_json::Value) -> WebhookPayload {
    serde_json::from_value(value).unwrap()
}

#[test]
fn activity_payload_yields_session_metrics() {
    let payload = parse(json!({
        "type": "activity",
        "user": { "user_id": "terra-u1", "provider": "OURA" },
        "data": [{
            "metadata": {
                "start_time": "2025-06-01T06:00:00Z",
                "end_time": "2025-06-01T07:00:00Z"
            },
            "distance_data": { "summary": { "steps": 4200.0, "distance_meters": 3100.0 } },
            "calories_data": { "total_burned_calories": 350.0 },
            "heart_rate_data": { "summary": { "avg_hr_bpm": 132.0, "resting_hr_bpm": 58.0 } }
        }]
    }));

    let samples = normalize(&payload, received_at());

    assert_eq!(samples.len(), 5);
    assert!(samples.iter().all(|s| s.provider == "oura"));
    assert!(samples.iter().all(|s| s.terra_user_id == "terra-u1"));
    // Session end wins as the recorded timestamp.
    let end = Utc.with_ymd_and_hms(2025, 6, 1, 7, 0, 0).unwrap();
    assert!(samples.iter().all(|s| s.recorded_at == end));

    let steps = samples.iter().find(|s| s.metric == Metric::Steps).unwrap();
    assert_eq!(steps.value, 4200.0);
}

#[test]
fn sleep_duration_is_converted_to_minutes() {
    let payload = parse(json!({
        "type": "sleep",
        "user": { "user_id": "terra-u1", "provider": "FITBIT" },
        "data": [{
            "sleep_durations_data": {
                "asleep": { "duration_asleep_state_seconds": 27000.0 }
            }
        }]
    }));

    let samples = normalize(&payload, received_at());

    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].metric, Metric::SleepMinutes);
    assert_eq!(samples[0].value, 450.0);
    // No metadata: falls back to the receive time.
    assert_eq!(samples[0].recorded_at, received_at());
}

#[test]
fn daily_payload_reads_flat_distance_fields() {
    let payload = parse(json!({
        "type": "daily",
        "user": { "user_id": "terra-u2", "provider": "GOOGLE" },
        "data": [{
            "metadata": { "start_time": "2025-06-01T00:00:00Z" },
            "distance_data": { "steps": 9800.0, "distance_meters": 7200.0 },
            "oxygen_data": { "avg_saturation_percentage": 97.5 }
        }]
    }));

    let samples = normalize(&payload, received_at());

    let metrics: Vec<Metric> = samples.iter().map(|s| s.metric).collect();
    assert!(metrics.contains(&Metric::Steps));
    assert!(metrics.contains(&Metric::DistanceMeters));
    assert!(metrics.contains(&Metric::OxygenSaturation));
}

#[test]
fn missing_sections_contribute_no_samples() {
    let payload = parse(json!({
        "type": "activity",
        "user": { "user_id": "terra-u1", "provider": "OURA" },
        "data": [{ "metadata": {} }]
    }));

    assert!(normalize(&payload, received_at()).is_empty());
}

#[test]
fn unknown_kind_normalizes_to_empty() {
    let payload = parse(json!({
        "type": "menstruation",
        "user": { "user_id": "terra-u1", "provider": "OURA" },
        "data": [{ "anything": true }]
    }));

    assert!(normalize(&payload, received_at()).is_empty());
}

#[test]
fn payload_without_user_normalizes_to_empty() {
    let payload = parse(json!({ "type": "activity", "data": [] }));

    assert!(normalize(&payload, received_at()).is_empty());
}

#[test]
fn unknown_fields_are_tolerated() {
    let payload = parse(json!({
        "type": "daily",
        "user": { "user_id": "terra-u1", "provider": "OURA", "reference_id": "x" },
        "data": [{
            "distance_data": { "steps": 100.0, "swimming_strokes": 12 },
            "brand_new_section": { "value": 1 }
        }]
    }));

    let samples = normalize(&payload, received_at());
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].metric, Metric::Steps);
}
