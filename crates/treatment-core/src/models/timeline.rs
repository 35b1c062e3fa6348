use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

/// A single event on an account's health timeline.
///
/// Events are appended by the CRUD handlers as a side effect of record
/// mutations (a condition added, a medication stopped, a document uploaded)
/// and read back as one merged, newest-first stream.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TimelineEvent {
    pub id: Uuid,
    pub account_id: Uuid,
    pub kind: EventKind,
    pub occurred_at: DateTime<Utc>,
    pub title: String,
    pub detail: Option<String>,
    /// Id of the record this event was derived from, when there is one.
    pub source_id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum EventKind {
    ConditionAdded,
    MedicationStarted,
    MedicationStopped,
    DocumentUploaded,
    WearableConnected,
    Chat,
    ShareCreated,
    Custom,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::ConditionAdded => "condition_added",
            EventKind::MedicationStarted => "medication_started",
            EventKind::MedicationStopped => "medication_stopped",
            EventKind::DocumentUploaded => "document_uploaded",
            EventKind::WearableConnected => "wearable_connected",
            EventKind::Chat => "chat",
            EventKind::ShareCreated => "share_created",
            EventKind::Custom => "custom",
        }
    }

    pub fn parse_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "condition_added" => Ok(EventKind::ConditionAdded),
            "medication_started" => Ok(EventKind::MedicationStarted),
            "medication_stopped" => Ok(EventKind::MedicationStopped),
            "document_uploaded" => Ok(EventKind::DocumentUploaded),
            "wearable_connected" => Ok(EventKind::WearableConnected),
            "chat" => Ok(EventKind::Chat),
            "share_created" => Ok(EventKind::ShareCreated),
            "custom" => Ok(EventKind::Custom),
            other => Err(CoreError::InvalidValue {
                field: "timeline.kind",
                value: other.to_string(),
            }),
        }
    }
}

/// Merge timeline events into a single deterministic stream.
///
/// Events sharing `(kind, source_id)` are collapsed to the most recent one,
/// so repeated mutations of the same record (a medication edited twice)
/// show up once. Output is newest-first; ties on `occurred_at` break on id
/// so the ordering is total for any input permutation.
pub fn merge_events(mut events: Vec<TimelineEvent>) -> Vec<TimelineEvent> {
    events.sort_by(|a, b| {
        b.occurred_at
            .cmp(&a.occurred_at)
            .then_with(|| b.id.cmp(&a.id))
    });

    let mut seen = std::collections::HashSet::new();
    events.retain(|e| match e.source_id {
        Some(source_id) => seen.insert((e.kind, source_id)),
        None => true,
    });

    events
}
