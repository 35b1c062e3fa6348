use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

/// A prescribed or self-reported medication on an account's record.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Medication {
    pub id: Uuid,
    pub account_id: Uuid,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub status: MedicationStatus,
    pub prescriber: Option<String>,
    pub started_on: Option<NaiveDate>,
    pub stopped_on: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MedicationStatus {
    Active,
    Paused,
    Stopped,
}

impl MedicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MedicationStatus::Active => "active",
            MedicationStatus::Paused => "paused",
            MedicationStatus::Stopped => "stopped",
        }
    }

    pub fn parse_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "active" => Ok(MedicationStatus::Active),
            "paused" => Ok(MedicationStatus::Paused),
            "stopped" => Ok(MedicationStatus::Stopped),
            other => Err(CoreError::InvalidValue {
                field: "medication.status",
                value: other.to_string(),
            }),
        }
    }
}
