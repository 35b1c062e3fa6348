use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

/// A diagnosed or suspected medical condition on an account's record.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Condition {
    pub id: Uuid,
    pub account_id: Uuid,
    pub name: String,
    pub icd10_code: Option<String>,
    pub status: ConditionStatus,
    pub diagnosed_on: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ConditionStatus {
    Active,
    Resolved,
    Suspected,
}

impl ConditionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionStatus::Active => "active",
            ConditionStatus::Resolved => "resolved",
            ConditionStatus::Suspected => "suspected",
        }
    }

    pub fn parse_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "active" => Ok(ConditionStatus::Active),
            "resolved" => Ok(ConditionStatus::Resolved),
            "suspected" => Ok(ConditionStatus::Suspected),
            other => Err(CoreError::InvalidValue {
                field: "condition.status",
                value: other.to_string(),
            }),
        }
    }
}
