use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

/// An uploaded health document (lab report, referral letter, scan).
///
/// Text extraction runs inline at upload time; `extraction_status` records
/// whether it succeeded so a failed extraction stays visible on the record
/// rather than silently dropping the document.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HealthDocument {
    pub id: Uuid,
    pub account_id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub byte_len: i64,
    pub extraction_status: ExtractionStatus,
    pub extracted_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ExtractionStatus {
    Pending,
    Complete,
    Failed,
}

impl ExtractionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionStatus::Pending => "pending",
            ExtractionStatus::Complete => "complete",
            ExtractionStatus::Failed => "failed",
        }
    }

    pub fn parse_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(ExtractionStatus::Pending),
            "complete" => Ok(ExtractionStatus::Complete),
            "failed" => Ok(ExtractionStatus::Failed),
            other => Err(CoreError::InvalidValue {
                field: "document.extraction_status",
                value: other.to_string(),
            }),
        }
    }
}
