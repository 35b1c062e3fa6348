use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

/// A grant giving a third party scoped read access to an account's record.
///
/// Resolution works like session auth: the share token is an opaque string
/// whose SHA-256 digest is stored, looked up with an expiry check.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ShareGrant {
    pub id: Uuid,
    pub account_id: Uuid,
    pub grantee_email: String,
    pub scope: ShareScope,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ShareScope {
    ReadAll,
    ConditionsOnly,
    MedicationsOnly,
}

impl ShareScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShareScope::ReadAll => "read_all",
            ShareScope::ConditionsOnly => "conditions_only",
            ShareScope::MedicationsOnly => "medications_only",
        }
    }

    pub fn parse_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "read_all" => Ok(ShareScope::ReadAll),
            "conditions_only" => Ok(ShareScope::ConditionsOnly),
            "medications_only" => Ok(ShareScope::MedicationsOnly),
            other => Err(CoreError::InvalidValue {
                field: "share.scope",
                value: other.to_string(),
            }),
        }
    }
}
