use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

/// A connection to an external data provider (wearable aggregator, EHR).
///
/// `provider_user_id` is the provider's identifier for this account. For
/// Terra it is the `user.user_id` field carried on every webhook payload,
/// and is how inbound samples are routed back to the owning account.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LinkedAccount {
    pub id: Uuid,
    pub account_id: Uuid,
    pub provider: String,
    pub provider_user_id: String,
    pub status: LinkStatus,
    pub connected_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum LinkStatus {
    Connected,
    Revoked,
    Error,
}

impl LinkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkStatus::Connected => "connected",
            LinkStatus::Revoked => "revoked",
            LinkStatus::Error => "error",
        }
    }

    pub fn parse_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "connected" => Ok(LinkStatus::Connected),
            "revoked" => Ok(LinkStatus::Revoked),
            "error" => Ok(LinkStatus::Error),
            other => Err(CoreError::InvalidValue {
                field: "linked_account.status",
                value: other.to_string(),
            }),
        }
    }
}
