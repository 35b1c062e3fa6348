use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A server-side session row backing bearer-token authentication.
///
/// The token string itself is returned to the client exactly once at login;
/// only its SHA-256 digest is persisted. Validation is a database lookup
/// against the digest with an expiry check, nothing more.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub account_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
