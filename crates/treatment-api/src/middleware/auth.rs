use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

use crate::auth::{bearer_token, hash_token};
use crate::error::ApiError;
use crate::state::AppState;

/// Session validation middleware.
///
/// Extracts the `Authorization: Bearer <token>` header, hashes the token
/// and looks the digest up in `user_sessions`. On success, inserts
/// `AuthSession` into request extensions for handlers to use. The token is
/// opaque: there is nothing to verify cryptographically, only the lookup
/// and its expiry.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())?;
    let token_hash = hash_token(&token);

    let account_id = treatment_db::sessions::lookup_account(&state.db, &token_hash)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("invalid or expired session".to_string()))?;

    req.extensions_mut().insert(AuthSession {
        account_id,
        token_hash,
    });

    Ok(next.run(req).await)
}

/// Authenticated session extracted from the sessions table.
#[derive(Clone, Debug)]
pub struct AuthSession {
    pub account_id: Uuid,
    /// Kept so logout can delete exactly this session row.
    pub token_hash: String,
}
