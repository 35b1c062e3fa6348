use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use treatment_core::models::account::Account;

use crate::auth::{generate_token, hash_token, verify_password};
use crate::error::ApiError;
use crate::middleware::auth::AuthSession;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let email = payload.email.trim().to_lowercase();

    let (account, password_hash) = treatment_db::accounts::fetch_credentials(&state.db, &email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("invalid credentials".to_string()))?;

    verify_password(&password_hash, &payload.password)?;

    // Opportunistic cleanup; a failure here must not block the login.
    if let Err(e) = treatment_db::sessions::purge_expired(&state.db).await {
        tracing::warn!(error = %e, "expired session purge failed");
    }

    let token = generate_token();
    let session = treatment_db::sessions::create(
        &state.db,
        account.id,
        &hash_token(&token),
        state.session_ttl_seconds,
    )
    .await?;

    Ok(Json(TokenResponse {
        token,
        token_type: "bearer",
        expires_at: session.expires_at,
    }))
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> Result<StatusCode, ApiError> {
    treatment_db::sessions::delete(&state.db, &session.token_hash).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub account: Account,
    pub expires_at: DateTime<Utc>,
}

/// The session/account validation endpoint: who am I, and until when.
pub async fn validate(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> Result<Json<ValidateResponse>, ApiError> {
    let account = treatment_db::accounts::fetch(&state.db, session.account_id).await?;

    let expires_at = treatment_db::sessions::expiry(&state.db, &session.token_hash)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("invalid or expired session".to_string()))?;

    Ok(Json(ValidateResponse {
        account,
        expires_at,
    }))
}
