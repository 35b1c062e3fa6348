use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use treatment_core::models::account::Account;

use crate::auth::{generate_token, hash_password, hash_token};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub display_name: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub account: Account,
    /// Returned exactly once; only its digest is stored.
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let email = payload.email.trim().to_lowercase();
    let display_name = payload.display_name.trim();

    if !email.contains('@') {
        return Err(ApiError::BadRequest("valid email required".to_string()));
    }
    if display_name.is_empty() {
        return Err(ApiError::BadRequest("display_name required".to_string()));
    }
    if payload.password.len() < 8 {
        return Err(ApiError::BadRequest(
            "password must be at least 8 characters".to_string(),
        ));
    }

    let password_hash = hash_password(&payload.password)?;
    let account =
        treatment_db::accounts::insert(&state.db, &email, display_name, &password_hash).await?;

    let token = generate_token();
    let session = treatment_db::sessions::create(
        &state.db,
        account.id,
        &hash_token(&token),
        state.session_ttl_seconds,
    )
    .await?;

    tracing::info!(account_id = %account.id, "account registered");

    Ok(Json(RegisterResponse {
        account,
        token,
        expires_at: session.expires_at,
    }))
}
