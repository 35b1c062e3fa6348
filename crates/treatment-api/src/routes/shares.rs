use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use treatment_core::models::condition::Condition;
use treatment_core::models::medication::Medication;
use treatment_core::models::share::{ShareGrant, ShareScope};
use treatment_core::models::timeline::EventKind;
use treatment_db::shares;

use crate::auth::{generate_token, hash_token};
use crate::error::ApiError;
use crate::middleware::auth::AuthSession;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ShareRequest {
    pub grantee_email: String,
    pub scope: ShareScope,
    pub ttl_seconds: Option<i64>,
}

#[derive(Serialize)]
pub struct ShareResponse {
    pub share: ShareGrant,
    /// Returned exactly once; only its digest is stored.
    pub token: String,
}

pub async fn list_shares(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> Result<Json<Vec<ShareGrant>>, ApiError> {
    Ok(Json(shares::list(&state.db, session.account_id).await?))
}

pub async fn create_share(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Json(payload): Json<ShareRequest>,
) -> Result<Json<ShareResponse>, ApiError> {
    let grantee_email = payload.grantee_email.trim().to_lowercase();
    if !grantee_email.contains('@') {
        return Err(ApiError::BadRequest("valid grantee_email required".to_string()));
    }

    let ttl_seconds = match payload.ttl_seconds {
        Some(ttl) if ttl <= 0 => {
            return Err(ApiError::BadRequest("ttl_seconds must be positive".to_string()))
        }
        Some(ttl) => ttl,
        None => state.share_ttl_seconds,
    };

    let token = generate_token();
    let share = shares::insert(
        &state.db,
        session.account_id,
        &grantee_email,
        payload.scope,
        &hash_token(&token),
        ttl_seconds,
    )
    .await?;

    if let Err(e) = treatment_db::timeline::append(
        &state.db,
        session.account_id,
        EventKind::ShareCreated,
        &share.grantee_email,
        None,
        Some(share.id),
    )
    .await
    {
        tracing::warn!(error = %e, share_id = %share.id, "timeline append failed");
    }

    Ok(Json(ShareResponse { share, token }))
}

pub async fn revoke_share(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    shares::revoke(&state.db, session.account_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The scoped subset of a record visible through one share token.
#[derive(Serialize)]
pub struct SharedRecord {
    pub display_name: String,
    pub scope: ShareScope,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medications: Option<Vec<Medication>>,
}

/// Public resolution endpoint: a share token in, the scoped record out.
/// Revoked and expired tokens are indistinguishable from unknown ones.
pub async fn resolve_shared(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<SharedRecord>, ApiError> {
    let share = shares::resolve(&state.db, &hash_token(&token))
        .await?
        .ok_or_else(|| ApiError::NotFound("share not found".to_string()))?;

    let account = treatment_db::accounts::fetch(&state.db, share.account_id).await?;

    let conditions = match share.scope {
        ShareScope::ReadAll | ShareScope::ConditionsOnly => {
            Some(treatment_db::conditions::list(&state.db, share.account_id).await?)
        }
        ShareScope::MedicationsOnly => None,
    };

    let medications = match share.scope {
        ShareScope::ReadAll | ShareScope::MedicationsOnly => {
            Some(treatment_db::medications::list(&state.db, share.account_id).await?)
        }
        ShareScope::ConditionsOnly => None,
    };

    Ok(Json(SharedRecord {
        display_name: account.display_name,
        scope: share.scope,
        conditions,
        medications,
    }))
}
