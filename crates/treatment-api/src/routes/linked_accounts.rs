use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use treatment_core::models::linked_account::LinkedAccount;
use treatment_core::models::timeline::EventKind;
use treatment_db::linked_accounts;

use crate::error::ApiError;
use crate::middleware::auth::AuthSession;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LinkRequest {
    pub provider: String,
    pub provider_user_id: String,
}

pub async fn list_links(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> Result<Json<Vec<LinkedAccount>>, ApiError> {
    Ok(Json(
        linked_accounts::list(&state.db, session.account_id).await?,
    ))
}

pub async fn create_link(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Json(payload): Json<LinkRequest>,
) -> Result<Json<LinkedAccount>, ApiError> {
    let provider = payload.provider.trim().to_lowercase();
    let provider_user_id = payload.provider_user_id.trim();

    if provider.is_empty() || provider_user_id.is_empty() {
        return Err(ApiError::BadRequest(
            "provider and provider_user_id required".to_string(),
        ));
    }

    let link =
        linked_accounts::insert(&state.db, session.account_id, &provider, provider_user_id)
            .await?;

    if let Err(e) = treatment_db::timeline::append(
        &state.db,
        session.account_id,
        EventKind::WearableConnected,
        &link.provider,
        None,
        Some(link.id),
    )
    .await
    {
        tracing::warn!(error = %e, link_id = %link.id, "timeline append failed");
    }

    Ok(Json(link))
}

pub async fn delete_link(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    linked_accounts::delete(&state.db, session.account_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
