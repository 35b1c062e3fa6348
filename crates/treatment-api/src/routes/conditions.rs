use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use treatment_core::models::condition::{Condition, ConditionStatus};
use treatment_core::models::timeline::EventKind;
use treatment_db::conditions::{self, ConditionInput};

use crate::error::ApiError;
use crate::middleware::auth::AuthSession;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ConditionRequest {
    pub name: String,
    pub icd10_code: Option<String>,
    pub status: Option<ConditionStatus>,
    pub diagnosed_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl ConditionRequest {
    fn as_input(&self) -> Result<ConditionInput<'_>, ApiError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ApiError::BadRequest("name required".to_string()));
        }

        Ok(ConditionInput {
            name,
            icd10_code: self.icd10_code.as_deref(),
            status: self.status.unwrap_or(ConditionStatus::Active),
            diagnosed_on: self.diagnosed_on,
            notes: self.notes.as_deref(),
        })
    }
}

pub async fn list_conditions(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> Result<Json<Vec<Condition>>, ApiError> {
    Ok(Json(conditions::list(&state.db, session.account_id).await?))
}

pub async fn get_condition(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> Result<Json<Condition>, ApiError> {
    Ok(Json(
        conditions::get(&state.db, session.account_id, id).await?,
    ))
}

pub async fn create_condition(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Json(payload): Json<ConditionRequest>,
) -> Result<Json<Condition>, ApiError> {
    let condition =
        conditions::insert(&state.db, session.account_id, &payload.as_input()?).await?;

    if let Err(e) = treatment_db::timeline::append(
        &state.db,
        session.account_id,
        EventKind::ConditionAdded,
        &condition.name,
        None,
        Some(condition.id),
    )
    .await
    {
        tracing::warn!(error = %e, condition_id = %condition.id, "timeline append failed");
    }

    Ok(Json(condition))
}

pub async fn update_condition(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ConditionRequest>,
) -> Result<Json<Condition>, ApiError> {
    let condition =
        conditions::update(&state.db, session.account_id, id, &payload.as_input()?).await?;

    Ok(Json(condition))
}

pub async fn delete_condition(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    conditions::delete(&state.db, session.account_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
