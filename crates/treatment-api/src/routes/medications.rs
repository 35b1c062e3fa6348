use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use treatment_core::models::medication::{Medication, MedicationStatus};
use treatment_core::models::timeline::EventKind;
use treatment_db::medications::{self, MedicationInput};

use crate::error::ApiError;
use crate::middleware::auth::AuthSession;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct MedicationRequest {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub status: Option<MedicationStatus>,
    pub prescriber: Option<String>,
    pub started_on: Option<NaiveDate>,
    pub stopped_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl MedicationRequest {
    fn as_input(&self) -> Result<MedicationInput<'_>, ApiError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ApiError::BadRequest("name required".to_string()));
        }

        Ok(MedicationInput {
            name,
            dosage: self.dosage.trim(),
            frequency: self.frequency.trim(),
            status: self.status.unwrap_or(MedicationStatus::Active),
            prescriber: self.prescriber.as_deref(),
            started_on: self.started_on,
            stopped_on: self.stopped_on,
            notes: self.notes.as_deref(),
        })
    }
}

async fn append_event(state: &AppState, medication: &Medication, kind: EventKind) {
    if let Err(e) = treatment_db::timeline::append(
        &state.db,
        medication.account_id,
        kind,
        &medication.name,
        None,
        Some(medication.id),
    )
    .await
    {
        tracing::warn!(error = %e, medication_id = %medication.id, "timeline append failed");
    }
}

pub async fn list_medications(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> Result<Json<Vec<Medication>>, ApiError> {
    Ok(Json(
        medications::list(&state.db, session.account_id).await?,
    ))
}

pub async fn get_medication(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> Result<Json<Medication>, ApiError> {
    Ok(Json(
        medications::get(&state.db, session.account_id, id).await?,
    ))
}

pub async fn create_medication(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Json(payload): Json<MedicationRequest>,
) -> Result<Json<Medication>, ApiError> {
    let medication =
        medications::insert(&state.db, session.account_id, &payload.as_input()?).await?;

    append_event(&state, &medication, EventKind::MedicationStarted).await;

    Ok(Json(medication))
}

pub async fn update_medication(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MedicationRequest>,
) -> Result<Json<Medication>, ApiError> {
    let previous = medications::get(&state.db, session.account_id, id).await?;
    let medication =
        medications::update(&state.db, session.account_id, id, &payload.as_input()?).await?;

    // Only the transition into `stopped` is a timeline moment.
    if previous.status != MedicationStatus::Stopped
        && medication.status == MedicationStatus::Stopped
    {
        append_event(&state, &medication, EventKind::MedicationStopped).await;
    }

    Ok(Json(medication))
}

pub async fn delete_medication(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    medications::delete(&state.db, session.account_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
