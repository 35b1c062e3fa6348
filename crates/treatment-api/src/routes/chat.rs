use axum::extract::State;
use axum::{Extension, Json};
use serde::Deserialize;

use treatment_core::models::timeline::EventKind;
use treatment_merlin::fallback::{differential_with_fallback, Differential};
use treatment_openai::context::build_profile_block;

use crate::error::ApiError;
use crate::middleware::auth::AuthSession;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct DiagnoseRequest {
    pub symptoms: String,
}

/// Diagnostic chat helper: symptoms in, a ranked differential out.
///
/// The caller's conditions and medications are loaded and injected as
/// context so the diagnosis accounts for the record. The response reports
/// which backend produced it.
pub async fn diagnose(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Json(payload): Json<DiagnoseRequest>,
) -> Result<Json<Differential>, ApiError> {
    let symptoms = payload.symptoms.trim();
    if symptoms.is_empty() {
        return Err(ApiError::BadRequest("symptoms required".to_string()));
    }

    let conditions = treatment_db::conditions::list(&state.db, session.account_id).await?;
    let medications = treatment_db::medications::list(&state.db, session.account_id).await?;
    let profile_block = build_profile_block(&conditions, &medications);

    let differential =
        differential_with_fallback(&state.merlin, &state.openai, symptoms, &profile_block).await?;

    if let Err(e) = treatment_db::timeline::append(
        &state.db,
        session.account_id,
        EventKind::Chat,
        "Diagnostic chat",
        Some(symptoms),
        None,
    )
    .await
    {
        tracing::warn!(error = %e, "timeline append failed");
    }

    Ok(Json(differential))
}
