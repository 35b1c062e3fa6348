use axum::extract::{Query, State};
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use treatment_core::models::wearable::{Metric, WearableSample};

use crate::error::ApiError;
use crate::middleware::auth::AuthSession;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SamplesQuery {
    pub metric: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub limit: Option<u32>,
}

pub async fn list_samples(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Query(query): Query<SamplesQuery>,
) -> Result<Json<Vec<WearableSample>>, ApiError> {
    let metric = query
        .metric
        .as_deref()
        .map(Metric::parse_str)
        .transpose()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let samples = treatment_db::wearables::list(
        &state.db,
        session.account_id,
        metric,
        query.since,
        query.limit,
    )
    .await?;

    Ok(Json(samples))
}
