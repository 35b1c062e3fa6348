use axum::extract::{Query, State};
use axum::{Extension, Json};
use serde::Deserialize;

use treatment_core::models::timeline::{merge_events, EventKind, TimelineEvent};

use crate::error::ApiError;
use crate::middleware::auth::AuthSession;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct TimelineQuery {
    pub kind: Option<String>,
    pub limit: Option<u32>,
}

pub async fn list_timeline(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Query(query): Query<TimelineQuery>,
) -> Result<Json<Vec<TimelineEvent>>, ApiError> {
    let kind = query
        .kind
        .as_deref()
        .map(EventKind::parse_str)
        .transpose()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let events =
        treatment_db::timeline::list(&state.db, session.account_id, kind, query.limit).await?;

    Ok(Json(merge_events(events)))
}
