use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use treatment_search::index::{self, SdcoDocumentInput};
use treatment_search::query::{self, SearchHit};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub sdco: Option<String>,
    pub limit: Option<u32>,
}

pub async fn search_documents(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<SearchHit>>, ApiError> {
    let hits = query::search(
        &state.db,
        &state.openai,
        &params.q,
        params.sdco.as_deref(),
        params.limit,
    )
    .await?;

    Ok(Json(hits))
}

#[derive(Deserialize)]
pub struct IndexRequest {
    pub id: Option<Uuid>,
    pub sdco_code: String,
    pub title: String,
    pub body: String,
}

pub async fn index_document(
    State(state): State<AppState>,
    Json(payload): Json<IndexRequest>,
) -> Result<StatusCode, ApiError> {
    if payload.sdco_code.trim().is_empty() || payload.title.trim().is_empty() {
        return Err(ApiError::BadRequest("sdco_code and title required".to_string()));
    }

    let doc = SdcoDocumentInput {
        id: payload.id.unwrap_or_else(Uuid::new_v4),
        sdco_code: payload.sdco_code,
        title: payload.title,
        body: payload.body,
    };

    index::upsert_document(&state.db, &state.openai, &doc).await?;

    Ok(StatusCode::NO_CONTENT)
}
