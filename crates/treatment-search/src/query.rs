use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use treatment_openai::client::OpenAiClient;
use treatment_openai::embeddings;

use crate::error::SearchError;

/// A search result with cosine similarity in `0.0..=1.0` (higher is
/// closer).
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub id: Uuid,
    pub sdco_code: String,
    pub title: String,
    pub body: String,
    pub similarity: f64,
}

/// Embed the query text and return the nearest documents, optionally
/// restricted to one SDCO code.
pub async fn search(
    pool: &PgPool,
    openai: &OpenAiClient,
    query_text: &str,
    sdco_filter: Option<&str>,
    limit: Option<u32>,
) -> Result<Vec<SearchHit>, SearchError> {
    if query_text.trim().is_empty() {
        return Err(SearchError::EmptyQuery);
    }

    let embedding = embeddings::embed(openai, query_text).await?;

    let hits = treatment_db::vector::nearest_documents(pool, &embedding, sdco_filter, limit).await?;

    Ok(hits
        .into_iter()
        .map(|h| SearchHit {
            id: h.id,
            sdco_code: h.sdco_code,
            title: h.title,
            body: h.body,
            similarity: 1.0 - h.distance,
        })
        .collect())
}
