//! pgvector-backed similarity search over SDCO-tagged medical documents.
//!
//! Embeddings are passed to Postgres in pgvector's text input syntax and
//! cast with `::vector`; the crate stays a thin pass-through over the
//! `<=>` cosine-distance operator.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbError;

/// An SDCO-tagged document with its similarity to the query embedding.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct DocumentHit {
    pub id: Uuid,
    pub sdco_code: String,
    pub title: String,
    pub body: String,
    pub distance: f64,
}

/// Render an embedding in pgvector input syntax: `[0.1,0.2,...]`.
pub fn vector_literal(embedding: &[f32]) -> String {
    let mut out = String::with_capacity(embedding.len() * 10 + 2);
    out.push('[');
    for (i, v) in embedding.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&v.to_string());
    }
    out.push(']');
    out
}

pub async fn upsert_document(
    pool: &PgPool,
    id: Uuid,
    sdco_code: &str,
    title: &str,
    body: &str,
    embedding: &[f32],
) -> Result<DateTime<Utc>, DbError> {
    if embedding.is_empty() {
        return Err(DbError::EmptyEmbedding);
    }

    let updated_at: DateTime<Utc> = sqlx::query_scalar(
        "INSERT INTO sdco_documents (id, sdco_code, title, body, embedding)
         VALUES ($1, $2, $3, $4, $5::vector)
         ON CONFLICT (id) DO UPDATE
             SET sdco_code = EXCLUDED.sdco_code,
                 title = EXCLUDED.title,
                 body = EXCLUDED.body,
                 embedding = EXCLUDED.embedding,
                 updated_at = NOW()
         RETURNING updated_at",
    )
    .bind(id)
    .bind(sdco_code)
    .bind(title)
    .bind(body)
    .bind(vector_literal(embedding))
    .fetch_one(pool)
    .await?;

    Ok(updated_at)
}

/// Nearest documents by cosine distance, optionally restricted to one SDCO
/// code. Smaller distance means more similar.
pub async fn nearest_documents(
    pool: &PgPool,
    embedding: &[f32],
    sdco_filter: Option<&str>,
    limit: Option<u32>,
) -> Result<Vec<DocumentHit>, DbError> {
    if embedding.is_empty() {
        return Err(DbError::EmptyEmbedding);
    }

    let hits = sqlx::query_as::<_, DocumentHit>(
        "SELECT id, sdco_code, title, body,
                (embedding <=> $1::vector)::float8 AS distance
         FROM sdco_documents
         WHERE ($2::text IS NULL OR sdco_code = $2)
         ORDER BY embedding <=> $1::vector
         LIMIT $3",
    )
    .bind(vector_literal(embedding))
    .bind(sdco_filter)
    .bind(crate::clamp_limit(limit))
    .fetch_all(pool)
    .await?;

    Ok(hits)
}
