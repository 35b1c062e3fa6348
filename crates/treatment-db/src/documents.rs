use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use treatment_core::models::document::{ExtractionStatus, HealthDocument};

use crate::error::DbError;

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: Uuid,
    account_id: Uuid,
    filename: String,
    content_type: String,
    byte_len: i64,
    extraction_status: String,
    extracted_text: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<DocumentRow> for HealthDocument {
    type Error = DbError;

    fn try_from(r: DocumentRow) -> Result<Self, DbError> {
        Ok(HealthDocument {
            id: r.id,
            account_id: r.account_id,
            filename: r.filename,
            content_type: r.content_type,
            byte_len: r.byte_len,
            extraction_status: ExtractionStatus::parse_str(&r.extraction_status)?,
            extracted_text: r.extracted_text,
            created_at: r.created_at,
        })
    }
}

const COLUMNS: &str = "id, account_id, filename, content_type, byte_len, \
                       extraction_status, extracted_text, created_at";

/// Insert the document row before extraction runs, so a crashed extraction
/// leaves a visible `pending` row rather than losing the upload.
pub async fn insert_pending(
    pool: &PgPool,
    account_id: Uuid,
    filename: &str,
    content_type: &str,
    byte_len: i64,
) -> Result<HealthDocument, DbError> {
    let row = sqlx::query_as::<_, DocumentRow>(&format!(
        "INSERT INTO health_documents
             (id, account_id, filename, content_type, byte_len, extraction_status)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(account_id)
    .bind(filename)
    .bind(content_type)
    .bind(byte_len)
    .bind(ExtractionStatus::Pending.as_str())
    .fetch_one(pool)
    .await?;

    row.try_into()
}

pub async fn set_extraction(
    pool: &PgPool,
    id: Uuid,
    status: ExtractionStatus,
    text: Option<&str>,
) -> Result<(), DbError> {
    sqlx::query(
        "UPDATE health_documents SET extraction_status = $1, extracted_text = $2 WHERE id = $3",
    )
    .bind(status.as_str())
    .bind(text)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Listing omits the extracted text; it can run to hundreds of kilobytes
/// per document and the list view never shows it.
pub async fn list(pool: &PgPool, account_id: Uuid) -> Result<Vec<HealthDocument>, DbError> {
    let rows = sqlx::query_as::<_, DocumentRow>(
        "SELECT id, account_id, filename, content_type, byte_len,
                extraction_status, NULL AS extracted_text, created_at
         FROM health_documents WHERE account_id = $1 ORDER BY created_at DESC",
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(HealthDocument::try_from).collect()
}

pub async fn get(pool: &PgPool, account_id: Uuid, id: Uuid) -> Result<HealthDocument, DbError> {
    let row = sqlx::query_as::<_, DocumentRow>(&format!(
        "SELECT {COLUMNS} FROM health_documents WHERE id = $1 AND account_id = $2"
    ))
    .bind(id)
    .bind(account_id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    row.try_into()
}

pub async fn delete(pool: &PgPool, account_id: Uuid, id: Uuid) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM health_documents WHERE id = $1 AND account_id = $2")
        .bind(id)
        .bind(account_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    Ok(())
}
