use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use treatment_core::models::session::Session;

use crate::error::DbError;

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: Uuid,
    account_id: Uuid,
    token_hash: String,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl From<SessionRow> for Session {
    fn from(r: SessionRow) -> Self {
        Session {
            id: r.id,
            account_id: r.account_id,
            token_hash: r.token_hash,
            expires_at: r.expires_at,
            created_at: r.created_at,
        }
    }
}

/// Insert a session row for `account_id`, expiring `ttl_seconds` from now.
pub async fn create(
    pool: &PgPool,
    account_id: Uuid,
    token_hash: &str,
    ttl_seconds: i64,
) -> Result<Session, DbError> {
    let row = sqlx::query_as::<_, SessionRow>(
        "INSERT INTO user_sessions (id, account_id, token_hash, expires_at)
         VALUES ($1, $2, $3, NOW() + ($4 || ' seconds')::interval)
         RETURNING id, account_id, token_hash, expires_at, created_at",
    )
    .bind(Uuid::new_v4())
    .bind(account_id)
    .bind(token_hash)
    .bind(ttl_seconds)
    .fetch_one(pool)
    .await?;

    Ok(row.into())
}

/// Resolve a token digest to its account. Expired sessions resolve to
/// `None`, indistinguishable from tokens that never existed.
pub async fn lookup_account(pool: &PgPool, token_hash: &str) -> Result<Option<Uuid>, DbError> {
    let account_id = sqlx::query_scalar::<_, Uuid>(
        "SELECT account_id FROM user_sessions
         WHERE token_hash = $1 AND expires_at > NOW()",
    )
    .bind(token_hash)
    .fetch_optional(pool)
    .await?;

    Ok(account_id)
}

/// Expiry of a live session, for the validate endpoint.
pub async fn expiry(pool: &PgPool, token_hash: &str) -> Result<Option<DateTime<Utc>>, DbError> {
    let expires_at = sqlx::query_scalar::<_, DateTime<Utc>>(
        "SELECT expires_at FROM user_sessions
         WHERE token_hash = $1 AND expires_at > NOW()",
    )
    .bind(token_hash)
    .fetch_optional(pool)
    .await?;

    Ok(expires_at)
}

pub async fn delete(pool: &PgPool, token_hash: &str) -> Result<(), DbError> {
    sqlx::query("DELETE FROM user_sessions WHERE token_hash = $1")
        .bind(token_hash)
        .execute(pool)
        .await?;

    Ok(())
}

/// Remove expired rows. Called opportunistically at login.
pub async fn purge_expired(pool: &PgPool) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM user_sessions WHERE expires_at <= NOW()")
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
