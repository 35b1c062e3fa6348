use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use treatment_core::models::share::{ShareGrant, ShareScope};

use crate::error::{map_insert_err, DbError};

#[derive(sqlx::FromRow)]
struct ShareRow {
    id: Uuid,
    account_id: Uuid,
    grantee_email: String,
    scope: String,
    token_hash: String,
    expires_at: DateTime<Utc>,
    revoked: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<ShareRow> for ShareGrant {
    type Error = DbError;

    fn try_from(r: ShareRow) -> Result<Self, DbError> {
        Ok(ShareGrant {
            id: r.id,
            account_id: r.account_id,
            grantee_email: r.grantee_email,
            scope: ShareScope::parse_str(&r.scope)?,
            token_hash: r.token_hash,
            expires_at: r.expires_at,
            revoked: r.revoked,
            created_at: r.created_at,
        })
    }
}

const COLUMNS: &str =
    "id, account_id, grantee_email, scope, token_hash, expires_at, revoked, created_at";

pub async fn insert(
    pool: &PgPool,
    account_id: Uuid,
    grantee_email: &str,
    scope: ShareScope,
    token_hash: &str,
    ttl_seconds: i64,
) -> Result<ShareGrant, DbError> {
    let row = sqlx::query_as::<_, ShareRow>(&format!(
        "INSERT INTO share_grants (id, account_id, grantee_email, scope, token_hash, expires_at)
         VALUES ($1, $2, $3, $4, $5, NOW() + ($6 || ' seconds')::interval)
         RETURNING {COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(account_id)
    .bind(grantee_email)
    .bind(scope.as_str())
    .bind(token_hash)
    .bind(ttl_seconds)
    .fetch_one(pool)
    .await
    .map_err(|e| map_insert_err(e, "share grant"))?;

    row.try_into()
}

pub async fn list(pool: &PgPool, account_id: Uuid) -> Result<Vec<ShareGrant>, DbError> {
    let rows = sqlx::query_as::<_, ShareRow>(&format!(
        "SELECT {COLUMNS} FROM share_grants WHERE account_id = $1 ORDER BY created_at DESC"
    ))
    .bind(account_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(ShareGrant::try_from).collect()
}

/// Revoke keeps the row so the grant's history stays on the record.
pub async fn revoke(pool: &PgPool, account_id: Uuid, id: Uuid) -> Result<(), DbError> {
    let result =
        sqlx::query("UPDATE share_grants SET revoked = TRUE WHERE id = $1 AND account_id = $2")
            .bind(id)
            .bind(account_id)
            .execute(pool)
            .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    Ok(())
}

/// Resolve a share token digest. Revoked and expired grants resolve to
/// `None`, same as tokens that never existed.
pub async fn resolve(pool: &PgPool, token_hash: &str) -> Result<Option<ShareGrant>, DbError> {
    let row = sqlx::query_as::<_, ShareRow>(&format!(
        "SELECT {COLUMNS} FROM share_grants
         WHERE token_hash = $1 AND NOT revoked AND expires_at > NOW()"
    ))
    .bind(token_hash)
    .fetch_optional(pool)
    .await?;

    row.map(ShareGrant::try_from).transpose()
}
