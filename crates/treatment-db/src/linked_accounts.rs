use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use treatment_core::models::linked_account::{LinkStatus, LinkedAccount};

use crate::error::{map_insert_err, DbError};

#[derive(sqlx::FromRow)]
struct LinkedAccountRow {
    id: Uuid,
    account_id: Uuid,
    provider: String,
    provider_user_id: String,
    status: String,
    connected_at: DateTime<Utc>,
}

impl TryFrom<LinkedAccountRow> for LinkedAccount {
    type Error = DbError;

    fn try_from(r: LinkedAccountRow) -> Result<Self, DbError> {
        Ok(LinkedAccount {
            id: r.id,
            account_id: r.account_id,
            provider: r.provider,
            provider_user_id: r.provider_user_id,
            status: LinkStatus::parse_str(&r.status)?,
            connected_at: r.connected_at,
        })
    }
}

const COLUMNS: &str = "id, account_id, provider, provider_user_id, status, connected_at";

pub async fn list(pool: &PgPool, account_id: Uuid) -> Result<Vec<LinkedAccount>, DbError> {
    let rows = sqlx::query_as::<_, LinkedAccountRow>(&format!(
        "SELECT {COLUMNS} FROM linked_accounts WHERE account_id = $1 ORDER BY connected_at DESC"
    ))
    .bind(account_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(LinkedAccount::try_from).collect()
}

pub async fn insert(
    pool: &PgPool,
    account_id: Uuid,
    provider: &str,
    provider_user_id: &str,
) -> Result<LinkedAccount, DbError> {
    let row = sqlx::query_as::<_, LinkedAccountRow>(&format!(
        "INSERT INTO linked_accounts (id, account_id, provider, provider_user_id, status)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(account_id)
    .bind(provider)
    .bind(provider_user_id)
    .bind(LinkStatus::Connected.as_str())
    .fetch_one(pool)
    .await
    .map_err(|e| map_insert_err(e, "linked account"))?;

    row.try_into()
}

pub async fn delete(pool: &PgPool, account_id: Uuid, id: Uuid) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM linked_accounts WHERE id = $1 AND account_id = $2")
        .bind(id)
        .bind(account_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    Ok(())
}

/// Flip a link's status from the provider side (e.g. a deauth webhook).
/// Returns whether a row changed.
pub async fn set_status_by_provider_user(
    pool: &PgPool,
    provider: &str,
    provider_user_id: &str,
    status: LinkStatus,
) -> Result<bool, DbError> {
    let result = sqlx::query(
        "UPDATE linked_accounts SET status = $1 WHERE provider = $2 AND provider_user_id = $3",
    )
    .bind(status.as_str())
    .bind(provider)
    .bind(provider_user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Resolve an inbound webhook's provider user id to the owning link, if any.
pub async fn find_by_provider_user(
    pool: &PgPool,
    provider: &str,
    provider_user_id: &str,
) -> Result<Option<LinkedAccount>, DbError> {
    let row = sqlx::query_as::<_, LinkedAccountRow>(&format!(
        "SELECT {COLUMNS} FROM linked_accounts
         WHERE provider = $1 AND provider_user_id = $2 AND status = 'connected'"
    ))
    .bind(provider)
    .bind(provider_user_id)
    .fetch_optional(pool)
    .await?;

    row.map(LinkedAccount::try_from).transpose()
}
