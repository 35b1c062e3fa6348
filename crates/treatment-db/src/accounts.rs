use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use treatment_core::models::account::Account;

use crate::error::{map_insert_err, DbError};

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    display_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AccountRow> for Account {
    fn from(r: AccountRow) -> Self {
        Account {
            id: r.id,
            email: r.email,
            display_name: r.display_name,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

pub async fn insert(
    pool: &PgPool,
    email: &str,
    display_name: &str,
    password_hash: &str,
) -> Result<Account, DbError> {
    let row = sqlx::query_as::<_, AccountRow>(
        "INSERT INTO accounts (id, email, display_name, password_hash)
         VALUES ($1, $2, $3, $4)
         RETURNING id, email, display_name, created_at, updated_at",
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(display_name)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| map_insert_err(e, "account"))?;

    Ok(row.into())
}

pub async fn fetch(pool: &PgPool, id: Uuid) -> Result<Account, DbError> {
    let row = sqlx::query_as::<_, AccountRow>(
        "SELECT id, email, display_name, created_at, updated_at
         FROM accounts WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    Ok(row.into())
}

/// Account plus stored password hash, for login verification.
pub async fn fetch_credentials(
    pool: &PgPool,
    email: &str,
) -> Result<Option<(Account, String)>, DbError> {
    #[derive(sqlx::FromRow)]
    struct CredentialRow {
        id: Uuid,
        email: String,
        display_name: String,
        password_hash: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    }

    let row = sqlx::query_as::<_, CredentialRow>(
        "SELECT id, email, display_name, password_hash, created_at, updated_at
         FROM accounts WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| {
        (
            Account {
                id: r.id,
                email: r.email,
                display_name: r.display_name,
                created_at: r.created_at,
                updated_at: r.updated_at,
            },
            r.password_hash,
        )
    }))
}
