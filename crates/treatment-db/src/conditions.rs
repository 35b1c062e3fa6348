use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use treatment_core::models::condition::{Condition, ConditionStatus};

use crate::error::DbError;

#[derive(sqlx::FromRow)]
struct ConditionRow {
    id: Uuid,
    account_id: Uuid,
    name: String,
    icd10_code: Option<String>,
    status: String,
    diagnosed_on: Option<NaiveDate>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ConditionRow> for Condition {
    type Error = DbError;

    fn try_from(r: ConditionRow) -> Result<Self, DbError> {
        Ok(Condition {
            id: r.id,
            account_id: r.account_id,
            name: r.name,
            icd10_code: r.icd10_code,
            status: ConditionStatus::parse_str(&r.status)?,
            diagnosed_on: r.diagnosed_on,
            notes: r.notes,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

pub struct ConditionInput<'a> {
    pub name: &'a str,
    pub icd10_code: Option<&'a str>,
    pub status: ConditionStatus,
    pub diagnosed_on: Option<NaiveDate>,
    pub notes: Option<&'a str>,
}

const COLUMNS: &str =
    "id, account_id, name, icd10_code, status, diagnosed_on, notes, created_at, updated_at";

pub async fn list(pool: &PgPool, account_id: Uuid) -> Result<Vec<Condition>, DbError> {
    let rows = sqlx::query_as::<_, ConditionRow>(&format!(
        "SELECT {COLUMNS} FROM conditions WHERE account_id = $1 ORDER BY created_at DESC"
    ))
    .bind(account_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(Condition::try_from).collect()
}

pub async fn get(pool: &PgPool, account_id: Uuid, id: Uuid) -> Result<Condition, DbError> {
    let row = sqlx::query_as::<_, ConditionRow>(&format!(
        "SELECT {COLUMNS} FROM conditions WHERE id = $1 AND account_id = $2"
    ))
    .bind(id)
    .bind(account_id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    row.try_into()
}

pub async fn insert(
    pool: &PgPool,
    account_id: Uuid,
    input: &ConditionInput<'_>,
) -> Result<Condition, DbError> {
    let row = sqlx::query_as::<_, ConditionRow>(&format!(
        "INSERT INTO conditions (id, account_id, name, icd10_code, status, diagnosed_on, notes)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING {COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(account_id)
    .bind(input.name)
    .bind(input.icd10_code)
    .bind(input.status.as_str())
    .bind(input.diagnosed_on)
    .bind(input.notes)
    .fetch_one(pool)
    .await?;

    row.try_into()
}

pub async fn update(
    pool: &PgPool,
    account_id: Uuid,
    id: Uuid,
    input: &ConditionInput<'_>,
) -> Result<Condition, DbError> {
    let row = sqlx::query_as::<_, ConditionRow>(&format!(
        "UPDATE conditions
         SET name = $1, icd10_code = $2, status = $3, diagnosed_on = $4, notes = $5,
             updated_at = NOW()
         WHERE id = $6 AND account_id = $7
         RETURNING {COLUMNS}"
    ))
    .bind(input.name)
    .bind(input.icd10_code)
    .bind(input.status.as_str())
    .bind(input.diagnosed_on)
    .bind(input.notes)
    .bind(id)
    .bind(account_id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    row.try_into()
}

pub async fn delete(pool: &PgPool, account_id: Uuid, id: Uuid) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM conditions WHERE id = $1 AND account_id = $2")
        .bind(id)
        .bind(account_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    Ok(())
}
