use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use treatment_core::models::medication::{Medication, MedicationStatus};

use crate::error::DbError;

#[derive(sqlx::FromRow)]
struct MedicationRow {
    id: Uuid,
    account_id: Uuid,
    name: String,
    dosage: String,
    frequency: String,
    status: String,
    prescriber: Option<String>,
    started_on: Option<NaiveDate>,
    stopped_on: Option<NaiveDate>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MedicationRow> for Medication {
    type Error = DbError;

    fn try_from(r: MedicationRow) -> Result<Self, DbError> {
        Ok(Medication {
            id: r.id,
            account_id: r.account_id,
            name: r.name,
            dosage: r.dosage,
            frequency: r.frequency,
            status: MedicationStatus::parse_str(&r.status)?,
            prescriber: r.prescriber,
            started_on: r.started_on,
            stopped_on: r.stopped_on,
            notes: r.notes,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

pub struct MedicationInput<'a> {
    pub name: &'a str,
    pub dosage: &'a str,
    pub frequency: &'a str,
    pub status: MedicationStatus,
    pub prescriber: Option<&'a str>,
    pub started_on: Option<NaiveDate>,
    pub stopped_on: Option<NaiveDate>,
    pub notes: Option<&'a str>,
}

const COLUMNS: &str = "id, account_id, name, dosage, frequency, status, prescriber, \
                       started_on, stopped_on, notes, created_at, updated_at";

pub async fn list(pool: &PgPool, account_id: Uuid) -> Result<Vec<Medication>, DbError> {
    let rows = sqlx::query_as::<_, MedicationRow>(&format!(
        "SELECT {COLUMNS} FROM medications WHERE account_id = $1 ORDER BY created_at DESC"
    ))
    .bind(account_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(Medication::try_from).collect()
}

pub async fn get(pool: &PgPool, account_id: Uuid, id: Uuid) -> Result<Medication, DbError> {
    let row = sqlx::query_as::<_, MedicationRow>(&format!(
        "SELECT {COLUMNS} FROM medications WHERE id = $1 AND account_id = $2"
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
    input: &MedicationInput<'_>,
) -> Result<Medication, DbError> {
    let row = sqlx::query_as::<_, MedicationRow>(&format!(
        "INSERT INTO medications
             (id, account_id, name, dosage, frequency, status, prescriber,
              started_on, stopped_on, notes)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
         RETURNING {COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(account_id)
    .bind(input.name)
    .bind(input.dosage)
    .bind(input.frequency)
    .bind(input.status.as_str())
    .bind(input.prescriber)
    .bind(input.started_on)
    .bind(input.stopped_on)
    .bind(input.notes)
    .fetch_one(pool)
    .await?;

    row.try_into()
}

pub async fn update(
    pool: &PgPool,
    account_id: Uuid,
    id: Uuid,
    input: &MedicationInput<'_>,
) -> Result<Medication, DbError> {
    let row = sqlx::query_as::<_, MedicationRow>(&format!(
        "UPDATE medications
         SET name = $1, dosage = $2, frequency = $3, status = $4, prescriber = $5,
             started_on = $6, stopped_on = $7, notes = $8, updated_at = NOW()
         WHERE id = $9 AND account_id = $10
         RETURNING {COLUMNS}"
    ))
    .bind(input.name)
    .bind(input.dosage)
    .bind(input.frequency)
    .bind(input.status.as_str())
    .bind(input.prescriber)
    .bind(input.started_on)
    .bind(input.stopped_on)
    .bind(input.notes)
    .bind(id)
    .bind(account_id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    row.try_into()
}

pub async fn delete(pool: &PgPool, account_id: Uuid, id: Uuid) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM medications WHERE id = $1 AND account_id = $2")
        .bind(id)
        .bind(account_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    Ok(())
}
