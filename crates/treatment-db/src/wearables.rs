use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use treatment_core::models::wearable::{Metric, WearableSample};

use crate::error::DbError;

#[derive(sqlx::FromRow)]
struct SampleRow {
    id: Uuid,
    account_id: Uuid,
    provider: String,
    metric: String,
    value: f64,
    unit: String,
    recorded_at: DateTime<Utc>,
    received_at: DateTime<Utc>,
}

impl TryFrom<SampleRow> for WearableSample {
    type Error = DbError;

    fn try_from(r: SampleRow) -> Result<Self, DbError> {
        Ok(WearableSample {
            id: r.id,
            account_id: r.account_id,
            provider: r.provider,
            metric: Metric::parse_str(&r.metric)?,
            value: r.value,
            unit: r.unit,
            recorded_at: r.recorded_at,
            received_at: r.received_at,
        })
    }
}

/// A normalized sample ready for insertion, before it has an id or account.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleInput {
    pub provider: String,
    pub metric: Metric,
    pub value: f64,
    pub recorded_at: DateTime<Utc>,
}

/// Bulk-insert normalized webhook samples in one transaction. Returns the
/// number written.
pub async fn insert_batch(
    pool: &PgPool,
    account_id: Uuid,
    samples: &[SampleInput],
) -> Result<u64, DbError> {
    let mut tx = pool.begin().await?;

    for sample in samples {
        sqlx::query(
            "INSERT INTO wearable_samples
                 (id, account_id, provider, metric, value, unit, recorded_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(Uuid::new_v4())
        .bind(account_id)
        .bind(&sample.provider)
        .bind(sample.metric.as_str())
        .bind(sample.value)
        .bind(sample.metric.unit())
        .bind(sample.recorded_at)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(samples.len() as u64)
}

pub async fn list(
    pool: &PgPool,
    account_id: Uuid,
    metric: Option<Metric>,
    since: Option<DateTime<Utc>>,
    limit: Option<u32>,
) -> Result<Vec<WearableSample>, DbError> {
    let rows = sqlx::query_as::<_, SampleRow>(
        "SELECT id, account_id, provider, metric, value, unit, recorded_at, received_at
         FROM wearable_samples
         WHERE account_id = $1
           AND ($2::text IS NULL OR metric = $2)
           AND ($3::timestamptz IS NULL OR recorded_at >= $3)
         ORDER BY recorded_at DESC
         LIMIT $4",
    )
    .bind(account_id)
    .bind(metric.map(|m| m.as_str()))
    .bind(since)
    .bind(crate::clamp_limit(limit))
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(WearableSample::try_from).collect()
}
