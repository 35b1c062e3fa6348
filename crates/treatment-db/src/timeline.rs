use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use treatment_core::models::timeline::{EventKind, TimelineEvent};

use crate::error::DbError;

#[derive(sqlx::FromRow)]
struct EventRow {
    id: Uuid,
    account_id: Uuid,
    kind: String,
    occurred_at: DateTime<Utc>,
    title: String,
    detail: Option<String>,
    source_id: Option<Uuid>,
}

impl TryFrom<EventRow> for TimelineEvent {
    type Error = DbError;

    fn try_from(r: EventRow) -> Result<Self, DbError> {
        Ok(TimelineEvent {
            id: r.id,
            account_id: r.account_id,
            kind: EventKind::parse_str(&r.kind)?,
            occurred_at: r.occurred_at,
            title: r.title,
            detail: r.detail,
            source_id: r.source_id,
        })
    }
}

/// Append an event occurring now. Failures here are logged by callers but
/// never fail the originating mutation.
pub async fn append(
    pool: &PgPool,
    account_id: Uuid,
    kind: EventKind,
    title: &str,
    detail: Option<&str>,
    source_id: Option<Uuid>,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO timeline_events (id, account_id, kind, occurred_at, title, detail, source_id)
         VALUES ($1, $2, $3, NOW(), $4, $5, $6)",
    )
    .bind(Uuid::new_v4())
    .bind(account_id)
    .bind(kind.as_str())
    .bind(title)
    .bind(detail)
    .bind(source_id)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn list(
    pool: &PgPool,
    account_id: Uuid,
    kind: Option<EventKind>,
    limit: Option<u32>,
) -> Result<Vec<TimelineEvent>, DbError> {
    let rows = sqlx::query_as::<_, EventRow>(
        "SELECT id, account_id, kind, occurred_at, title, detail, source_id
         FROM timeline_events
         WHERE account_id = $1 AND ($2::text IS NULL OR kind = $2)
         ORDER BY occurred_at DESC, id DESC
         LIMIT $3",
    )
    .bind(account_id)
    .bind(kind.map(|k| k.as_str()))
    .bind(crate::clamp_limit(limit))
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(TimelineEvent::try_from).collect()
}
