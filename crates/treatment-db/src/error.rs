use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("connect failed: {0}")]
    Connect(String),

    #[error("query failed: {0}")]
    Query(sqlx::Error),

    #[error("row not found")]
    NotFound,

    #[error("{0} already exists")]
    Conflict(&'static str),

    #[error("stored row is invalid: {0}")]
    Corrupt(#[from] treatment_core::error::CoreError),

    #[error("embedding must not be empty")]
    EmptyEmbedding,
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => DbError::NotFound,
            other => DbError::Query(other),
        }
    }
}

/// Map an insert error, turning a Postgres unique violation (23505) into a
/// conflict on the named entity.
pub(crate) fn map_insert_err(e: sqlx::Error, entity: &'static str) -> DbError {
    if is_unique_violation(&e) {
        return DbError::Conflict(entity);
    }
    e.into()
}

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505")
    )
}
