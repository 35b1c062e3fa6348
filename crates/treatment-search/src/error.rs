use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("database error: {0}")]
    Db(#[from] treatment_db::error::DbError),

    #[error("embedding failed: {0}")]
    Embedding(#[from] treatment_openai::error::OpenAiError),

    #[error("query must not be empty")]
    EmptyQuery,
}
