use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use treatment_db::error::DbError;
use treatment_merlin::error::MerlinError;
use treatment_openai::error::OpenAiError;
use treatment_search::error::SearchError;
use treatment_terra::error::TerraError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Conflict(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound => ApiError::NotFound("not found".to_string()),
            DbError::Conflict(entity) => ApiError::Conflict(format!("{entity} already exists")),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<OpenAiError> for ApiError {
    fn from(e: OpenAiError) -> Self {
        match e {
            OpenAiError::EmptyInput => ApiError::BadRequest("input must not be empty".to_string()),
            OpenAiError::UnsupportedContentType(ct) => {
                ApiError::BadRequest(format!("unsupported content type: {ct}"))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<MerlinError> for ApiError {
    fn from(e: MerlinError) -> Self {
        match e {
            // 4xx from Merlin means the request itself was rejected.
            MerlinError::Api { status, .. } if (400..500).contains(&status) => {
                ApiError::BadRequest(format!("diagnosis request rejected ({status})"))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<SearchError> for ApiError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::EmptyQuery => ApiError::BadRequest("query must not be empty".to_string()),
            SearchError::Db(inner) => inner.into(),
            SearchError::Embedding(inner) => inner.into(),
        }
    }
}

impl From<TerraError> for ApiError {
    fn from(e: TerraError) -> Self {
        match e {
            TerraError::PayloadParse(inner) => ApiError::BadRequest(inner.to_string()),
            // Signature failures: the caller is not Terra.
            other => ApiError::Unauthorized(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
