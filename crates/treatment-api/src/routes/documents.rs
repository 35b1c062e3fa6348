use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use uuid::Uuid;

use treatment_core::models::document::{ExtractionStatus, HealthDocument};
use treatment_core::models::timeline::EventKind;
use treatment_db::documents;
use treatment_openai::vision;

use crate::error::ApiError;
use crate::middleware::auth::AuthSession;
use crate::state::AppState;

/// Multipart upload with inline text extraction.
///
/// The row is written as `pending` before extraction runs, then flipped to
/// `complete` or `failed`; a failed extraction still returns 200 with the
/// document so the client can show the upload and its state.
pub async fn upload_document(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    mut multipart: Multipart,
) -> Result<Json<HealthDocument>, ApiError> {
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        file = Some((filename, content_type, bytes.to_vec()));
        break;
    }

    let (filename, content_type, bytes) =
        file.ok_or_else(|| ApiError::BadRequest("multipart field 'file' required".to_string()))?;

    if bytes.is_empty() {
        return Err(ApiError::BadRequest("file must not be empty".to_string()));
    }
    if bytes.len() > state.max_upload_bytes {
        return Err(ApiError::BadRequest(format!(
            "file exceeds {} byte limit",
            state.max_upload_bytes
        )));
    }
    if !vision::supported_content_type(&content_type) {
        return Err(ApiError::BadRequest(format!(
            "unsupported content type: {content_type}"
        )));
    }

    let document = documents::insert_pending(
        &state.db,
        session.account_id,
        &filename,
        &content_type,
        bytes.len() as i64,
    )
    .await?;

    match vision::extract_text(&state.openai, &bytes, &content_type, &filename).await {
        Ok(text) => {
            documents::set_extraction(
                &state.db,
                document.id,
                ExtractionStatus::Complete,
                Some(&text),
            )
            .await?;
        }
        Err(e) => {
            tracing::warn!(error = %e, document_id = %document.id, "document extraction failed");
            documents::set_extraction(&state.db, document.id, ExtractionStatus::Failed, None)
                .await?;
        }
    }

    if let Err(e) = treatment_db::timeline::append(
        &state.db,
        session.account_id,
        EventKind::DocumentUploaded,
        &filename,
        None,
        Some(document.id),
    )
    .await
    {
        tracing::warn!(error = %e, document_id = %document.id, "timeline append failed");
    }

    let document = documents::get(&state.db, session.account_id, document.id).await?;

    Ok(Json(document))
}

pub async fn list_documents(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> Result<Json<Vec<HealthDocument>>, ApiError> {
    Ok(Json(documents::list(&state.db, session.account_id).await?))
}

pub async fn get_document(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> Result<Json<HealthDocument>, ApiError> {
    Ok(Json(
        documents::get(&state.db, session.account_id, id).await?,
    ))
}

pub async fn delete_document(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    documents::delete(&state.db, session.account_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
