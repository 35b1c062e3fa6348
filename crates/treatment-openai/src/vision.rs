//! Document text extraction via vision-capable chat models.
//!
//! Images travel as base64 `data:` URLs in an `image_url` content part;
//! PDFs travel as a `file` content part. The model is asked for pure text
//! extraction, no commentary.

use base64::Engine;
use serde_json::json;
use tracing::info;

use crate::chat::complete_with_parts;
use crate::client::OpenAiClient;
use crate::error::OpenAiError;

const EXTRACTION_SYSTEM_PROMPT: &str = "\
Extract the complete text content from this document. \
Return only the plain text, preserving paragraph structure. \
Do not add commentary, headers, or formatting.";

/// Content types the extraction endpoint accepts.
pub fn supported_content_type(content_type: &str) -> bool {
    matches!(
        content_type,
        "image/png" | "image/jpeg" | "image/webp" | "image/gif" | "application/pdf"
    )
}

/// Render bytes as a base64 `data:` URL for the given content type.
pub fn data_url(content_type: &str, bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{content_type};base64,{encoded}")
}

/// Extract plain text from an uploaded document.
///
/// The user message carries the document itself plus a short instruction;
/// the extraction prompt rides in the system role.
pub async fn extract_text(
    client: &OpenAiClient,
    bytes: &[u8],
    content_type: &str,
    filename: &str,
) -> Result<String, OpenAiError> {
    if bytes.is_empty() {
        return Err(OpenAiError::EmptyInput);
    }
    if !supported_content_type(content_type) {
        return Err(OpenAiError::UnsupportedContentType(content_type.to_string()));
    }

    let document_part = if content_type == "application/pdf" {
        json!({
            "type": "file",
            "file": {
                "filename": filename,
                "file_data": data_url(content_type, bytes),
            }
        })
    } else {
        json!({
            "type": "image_url",
            "image_url": { "url": data_url(content_type, bytes) }
        })
    };

    let user_parts = json!([
        document_part,
        {
            "type": "text",
            "text": "Extract the full text from this document."
        }
    ]);

    info!(filename, content_type, byte_len = bytes.len(), "extracting document text");

    let text = complete_with_parts(
        client,
        &client.config().vision_model,
        EXTRACTION_SYSTEM_PROMPT,
        user_parts,
    )
    .await?;

    info!(filename, text_len = text.len(), "document text extraction complete");

    Ok(text)
}
