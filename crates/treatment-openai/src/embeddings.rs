use serde::{Deserialize, Serialize};

use crate::client::{read_json, OpenAiClient};
use crate::error::OpenAiError;

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Deserialize)]
struct EmbeddingDatum {
    embedding: Vec<f32>,
}

/// Embed one text. Empty or whitespace-only input is rejected locally
/// rather than burning an API call.
pub async fn embed(client: &OpenAiClient, text: &str) -> Result<Vec<f32>, OpenAiError> {
    if text.trim().is_empty() {
        return Err(OpenAiError::EmptyInput);
    }

    let request = EmbeddingRequest {
        model: &client.config().embedding_model,
        input: text,
    };

    let response = client.post("/v1/embeddings").json(&request).send().await?;

    let parsed: EmbeddingResponse = read_json(response).await?;

    parsed
        .data
        .into_iter()
        .next()
        .map(|d| d.embedding)
        .ok_or_else(|| OpenAiError::ResponseParse("no embedding in response".to_string()))
}
