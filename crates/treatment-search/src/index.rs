use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use treatment_openai::client::OpenAiClient;
use treatment_openai::embeddings;

use crate::error::SearchError;

/// A medical reference document to index, tagged with its SDCO taxonomy
/// code.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SdcoDocumentInput {
    pub id: Uuid,
    pub sdco_code: String,
    pub title: String,
    pub body: String,
}

/// Embed and upsert one document. Title and body are embedded together so
/// short titles still anchor the vector.
pub async fn upsert_document(
    pool: &PgPool,
    openai: &OpenAiClient,
    doc: &SdcoDocumentInput,
) -> Result<(), SearchError> {
    let text = format!("{}\n\n{}", doc.title, doc.body);
    let embedding = embeddings::embed(openai, &text).await?;

    treatment_db::vector::upsert_document(
        pool,
        doc.id,
        &doc.sdco_code,
        &doc.title,
        &doc.body,
        &embedding,
    )
    .await?;

    info!(id = %doc.id, sdco_code = %doc.sdco_code, "sdco document indexed");

    Ok(())
}
