use sqlx::PgPool;

use treatment_merlin::client::MerlinClient;
use treatment_openai::client::OpenAiClient;

/// Shared application state, injected into all route handlers via Axum
/// state.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub openai: OpenAiClient,
    pub merlin: MerlinClient,
    pub terra_secret: String,
    pub session_ttl_seconds: i64,
    pub share_ttl_seconds: i64,
    pub max_upload_bytes: usize,
}
