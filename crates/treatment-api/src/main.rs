use std::env;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_mw;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

use treatment_db::pool::DbConfig;
use treatment_merlin::client::{MerlinClient, MerlinConfig};
use treatment_openai::client::{OpenAiClient, OpenAiConfig};

mod auth;
mod error;
mod middleware;
mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for the log aggregator
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let bind = env::var("TREATMENT_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let database_url = env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgres://localhost/treatment".to_string());

    let openai = OpenAiClient::new(OpenAiConfig {
        api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
        base_url: env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com".to_string()),
        chat_model: env::var("OPENAI_CHAT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
        vision_model: env::var("OPENAI_VISION_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
        embedding_model: env::var("OPENAI_EMBEDDING_MODEL")
            .unwrap_or_else(|_| "text-embedding-3-small".to_string()),
    })?;

    let merlin = MerlinClient::new(MerlinConfig {
        base_url: env::var("MERLIN_BASE_URL")
            .unwrap_or_else(|_| "https://api.merlin.health".to_string()),
        api_key: env::var("MERLIN_API_KEY").unwrap_or_default(),
    })?;

    let db = treatment_db::pool::connect(&DbConfig {
        url: database_url,
        max_connections: env_parse("DATABASE_MAX_CONNECTIONS", 10),
        acquire_timeout: Duration::from_secs(5),
    })
    .await?;

    treatment_db::schema::apply_schema(&db).await?;

    let state = AppState {
        db,
        openai,
        merlin,
        terra_secret: env::var("TERRA_SIGNING_SECRET").unwrap_or_default(),
        session_ttl_seconds: env_parse("SESSION_TTL_SECONDS", 7 * 24 * 3600),
        share_ttl_seconds: env_parse("SHARE_TTL_SECONDS", 7 * 24 * 3600),
        max_upload_bytes: env_parse("MAX_UPLOAD_BYTES", 10 * 1024 * 1024),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public surface: registration, login, share resolution, and the
    // signature-verified Terra webhook.
    let public = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/v1/accounts", post(routes::accounts::register))
        .route("/v1/sessions", post(routes::sessions::login))
        .route("/v1/shared/{token}", get(routes::shares::resolve_shared))
        .route("/v1/terra/webhook", post(routes::terra::webhook));

    let protected = Router::new()
        .route("/v1/sessions/current", delete(routes::sessions::logout))
        .route("/v1/sessions/validate", get(routes::sessions::validate))
        .route("/v1/conditions", get(routes::conditions::list_conditions))
        .route("/v1/conditions", post(routes::conditions::create_condition))
        .route("/v1/conditions/{id}", get(routes::conditions::get_condition))
        .route("/v1/conditions/{id}", put(routes::conditions::update_condition))
        .route(
            "/v1/conditions/{id}",
            delete(routes::conditions::delete_condition),
        )
        .route("/v1/medications", get(routes::medications::list_medications))
        .route(
            "/v1/medications",
            post(routes::medications::create_medication),
        )
        .route(
            "/v1/medications/{id}",
            get(routes::medications::get_medication),
        )
        .route(
            "/v1/medications/{id}",
            put(routes::medications::update_medication),
        )
        .route(
            "/v1/medications/{id}",
            delete(routes::medications::delete_medication),
        )
        .route(
            "/v1/linked-accounts",
            get(routes::linked_accounts::list_links),
        )
        .route(
            "/v1/linked-accounts",
            post(routes::linked_accounts::create_link),
        )
        .route(
            "/v1/linked-accounts/{id}",
            delete(routes::linked_accounts::delete_link),
        )
        .route("/v1/timeline", get(routes::timeline::list_timeline))
        .route("/v1/shares", get(routes::shares::list_shares))
        .route("/v1/shares", post(routes::shares::create_share))
        .route("/v1/shares/{id}", delete(routes::shares::revoke_share))
        .route("/v1/documents", get(routes::documents::list_documents))
        .route("/v1/documents", post(routes::documents::upload_document))
        .route("/v1/documents/{id}", get(routes::documents::get_document))
        .route(
            "/v1/documents/{id}",
            delete(routes::documents::delete_document),
        )
        .route("/v1/chat/diagnose", post(routes::chat::diagnose))
        .route("/v1/search", get(routes::search::search_documents))
        .route("/v1/search/documents", post(routes::search::index_document))
        .route("/v1/wearables/samples", get(routes::wearables::list_samples))
        .route_layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::require_session,
        ));

    let app = public
        .merge(protected)
        .layer(DefaultBodyLimit::max(state.max_upload_bytes + 1024 * 1024))
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state);

    tracing::info!(%bind, "treatment api listening");

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
