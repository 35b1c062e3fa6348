use sqlx::PgPool;

use crate::error::DbError;

/// Idempotent schema bootstrap, applied at startup.
///
/// Statements run one at a time so a partial failure surfaces the exact
/// statement that broke. The pgvector extension must already be installed
/// on the server; `CREATE EXTENSION` only enables it for this database.
pub async fn apply_schema(pool: &PgPool) -> Result<(), DbError> {
    for stmt in SCHEMA_STATEMENTS {
        sqlx::query(stmt).execute(pool).await?;
    }

    tracing::info!(statements = SCHEMA_STATEMENTS.len(), "schema applied");

    Ok(())
}

const SCHEMA_STATEMENTS: &[&str] = &[
    "CREATE EXTENSION IF NOT EXISTS vector",
    "CREATE TABLE IF NOT EXISTS accounts (
        id UUID PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        display_name TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )",
    "CREATE TABLE IF NOT EXISTS user_sessions (
        id UUID PRIMARY KEY,
        account_id UUID NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
        token_hash TEXT NOT NULL UNIQUE,
        expires_at TIMESTAMPTZ NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )",
    "CREATE TABLE IF NOT EXISTS conditions (
        id UUID PRIMARY KEY,
        account_id UUID NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        icd10_code TEXT,
        status TEXT NOT NULL,
        diagnosed_on DATE,
        notes TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )",
    "CREATE TABLE IF NOT EXISTS medications (
        id UUID PRIMARY KEY,
        account_id UUID NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        dosage TEXT NOT NULL,
        frequency TEXT NOT NULL,
        status TEXT NOT NULL,
        prescriber TEXT,
        started_on DATE,
        stopped_on DATE,
        notes TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )",
    "CREATE TABLE IF NOT EXISTS linked_accounts (
        id UUID PRIMARY KEY,
        account_id UUID NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
        provider TEXT NOT NULL,
        provider_user_id TEXT NOT NULL,
        status TEXT NOT NULL,
        connected_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        UNIQUE (provider, provider_user_id)
    )",
    "CREATE TABLE IF NOT EXISTS timeline_events (
        id UUID PRIMARY KEY,
        account_id UUID NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
        kind TEXT NOT NULL,
        occurred_at TIMESTAMPTZ NOT NULL,
        title TEXT NOT NULL,
        detail TEXT,
        source_id UUID
    )",
    "CREATE INDEX IF NOT EXISTS timeline_events_account_occurred_idx
        ON timeline_events (account_id, occurred_at DESC)",
    "CREATE TABLE IF NOT EXISTS share_grants (
        id UUID PRIMARY KEY,
        account_id UUID NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
        grantee_email TEXT NOT NULL,
        scope TEXT NOT NULL,
        token_hash TEXT NOT NULL UNIQUE,
        expires_at TIMESTAMPTZ NOT NULL,
        revoked BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )",
    "CREATE TABLE IF NOT EXISTS health_documents (
        id UUID PRIMARY KEY,
        account_id UUID NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
        filename TEXT NOT NULL,
        content_type TEXT NOT NULL,
        byte_len BIGINT NOT NULL,
        extraction_status TEXT NOT NULL,
        extracted_text TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )",
    "CREATE TABLE IF NOT EXISTS wearable_samples (
        id UUID PRIMARY KEY,
        account_id UUID NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
        provider TEXT NOT NULL,
        metric TEXT NOT NULL,
        value DOUBLE PRECISION NOT NULL,
        unit TEXT NOT NULL,
        recorded_at TIMESTAMPTZ NOT NULL,
        received_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )",
    "CREATE INDEX IF NOT EXISTS wearable_samples_account_metric_idx
        ON wearable_samples (account_id, metric, recorded_at DESC)",
    "CREATE TABLE IF NOT EXISTS sdco_documents (
        id UUID PRIMARY KEY,
        sdco_code TEXT NOT NULL,
        title TEXT NOT NULL,
        body TEXT NOT NULL,
        embedding vector(1536) NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )",
    "CREATE INDEX IF NOT EXISTS sdco_documents_code_idx ON sdco_documents (sdco_code)",
];
