use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub database: bool,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    let database = sqlx::query("SELECT 1").execute(&state.db).await.is_ok();

    Json(HealthStatus {
        status: if database { "ok" } else { "degraded" },
        database,
    })
}
