//! Liveness endpoint, mounted at the root rather than under `/api/v1`.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when every dependency is reachable, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Whether the upload directory exists (it is created on first upload).
    pub uploads_ready: bool,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = jambakan_db::health_check(&state.pool).await.is_ok();
    let uploads_ready = tokio::fs::metadata(&state.config.upload.dir)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        uploads_ready,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
