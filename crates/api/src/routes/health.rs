//! Liveness check for load balancers and the frontend status banner.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use internhub_db::repositories::InternshipRepo;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Listings currently stored. Absent when the database is down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internships: Option<i64>,
    /// Whether Google sign-in has a client id to verify against.
    pub google_login_enabled: bool,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let internships = if internhub_db::health_check(&state.pool).await.is_ok() {
        InternshipRepo::count(&state.pool).await.ok()
    } else {
        None
    };
    let db_healthy = internships.is_some();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        internships,
        google_login_enabled: !state.config.google.client_id.is_empty(),
    })
}

/// `GET /health`, mounted beside `/api` rather than under it.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
