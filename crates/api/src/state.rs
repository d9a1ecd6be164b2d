use std::sync::Arc;

use crate::auth::google::IdTokenVerifier;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: internhub_db::DbPool,
    /// Server configuration, read-only after startup.
    pub config: Arc<ServerConfig>,
    /// Verifies Google ID tokens during federated login.
    pub id_verifier: Arc<dyn IdTokenVerifier>,
}
