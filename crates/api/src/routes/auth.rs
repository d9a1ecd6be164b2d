//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /signup         -> signup
/// POST /login          -> login
/// POST /google-login   -> google_login
/// GET  /me             -> me (requires auth)
/// POST /refresh        -> refresh (requires auth)
/// POST /logout         -> logout
/// GET  /google_config  -> google_config
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/google-login", post(auth::google_login))
        .route("/me", get(auth::me))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
        .route("/google_config", get(auth::google_config))
}
