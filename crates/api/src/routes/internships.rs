//! Route definitions for the `/internships` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::internships;
use crate::state::AppState;

/// Routes mounted at `/internships`.
///
/// ```text
/// GET  /        -> search_internships (public)
/// POST /        -> create_internship
/// POST /apply   -> apply
/// GET  /{id}    -> get_internship
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(internships::search_internships).post(internships::create_internship),
        )
        .route("/apply", post(internships::apply))
        .route("/{id}", get(internships::get_internship))
}
