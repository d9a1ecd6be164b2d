//! Route definitions for the `/applications` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::applications;
use crate::state::AppState;

/// Routes mounted at `/applications`.
///
/// ```text
/// GET    /        -> list_applications
/// GET    /{id}    -> get_application
/// PUT    /{id}    -> update_application
/// DELETE /{id}    -> delete_application
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(applications::list_applications))
        .route(
            "/{id}",
            get(applications::get_application)
                .put(applications::update_application)
                .delete(applications::delete_application),
        )
}
