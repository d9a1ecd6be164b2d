//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /{id}            -> get_user
/// PUT    /{id}            -> update_user
/// DELETE /{id}            -> delete_user
/// GET    /{id}/profile    -> get_profile
/// PUT    /{id}/profile    -> update_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/{id}/profile",
            get(users::get_profile).put(users::update_profile),
        )
}
