pub mod applications;
pub mod auth;
pub mod health;
pub mod internships;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                         register (public)
/// /auth/login                          password login (public)
/// /auth/google-login                   federated login (public)
/// /auth/me                             current user (auth)
/// /auth/refresh                        reissue token (auth)
/// /auth/logout                         acknowledgment (public)
/// /auth/google_config                  OAuth client id (public)
///
/// /internships                         search (public), create (auth)
/// /internships/{id}                    get (auth)
/// /internships/apply                   apply (auth)
///
/// /applications                        list own (auth)
/// /applications/{id}                   get, update, delete (auth, owner only)
///
/// /users/{id}                          get, update, delete (auth, self only)
/// /users/{id}/profile                  get, update (auth, self only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/internships", internships::router())
        .nest("/applications", applications::router())
        .nest("/users", users::router())
}
