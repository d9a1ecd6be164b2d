//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use internhub_db::models::user::User;
use internhub_db::repositories::UserRepo;

use crate::auth::jwt::{verify_token, TokenError};
use crate::error::AppError;
use crate::state::AppState;

pub const MISSING_TOKEN: &str = "Authorization token required";

/// Authenticated user resolved from a JWT Bearer token in the `Authorization` header.
///
/// The full user row is loaded before the handler runs, so handlers never
/// re-fetch the caller:
///
/// ```ignore
/// async fn me(auth: AuthUser) -> AppResult<Json<UserResponse>> {
///     Ok(Json(UserResponse::from(&auth.user)))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token =
            bearer_token(&parts.headers).ok_or_else(|| AppError::unauthorized(MISSING_TOKEN))?;

        let claims = verify_token(token, &state.config.jwt)
            .map_err(|e: TokenError| AppError::unauthorized(e.to_string()))?;

        // A token for a deleted account is no better than a forged one.
        let user = UserRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| AppError::unauthorized(TokenError::Invalid.to_string()))?;

        Ok(AuthUser { user })
    }
}

/// Extract the token from `Authorization: Bearer <token>`.
///
/// Returns `None` when the header is absent, not ASCII, uses another scheme,
/// or carries an empty token.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        map
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")), Some("abc.def"));
    }

    #[test]
    fn missing_header_is_none() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn other_schemes_are_ignored() {
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwdw==")), None);
        assert_eq!(bearer_token(&headers("abc.def")), None);
    }

    #[test]
    fn empty_token_is_none() {
        assert_eq!(bearer_token(&headers("Bearer ")), None);
    }
}
