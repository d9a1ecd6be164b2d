//! Handlers for the `/auth` resource (signup, login, federated login, session).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use internhub_core::types::DbId;
use internhub_db::models::user::{CreateUser, User, UserResponse, UserWithProfile};
use internhub_db::repositories::{ProfileRepo, UserRepo};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::auth::google::GoogleIdentity;
use crate::auth::jwt::issue_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

const CREDENTIALS_REQUIRED: &str = "Email and password are required";
const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub password: String,
    pub name: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub password: String,
}

/// Request body for `POST /auth/google-login`.
///
/// Normally carries `id_token`. The bare `google_id`/`email` form is only
/// honoured when `GOOGLE_ALLOW_UNVERIFIED` is set.
#[derive(Debug, Deserialize, Validate)]
pub struct GoogleLoginRequest {
    pub id_token: Option<String>,
    pub google_id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
}

/// Returned by every login flavour.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user_id: DbId,
    pub email: String,
    pub name: Option<String>,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/signup
///
/// Register with email + password. The user and an empty profile are created
/// in one transaction.
pub async fn signup(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<SignupRequest>,
) -> AppResult<impl IntoResponse> {
    let email = input.email.trim().to_string();
    if email.is_empty() {
        return Err(AppError::BadRequest(CREDENTIALS_REQUIRED.into()));
    }

    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::conflict("User already exists"));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let name = non_blank(input.name).unwrap_or_else(|| default_name(&email));
    let user = UserRepo::create_with_profile(
        &state.pool,
        &CreateUser {
            email,
            password_hash: Some(password_hash),
            google_id: None,
            name: Some(name),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User signed up");

    let response = auth_response(&state, &user)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/auth/login
///
/// Unknown email, wrong password, and password-less (Google-only) accounts
/// all produce the same 401.
pub async fn login(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

    let Some(hash) = user.password_hash.as_deref() else {
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    };

    let password_valid = verify_password(&input.password, hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(user_id = user.id, "Password mismatch");
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }

    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(auth_response(&state, &user)?))
}

/// POST /api/auth/google-login
///
/// Resolve the account by Google id, then by email (linking the Google id),
/// otherwise create a new account.
pub async fn google_login(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<GoogleLoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let identity = resolve_identity(&state, input).await?;

    let email = identity
        .email
        .clone()
        .ok_or_else(|| AppError::BadRequest("Google account has no email address".into()))?;

    let user = find_or_create_google_user(&state, &identity, &email).await?;

    tracing::info!(user_id = user.id, "User logged in with Google");
    Ok(Json(auth_response(&state, &user)?))
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<UserWithProfile>> {
    let profile = ProfileRepo::find_by_user_id(&state.pool, auth.user.id).await?;
    Ok(Json(UserWithProfile {
        user: UserResponse::from(&auth.user),
        profile,
    }))
}

/// POST /api/auth/refresh
///
/// Issue a fresh token for a caller holding a valid one.
pub async fn refresh(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<TokenResponse>> {
    let token = issue_token(auth.user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    Ok(Json(TokenResponse { token }))
}

/// POST /api/auth/logout
///
/// Tokens are stateless; the client discards its copy.
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse::new("Logged out successfully"))
}

/// GET /api/auth/google_config
pub async fn google_config(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "GOOGLE_CLIENT_ID": state.config.google.client_id }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let token = issue_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        user_id: user.id,
        email: user.email.clone(),
        name: user.name.clone(),
        token,
    })
}

/// Turn the request into a Google identity, verifying `id_token` when present.
async fn resolve_identity(state: &AppState, input: GoogleLoginRequest) -> AppResult<GoogleIdentity> {
    if let Some(id_token) = non_blank(input.id_token) {
        return state.id_verifier.verify(&id_token).await.map_err(|e| {
            tracing::warn!(error = %e, "Google token rejected");
            AppError::unauthorized("Invalid Google token")
        });
    }

    if !state.config.google.allow_unverified {
        return Err(AppError::BadRequest("id_token is required".into()));
    }

    match (non_blank(input.google_id), non_blank(input.email)) {
        (Some(google_id), Some(email)) => Ok(GoogleIdentity {
            google_id,
            email: Some(email),
            name: non_blank(input.name),
        }),
        _ => Err(AppError::BadRequest("Google ID and email are required".into())),
    }
}

async fn find_or_create_google_user(
    state: &AppState,
    identity: &GoogleIdentity,
    email: &str,
) -> AppResult<User> {
    if let Some(user) = UserRepo::find_by_google_id(&state.pool, &identity.google_id).await? {
        return Ok(user);
    }

    if let Some(user) = UserRepo::find_by_email(&state.pool, email).await? {
        if user.google_id.is_some() {
            return Ok(user);
        }
        let linked = UserRepo::link_google_id(&state.pool, user.id, &identity.google_id).await?;
        tracing::info!(user_id = user.id, "Linked Google account to existing user");
        return Ok(linked.unwrap_or(user));
    }

    let name = identity.name.clone().unwrap_or_else(|| default_name(email));
    let user = UserRepo::create_with_profile(
        &state.pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: None,
            google_id: Some(identity.google_id.clone()),
            name: Some(name),
        },
    )
    .await?;
    tracing::info!(user_id = user.id, "User signed up with Google");
    Ok(user)
}

/// Trimmed value, or `None` when absent or blank.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Display name derived from the local part of an email address.
fn default_name(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_name_is_local_part() {
        assert_eq!(default_name("alice@example.com"), "alice");
        assert_eq!(default_name("no-at-sign"), "no-at-sign");
    }

    #[test]
    fn non_blank_trims_and_drops_empty() {
        assert_eq!(non_blank(Some("  x ".into())), Some("x".into()));
        assert_eq!(non_blank(Some("   ".into())), None);
        assert_eq!(non_blank(None), None);
    }
}
