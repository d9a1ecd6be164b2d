//! Handlers for the `/users` resource. Every route is self-only.

use axum::extract::State;
use axum::Json;
use internhub_core::error::CoreError;
use internhub_core::types::DbId;
use internhub_db::models::profile::{UpdateUserProfile, UserProfile};
use internhub_db::models::user::{UpdateUser, UserResponse, UserWithProfile};
use internhub_db::repositories::{ProfileRepo, UserRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathParam, ValidJson};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Request body for `PUT /users/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Email must not be empty"))]
    pub email: Option<String>,
}

/// Reject access to any account other than the caller's own.
fn ensure_self(auth: &AuthUser, id: DbId) -> AppResult<()> {
    if auth.user.id != id {
        return Err(AppError::forbidden("Access denied"));
    }
    Ok(())
}

fn user_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "User", id })
}

// ---------------------------------------------------------------------------
// GET /users/{id}
// ---------------------------------------------------------------------------

pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<UserWithProfile>> {
    ensure_self(&auth, id)?;

    let profile = ProfileRepo::find_by_user_id(&state.pool, id).await?;
    Ok(Json(UserWithProfile {
        user: UserResponse::from(&auth.user),
        profile,
    }))
}

// ---------------------------------------------------------------------------
// PUT /users/{id}
// ---------------------------------------------------------------------------

/// Update name and/or email. A new email already used by another account
/// is a 409.
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(id): PathParam<DbId>,
    ValidJson(input): ValidJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    ensure_self(&auth, id)?;

    let email = input.email.map(|e| e.trim().to_string());
    if let Some(email) = email.as_deref() {
        if email.is_empty() {
            return Err(AppError::BadRequest("Email must not be empty".into()));
        }
        if email != auth.user.email && UserRepo::email_taken_by_other(&state.pool, email, id).await? {
            return Err(AppError::conflict("Email already taken"));
        }
    }

    let update = UpdateUser {
        name: input.name,
        email,
    };
    let user = UserRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| user_not_found(id))?;

    tracing::info!(user_id = id, "User updated");
    Ok(Json(UserResponse::from(&user)))
}

// ---------------------------------------------------------------------------
// DELETE /users/{id}
// ---------------------------------------------------------------------------

/// Delete the account. Profile, applications and their history cascade.
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<MessageResponse>> {
    ensure_self(&auth, id)?;

    if !UserRepo::delete(&state.pool, id).await? {
        return Err(user_not_found(id));
    }

    tracing::info!(user_id = id, "User deleted");
    Ok(Json(MessageResponse::new("User deleted successfully")))
}

// ---------------------------------------------------------------------------
// GET/PUT /users/{id}/profile
// ---------------------------------------------------------------------------

/// Return the profile, creating an empty one on first access.
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<UserProfile>> {
    ensure_self(&auth, id)?;
    let profile = ProfileRepo::get_or_create(&state.pool, id).await?;
    Ok(Json(profile))
}

/// Apply the whitelisted profile fields present in the body. Unknown fields
/// are ignored.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(id): PathParam<DbId>,
    JsonBody(input): JsonBody<UpdateUserProfile>,
) -> AppResult<Json<UserProfile>> {
    ensure_self(&auth, id)?;
    let profile = ProfileRepo::update(&state.pool, id, &input).await?;
    tracing::info!(user_id = id, "Profile updated");
    Ok(Json(profile))
}
