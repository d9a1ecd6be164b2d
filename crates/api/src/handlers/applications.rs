//! Handlers for the `/applications` resource. Callers only see their own.

use std::collections::HashMap;

use axum::extract::State;
use axum::Json;
use internhub_core::application_status::ApplicationStatus;
use internhub_core::error::CoreError;
use internhub_core::pagination::Page;
use internhub_core::time::parse_iso8601;
use internhub_core::types::DbId;
use internhub_db::models::application::{
    Application, ApplicationDetail, ApplicationWithInternship, UpdateApplication,
};
use internhub_db::repositories::{ApplicationRepo, InternshipRepo, TrackingRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{PathParam, QueryParams, ValidJson};
use crate::middleware::auth::AuthUser;
use crate::query::ApplicationListParams;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Request body for `PUT /applications/{id}`.
///
/// `status` and `interview_date` arrive as strings and are parsed here so a
/// bad value produces a readable 400.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateApplicationRequest {
    pub status: Option<String>,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
    pub notes: Option<String>,
    /// ISO-8601; an empty string leaves the stored value unchanged.
    pub interview_date: Option<String>,
    /// Note stored on the tracking entry if the status changes.
    pub status_notes: Option<String>,
}

impl UpdateApplicationRequest {
    fn into_update(self) -> Result<UpdateApplication, CoreError> {
        let status = self
            .status
            .as_deref()
            .map(ApplicationStatus::from_str_db)
            .transpose()?;

        let interview_date = self
            .interview_date
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(parse_iso8601)
            .transpose()?;

        Ok(UpdateApplication {
            status,
            cover_letter: self.cover_letter,
            resume_url: self.resume_url,
            notes: self.notes,
            interview_date,
            status_notes: self.status_notes,
        })
    }
}

/// Load an application and check the caller owns it.
///
/// Missing is 404; someone else's is 403.
async fn ensure_owned_application(
    pool: &sqlx::PgPool,
    id: DbId,
    user_id: DbId,
) -> AppResult<Application> {
    let application = ApplicationRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Application",
            id,
        })
    })?;

    if application.user_id != user_id {
        return Err(AppError::forbidden("Access denied"));
    }
    Ok(application)
}

// ---------------------------------------------------------------------------
// GET /applications
// ---------------------------------------------------------------------------

/// List the caller's applications, most recent first, each with its listing.
pub async fn list_applications(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(params): QueryParams<ApplicationListParams>,
) -> AppResult<Json<Page<ApplicationWithInternship>>> {
    let page = params.page_request();
    let status = params
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(ApplicationStatus::from_str_db)
        .transpose()?;

    let (applications, total) =
        ApplicationRepo::list_for_user(&state.pool, auth.user.id, status, page).await?;

    let mut ids: Vec<DbId> = applications.iter().map(|a| a.internship_id).collect();
    ids.sort_unstable();
    ids.dedup();
    let internships: HashMap<DbId, _> = InternshipRepo::find_by_ids(&state.pool, &ids)
        .await?
        .into_iter()
        .map(|i| (i.id, i))
        .collect();

    let page = Page::new(applications, total, page).map(|application| {
        let internship = internships.get(&application.internship_id).cloned();
        ApplicationWithInternship {
            application,
            internship,
        }
    });
    Ok(Json(page))
}

// ---------------------------------------------------------------------------
// GET /applications/{id}
// ---------------------------------------------------------------------------

/// Application with its listing and full status history (oldest first).
pub async fn get_application(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<ApplicationDetail>> {
    let application = ensure_owned_application(&state.pool, id, auth.user.id).await?;
    let internship = InternshipRepo::find_by_id(&state.pool, application.internship_id).await?;
    let tracking = TrackingRepo::list_for_application(&state.pool, id).await?;

    Ok(Json(ApplicationDetail {
        application,
        internship,
        tracking,
    }))
}

// ---------------------------------------------------------------------------
// PUT /applications/{id}
// ---------------------------------------------------------------------------

/// Update whitelisted fields. A status change appends a tracking entry.
pub async fn update_application(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(id): PathParam<DbId>,
    ValidJson(input): ValidJson<UpdateApplicationRequest>,
) -> AppResult<Json<ApplicationWithInternship>> {
    let update = input.into_update()?;
    let previous = ensure_owned_application(&state.pool, id, auth.user.id).await?;

    let application = ApplicationRepo::update(&state.pool, id, &update, auth.user.id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Application",
                id,
            })
        })?;

    if let Some(status) = update.status {
        if status.as_str() != previous.status {
            tracing::info!(
                application_id = id,
                from = %previous.status,
                to = %status,
                decided = status.is_final(),
                "Application status changed"
            );
        }
    }

    let internship = InternshipRepo::find_by_id(&state.pool, application.internship_id).await?;
    Ok(Json(ApplicationWithInternship {
        application,
        internship,
    }))
}

// ---------------------------------------------------------------------------
// DELETE /applications/{id}
// ---------------------------------------------------------------------------

pub async fn delete_application(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<MessageResponse>> {
    ensure_owned_application(&state.pool, id, auth.user.id).await?;

    if !ApplicationRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Application",
            id,
        }));
    }

    tracing::info!(application_id = id, user_id = auth.user.id, "Application deleted");
    Ok(Json(MessageResponse::new("Application deleted successfully")))
}
