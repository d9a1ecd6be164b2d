//! Handlers for the `/internships` resource: search, fetch, create, apply.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use internhub_core::error::CoreError;
use internhub_core::pagination::Page;
use internhub_core::types::DbId;
use internhub_db::models::application::{ApplicationWithInternship, CreateApplication};
use internhub_db::models::internship::{CreateInternship, Internship, InternshipFilter};
use internhub_db::repositories::{ApplicationRepo, InternshipRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{trimmed, PathParam, QueryParams, ValidJson};
use crate::middleware::auth::AuthUser;
use crate::query::InternshipSearchParams;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /internships`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateInternshipRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub title: String,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub company: String,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub location: String,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub description: String,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub url: String,
    pub requirements: Option<String>,
    pub salary_range: Option<String>,
    pub duration: Option<String>,
    /// `YYYY-MM-DD`.
    pub application_deadline: Option<NaiveDate>,
}

impl From<CreateInternshipRequest> for CreateInternship {
    fn from(req: CreateInternshipRequest) -> Self {
        Self {
            title: req.title,
            company: req.company,
            location: Some(req.location),
            description: Some(req.description),
            url: Some(req.url),
            requirements: req.requirements,
            salary_range: req.salary_range,
            duration: req.duration,
            application_deadline: req.application_deadline,
        }
    }
}

/// Request body for `POST /internships/apply`.
#[derive(Debug, Deserialize, Validate)]
pub struct ApplyRequest {
    #[validate(required(message = "Internship ID is required"))]
    pub internship_id: Option<DbId>,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
    pub notes: Option<String>,
}

pub(crate) async fn ensure_internship_exists(
    pool: &sqlx::PgPool,
    id: DbId,
) -> AppResult<Internship> {
    InternshipRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Internship",
            id,
        })
    })
}

// ---------------------------------------------------------------------------
// GET /internships
// ---------------------------------------------------------------------------

/// Search listings. Public.
///
/// `query` matches title, description and requirements; `location` and
/// `company` are substring filters. All present filters must match.
pub async fn search_internships(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<InternshipSearchParams>,
) -> AppResult<Json<Page<Internship>>> {
    let page = params.page_request();
    let filter = InternshipFilter {
        query: params.query,
        location: params.location,
        company: params.company,
    };

    let (items, total) = InternshipRepo::search(&state.pool, &filter, page).await?;
    Ok(Json(Page::new(items, total, page)))
}

// ---------------------------------------------------------------------------
// GET /internships/{id}
// ---------------------------------------------------------------------------

pub async fn get_internship(
    State(state): State<AppState>,
    _auth: AuthUser,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<Internship>> {
    let internship = ensure_internship_exists(&state.pool, id).await?;
    Ok(Json(internship))
}

// ---------------------------------------------------------------------------
// POST /internships
// ---------------------------------------------------------------------------

pub async fn create_internship(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(input): ValidJson<CreateInternshipRequest>,
) -> AppResult<impl IntoResponse> {
    let internship = InternshipRepo::create(&state.pool, &input.into()).await?;

    tracing::info!(
        internship_id = internship.id,
        user_id = auth.user.id,
        "Internship created"
    );

    Ok((StatusCode::CREATED, Json(internship)))
}

// ---------------------------------------------------------------------------
// POST /internships/apply
// ---------------------------------------------------------------------------

/// Apply to a listing as the caller. One application per (user, listing).
pub async fn apply(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(input): ValidJson<ApplyRequest>,
) -> AppResult<impl IntoResponse> {
    let internship_id = input
        .internship_id
        .ok_or_else(|| AppError::BadRequest("Internship ID is required".into()))?;

    let internship = ensure_internship_exists(&state.pool, internship_id).await?;

    if ApplicationRepo::find_by_user_and_internship(&state.pool, auth.user.id, internship_id)
        .await?
        .is_some()
    {
        return Err(AppError::conflict("You have already applied to this internship"));
    }

    // The unique constraint still backstops a concurrent duplicate (409).
    let application = ApplicationRepo::create(
        &state.pool,
        &CreateApplication {
            user_id: auth.user.id,
            internship_id,
            cover_letter: input.cover_letter,
            resume_url: input.resume_url,
            notes: input.notes,
        },
    )
    .await?;

    tracing::info!(
        application_id = application.id,
        internship_id,
        user_id = auth.user.id,
        "Application submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApplicationWithInternship {
            application,
            internship: Some(internship),
        }),
    ))
}
