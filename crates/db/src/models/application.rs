//! Application model and DTOs.

use internhub_core::application_status::ApplicationStatus;
use internhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::internship::Internship;
use crate::models::tracking::ApplicationTracking;

/// An application row from the `applications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Application {
    pub id: DbId,
    pub user_id: DbId,
    pub internship_id: DbId,
    pub status: String,
    pub applied_date: Timestamp,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
    pub notes: Option<String>,
    pub interview_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An application with the listing it refers to embedded.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationWithInternship {
    #[serde(flatten)]
    pub application: Application,
    pub internship: Option<Internship>,
}

/// Full application view: listing plus status history (oldest first).
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationDetail {
    #[serde(flatten)]
    pub application: Application,
    pub internship: Option<Internship>,
    pub tracking: Vec<ApplicationTracking>,
}

/// DTO for creating a new application. Status always starts as `submitted`.
#[derive(Debug, Clone)]
pub struct CreateApplication {
    pub user_id: DbId,
    pub internship_id: DbId,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
    pub notes: Option<String>,
}

/// DTO for updating an application. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct UpdateApplication {
    pub status: Option<ApplicationStatus>,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
    pub notes: Option<String>,
    pub interview_date: Option<Timestamp>,
    /// Note recorded on the tracking entry when `status` changes.
    pub status_notes: Option<String>,
}
