//! Internship listing model and DTOs.

use chrono::NaiveDate;
use internhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An internship row from the `internships` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Internship {
    pub id: DbId,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub requirements: Option<String>,
    pub salary_range: Option<String>,
    pub duration: Option<String>,
    pub application_deadline: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new internship.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInternship {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub requirements: Option<String>,
    pub salary_range: Option<String>,
    pub duration: Option<String>,
    pub application_deadline: Option<NaiveDate>,
}

/// Substring filters for listing search. All present filters are ANDed.
///
/// Matching is case-sensitive. `query` is matched against title,
/// description and requirements.
#[derive(Debug, Clone, Default)]
pub struct InternshipFilter {
    pub query: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
}
