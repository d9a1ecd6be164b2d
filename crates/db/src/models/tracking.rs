//! Application tracking (status audit log) model and DTOs.

use internhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// An immutable row from the `application_tracking` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApplicationTracking {
    pub id: DbId,
    pub application_id: DbId,
    pub status: String,
    pub notes: Option<String>,
    /// `None` once the acting user has been deleted.
    pub changed_by: Option<DbId>,
    pub changed_at: Timestamp,
}

/// DTO for appending a tracking entry.
#[derive(Debug, Clone)]
pub struct CreateTracking {
    pub application_id: DbId,
    pub status: String,
    pub notes: Option<String>,
    pub changed_by: DbId,
}
