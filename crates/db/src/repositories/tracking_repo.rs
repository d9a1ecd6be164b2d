//! Repository for the append-only `application_tracking` table.

use internhub_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::tracking::{ApplicationTracking, CreateTracking};

const COLUMNS: &str = "id, application_id, status, notes, changed_by, changed_at";

/// Provides append and read operations for status history.
///
/// Rows are never updated; they are removed only by cascade when their
/// application is deleted.
pub struct TrackingRepo;

impl TrackingRepo {
    /// Append a tracking entry on an open connection or transaction.
    pub async fn insert(
        conn: &mut PgConnection,
        input: &CreateTracking,
    ) -> Result<ApplicationTracking, sqlx::Error> {
        let query = format!(
            "INSERT INTO application_tracking (application_id, status, notes, changed_by)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApplicationTracking>(&query)
            .bind(input.application_id)
            .bind(&input.status)
            .bind(&input.notes)
            .bind(input.changed_by)
            .fetch_one(conn)
            .await
    }

    /// Full history for an application, oldest first.
    pub async fn list_for_application(
        pool: &PgPool,
        application_id: DbId,
    ) -> Result<Vec<ApplicationTracking>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM application_tracking
             WHERE application_id = $1
             ORDER BY changed_at ASC, id ASC"
        );
        sqlx::query_as::<_, ApplicationTracking>(&query)
            .bind(application_id)
            .fetch_all(pool)
            .await
    }
}
