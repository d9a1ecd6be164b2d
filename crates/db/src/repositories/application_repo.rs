//! Repository for the `applications` table.

use internhub_core::application_status::{default_transition_note, ApplicationStatus};
use internhub_core::pagination::PageRequest;
use internhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::application::{Application, CreateApplication, UpdateApplication};
use crate::models::tracking::CreateTracking;
use crate::repositories::TrackingRepo;

const COLUMNS: &str = "id, user_id, internship_id, status, applied_date, cover_letter, \
    resume_url, notes, interview_date, created_at, updated_at";

/// Note recorded on the initial tracking entry.
pub const SUBMITTED_NOTE: &str = "Application submitted";

/// Provides CRUD operations for applications and keeps the tracking log in step.
pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Insert a new application in `submitted` state together with its first
    /// tracking entry, in one transaction.
    ///
    /// A second application for the same `(user_id, internship_id)` fails with
    /// a unique violation on `uq_applications_user_internship`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateApplication,
    ) -> Result<Application, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO applications
                (user_id, internship_id, status, cover_letter, resume_url, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let application = sqlx::query_as::<_, Application>(&query)
            .bind(input.user_id)
            .bind(input.internship_id)
            .bind(ApplicationStatus::Submitted.as_str())
            .bind(&input.cover_letter)
            .bind(&input.resume_url)
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        TrackingRepo::insert(
            &mut *tx,
            &CreateTracking {
                application_id: application.id,
                status: ApplicationStatus::Submitted.as_str().to_string(),
                notes: Some(SUBMITTED_NOTE.to_string()),
                changed_by: input.user_id,
            },
        )
        .await?;

        tx.commit().await?;
        Ok(application)
    }

    /// Find an application by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Application>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM applications WHERE id = $1");
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the application a user has submitted for a given internship, if any.
    pub async fn find_by_user_and_internship(
        pool: &PgPool,
        user_id: DbId,
        internship_id: DbId,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM applications WHERE user_id = $1 AND internship_id = $2"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(user_id)
            .bind(internship_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's applications, most recently applied first, optionally
    /// restricted to one status. Returns one page plus the total match count.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        status: Option<ApplicationStatus>,
        page: PageRequest,
    ) -> Result<(Vec<Application>, i64), sqlx::Error> {
        let status = status.map(|s| s.as_str());

        let total: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM applications \
             WHERE user_id = $1 AND ($2::TEXT IS NULL OR status = $2)",
        )
        .bind(user_id)
        .bind(status)
        .fetch_one(pool)
        .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM applications \
             WHERE user_id = $1 AND ($2::TEXT IS NULL OR status = $2) \
             ORDER BY applied_date DESC, id DESC \
             LIMIT $3 OFFSET $4"
        );
        let items = sqlx::query_as::<_, Application>(&query)
            .bind(user_id)
            .bind(status)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok((items, total.0))
    }

    /// Update an application. Only non-`None` fields in `input` are applied.
    ///
    /// When `input.status` differs from the stored status a tracking entry
    /// attributed to `changed_by` is appended in the same transaction. The row
    /// is locked for the duration so concurrent updates cannot both observe
    /// the old status.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateApplication,
        changed_by: DbId,
    ) -> Result<Option<Application>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let previous: Option<(String,)> =
            sqlx::query_as("SELECT status FROM applications WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((previous_status,)) = previous else {
            return Ok(None);
        };

        let query = format!(
            "UPDATE applications SET
                status = COALESCE($2, status),
                cover_letter = COALESCE($3, cover_letter),
                resume_url = COALESCE($4, resume_url),
                notes = COALESCE($5, notes),
                interview_date = COALESCE($6, interview_date)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let application = sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(input.status.map(|s| s.as_str()))
            .bind(&input.cover_letter)
            .bind(&input.resume_url)
            .bind(&input.notes)
            .bind(input.interview_date)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(status) = input.status {
            if status.as_str() != previous_status {
                let notes = input
                    .status_notes
                    .clone()
                    .unwrap_or_else(|| default_transition_note(status));
                TrackingRepo::insert(
                    &mut *tx,
                    &CreateTracking {
                        application_id: id,
                        status: status.as_str().to_string(),
                        notes: Some(notes),
                        changed_by,
                    },
                )
                .await?;
            }
        }

        tx.commit().await?;
        Ok(Some(application))
    }

    /// Hard-delete an application; its tracking rows cascade.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
