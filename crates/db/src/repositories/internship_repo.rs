//! Repository for the `internships` table.

use internhub_core::pagination::PageRequest;
use internhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::internship::{CreateInternship, Internship, InternshipFilter};

const COLUMNS: &str = "id, title, company, location, description, url, requirements, \
    salary_range, duration, application_deadline, created_at, updated_at";

/// Shared `WHERE` clause for search and count. `$1` = query, `$2` = location,
/// `$3` = company; a `NULL` parameter disables that filter.
///
/// `strpos` gives a literal, case-sensitive substring match (no LIKE wildcards).
const SEARCH_PREDICATE: &str = "\
    ($1::TEXT IS NULL \
        OR strpos(title, $1) > 0 \
        OR strpos(COALESCE(description, ''), $1) > 0 \
        OR strpos(COALESCE(requirements, ''), $1) > 0) \
    AND ($2::TEXT IS NULL OR strpos(COALESCE(location, ''), $2) > 0) \
    AND ($3::TEXT IS NULL OR strpos(company, $3) > 0)";

/// Provides CRUD and search operations for internship listings.
pub struct InternshipRepo;

impl InternshipRepo {
    /// Insert a new internship, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateInternship) -> Result<Internship, sqlx::Error> {
        let query = format!(
            "INSERT INTO internships
                (title, company, location, description, url, requirements,
                 salary_range, duration, application_deadline)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Internship>(&query)
            .bind(&input.title)
            .bind(&input.company)
            .bind(&input.location)
            .bind(&input.description)
            .bind(&input.url)
            .bind(&input.requirements)
            .bind(&input.salary_range)
            .bind(&input.duration)
            .bind(input.application_deadline)
            .fetch_one(pool)
            .await
    }

    /// Find an internship by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Internship>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM internships WHERE id = $1");
        sqlx::query_as::<_, Internship>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every internship whose id is in `ids` (order unspecified).
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Internship>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM internships WHERE id = ANY($1)");
        sqlx::query_as::<_, Internship>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Search listings, newest first, returning one page plus the total match count.
    ///
    /// Empty filter strings are treated as absent.
    pub async fn search(
        pool: &PgPool,
        filter: &InternshipFilter,
        page: PageRequest,
    ) -> Result<(Vec<Internship>, i64), sqlx::Error> {
        let query_text = non_empty(&filter.query);
        let location = non_empty(&filter.location);
        let company = non_empty(&filter.company);

        let count_sql = format!("SELECT COUNT(*) FROM internships WHERE {SEARCH_PREDICATE}");
        let total: (i64,) = sqlx::query_as(&count_sql)
            .bind(query_text)
            .bind(location)
            .bind(company)
            .fetch_one(pool)
            .await?;

        let sql = format!(
            "SELECT {COLUMNS} FROM internships WHERE {SEARCH_PREDICATE} \
             ORDER BY created_at DESC, id DESC \
             LIMIT $4 OFFSET $5"
        );
        let items = sqlx::query_as::<_, Internship>(&sql)
            .bind(query_text)
            .bind(location)
            .bind(company)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok((items, total.0))
    }

    /// Total number of listings.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM internships")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
