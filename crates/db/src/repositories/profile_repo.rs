//! Repository for the `user_profiles` table.

use internhub_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::profile::{UpdateUserProfile, UserProfile};

const COLUMNS: &str = "id, user_id, first_name, last_name, phone, linkedin_url, github_url, \
    portfolio_url, skills, education, experience, bio, avatar_url, created_at, updated_at";

/// Provides read and update operations for user profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Create an empty profile for `user_id` inside an open transaction.
    pub(crate) async fn insert_empty(
        conn: &mut PgConnection,
        user_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO user_profiles (user_id) VALUES ($1)")
            .bind(user_id)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Find the profile belonging to `user_id`.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_profiles WHERE user_id = $1");
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Return the profile for `user_id`, creating an empty one first if absent.
    ///
    /// Safe under concurrent first reads: the unique constraint on `user_id`
    /// turns the losing insert into a no-op.
    pub async fn get_or_create(pool: &PgPool, user_id: DbId) -> Result<UserProfile, sqlx::Error> {
        sqlx::query("INSERT INTO user_profiles (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(pool)
            .await?;

        let query = format!("SELECT {COLUMNS} FROM user_profiles WHERE user_id = $1");
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Apply the whitelisted profile fields. Only non-`None` fields are written.
    ///
    /// The profile is materialized first if it does not exist yet.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateUserProfile,
    ) -> Result<UserProfile, sqlx::Error> {
        Self::get_or_create(pool, user_id).await?;

        let query = format!(
            "UPDATE user_profiles SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                phone = COALESCE($4, phone),
                linkedin_url = COALESCE($5, linkedin_url),
                github_url = COALESCE($6, github_url),
                portfolio_url = COALESCE($7, portfolio_url),
                skills = COALESCE($8, skills),
                education = COALESCE($9, education),
                experience = COALESCE($10, experience),
                bio = COALESCE($11, bio),
                avatar_url = COALESCE($12, avatar_url)
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.phone)
            .bind(&input.linkedin_url)
            .bind(&input.github_url)
            .bind(&input.portfolio_url)
            .bind(&input.skills)
            .bind(&input.education)
            .bind(&input.experience)
            .bind(&input.bio)
            .bind(&input.avatar_url)
            .fetch_one(pool)
            .await
    }
}
