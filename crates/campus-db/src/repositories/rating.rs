//! PostgreSQL implementation of RatingRepository
//!
//! Ratings are keyed by `(event_id, user_id)`, so the primary key enforces
//! one rating per user per event.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use campus_core::entities::Rating;
use campus_core::error::DomainError;
use campus_core::traits::{RatingRepository, RepoResult};
use campus_core::value_objects::Snowflake;

use crate::models::RatingModel;

use super::error::{map_db_error, map_unique_violation};

#[derive(Clone)]
pub struct PgRatingRepository {
    pool: PgPool,
}

impl PgRatingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingRepository for PgRatingRepository {
    #[instrument(skip(self))]
    async fn find(&self, event_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Rating>> {
        let row = sqlx::query_as::<_, RatingModel>(
            r"
            SELECT event_id, user_id, rating, created_at
            FROM ratings
            WHERE event_id = $1 AND user_id = $2
            ",
        )
        .bind(event_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(Rating::from))
    }

    #[instrument(skip(self))]
    async fn list_by_event(&self, event_id: Snowflake) -> RepoResult<Vec<Rating>> {
        let rows = sqlx::query_as::<_, RatingModel>(
            r"
            SELECT event_id, user_id, rating, created_at
            FROM ratings
            WHERE event_id = $1
            ORDER BY created_at ASC, user_id ASC
            ",
        )
        .bind(event_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Rating::from).collect())
    }

    #[instrument(skip(self, rating), fields(event_id = %rating.event_id, user_id = %rating.user_id))]
    async fn create(&self, rating: &Rating) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO ratings (event_id, user_id, rating, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(rating.event_id.into_inner())
        .bind(rating.user_id.into_inner())
        .bind(rating.rating)
        .bind(rating.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyRated))?;

        Ok(())
    }

    #[instrument(skip(self, rating), fields(event_id = %rating.event_id, user_id = %rating.user_id))]
    async fn update(&self, rating: &Rating) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE ratings SET rating = $3 WHERE event_id = $1 AND user_id = $2",
        )
        .bind(rating.event_id.into_inner())
        .bind(rating.user_id.into_inner())
        .bind(rating.rating)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::RatingNotFound);
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, event_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM ratings WHERE event_id = $1 AND user_id = $2")
            .bind(event_id.into_inner())
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::RatingNotFound);
        }
        Ok(())
    }
}
