//! PostgreSQL implementation of UniversityRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use campus_core::entities::University;
use campus_core::error::DomainError;
use campus_core::traits::{RepoResult, UniversityRepository};
use campus_core::value_objects::Snowflake;

use crate::models::UniversityModel;

use super::error::{map_db_error, map_fk_violation, map_unique_violation};

#[derive(Clone)]
pub struct PgUniversityRepository {
    pool: PgPool,
}

impl PgUniversityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UniversityRepository for PgUniversityRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<University>> {
        let row = sqlx::query_as::<_, UniversityModel>(
            r"
            SELECT id, name, location, description, created_at
            FROM universities
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(University::from))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<University>> {
        let rows = sqlx::query_as::<_, UniversityModel>(
            r"
            SELECT id, name, location, description, created_at
            FROM universities
            ORDER BY name
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(University::from).collect())
    }

    #[instrument(skip(self), fields(university_id = %university.id))]
    async fn create(&self, university: &University) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO universities (id, name, location, description, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(university.id.into_inner())
        .bind(&university.name)
        .bind(&university.location)
        .bind(&university.description)
        .bind(university.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::UniversityNameTaken))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM universities WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(|e| map_fk_violation(e, || DomainError::StillReferenced("university")))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UniversityNotFound(id));
        }
        Ok(())
    }
}
