//! PostgreSQL implementation of RsoRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use campus_core::entities::{Rso, RsoMembership, RsoSummary};
use campus_core::error::DomainError;
use campus_core::membership::RsoCreationPlan;
use campus_core::traits::{RepoResult, RsoRepository};
use campus_core::value_objects::Snowflake;

use crate::models::{RsoModel, RsoWithCountModel};

use super::error::{map_db_error, map_unique_violation};

const SUMMARY_SELECT: &str = r"
    SELECT r.id, r.name, r.status, r.university_id, r.admin_id, r.created_at, r.updated_at,
           (SELECT COUNT(*) FROM rso_memberships m WHERE m.rso_id = r.id) AS member_count
    FROM rsos r
";

#[derive(Clone)]
pub struct PgRsoRepository {
    pool: PgPool,
}

impl PgRsoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_summaries(
        &self,
        filter_and_order: &str,
        first: i64,
        second: Option<i64>,
    ) -> RepoResult<Vec<RsoSummary>> {
        let sql = format!("{SUMMARY_SELECT} {filter_and_order}");
        let mut query = sqlx::query_as::<_, RsoWithCountModel>(&sql).bind(first);
        if let Some(second) = second {
            query = query.bind(second);
        }
        let rows = query.fetch_all(&self.pool).await.map_err(map_db_error)?;
        rows.into_iter().map(RsoSummary::try_from).collect()
    }
}

#[async_trait]
impl RsoRepository for PgRsoRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Rso>> {
        let row = sqlx::query_as::<_, RsoModel>(
            r"
            SELECT id, name, status, university_id, admin_id, created_at, updated_at
            FROM rsos
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(Rso::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_summary(&self, id: Snowflake) -> RepoResult<Option<RsoSummary>> {
        let mut rows = self
            .fetch_summaries("WHERE r.id = $1", id.into_inner(), None)
            .await?;
        Ok(rows.pop())
    }

    #[instrument(skip(self, plan), fields(rso_id = %plan.rso.id, members = plan.member_ids.len()))]
    async fn create_with_members(&self, plan: &RsoCreationPlan) -> RepoResult<()> {
        let rso = &plan.rso;
        let member_ids: Vec<i64> = plan.member_ids.iter().map(|id| id.into_inner()).collect();

        // Dropping `tx` before commit rolls every statement back.
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO rsos (id, name, status, university_id, admin_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(rso.id.into_inner())
        .bind(&rso.name)
        .bind(rso.status.as_str())
        .bind(rso.university_id.into_inner())
        .bind(rso.admin_id.into_inner())
        .bind(rso.created_at)
        .bind(rso.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO rso_memberships (rso_id, student_id, joined_at)
            SELECT $1, member_id, NOW() FROM UNNEST($2::BIGINT[]) AS t(member_id)
            ",
        )
        .bind(rso.id.into_inner())
        .bind(&member_ids)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyMember))?;

        if let Some(change) = plan.role_change {
            // Only ever upgrades; a concurrent promotion leaves nothing to do.
            let result = sqlx::query(
                r"
                UPDATE users
                SET role = $2, updated_at = NOW()
                WHERE id = $1 AND role = 'student'
                ",
            )
            .bind(change.user_id.into_inner())
            .bind(change.new_role.as_str())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
            debug!(promoted = result.rows_affected(), "Applied founder role change");
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self), fields(rso_id = %rso.id))]
    async fn update(&self, rso: &Rso) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE rsos
            SET name = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(rso.id.into_inner())
        .bind(&rso.name)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::RsoNotFound(rso.id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM rsos WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::RsoNotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn is_member(&self, rso_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM rso_memberships WHERE rso_id = $1 AND student_id = $2)
            ",
        )
        .bind(rso_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn add_member(&self, membership: &RsoMembership) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO rso_memberships (rso_id, student_id, joined_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(membership.rso_id.into_inner())
        .bind(membership.student_id.into_inner())
        .bind(membership.joined_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyMember))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn member_rso_ids(&self, user_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT rso_id FROM rso_memberships WHERE student_id = $1",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(Snowflake::new).collect())
    }

    #[instrument(skip(self))]
    async fn list_administered(&self, admin_id: Snowflake) -> RepoResult<Vec<RsoSummary>> {
        self.fetch_summaries(
            "WHERE r.admin_id = $1 ORDER BY r.name, r.id",
            admin_id.into_inner(),
            None,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn list_for_member(&self, user_id: Snowflake) -> RepoResult<Vec<RsoSummary>> {
        self.fetch_summaries(
            r"
            JOIN rso_memberships me ON me.rso_id = r.id AND me.student_id = $1
            ORDER BY r.status = 'active' DESC, r.name, r.id
            ",
            user_id.into_inner(),
            None,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn list_joinable(
        &self,
        user_id: Snowflake,
        university_id: Snowflake,
    ) -> RepoResult<Vec<RsoSummary>> {
        self.fetch_summaries(
            r"
            WHERE r.university_id = $2
              AND NOT EXISTS (
                  SELECT 1 FROM rso_memberships me
                  WHERE me.rso_id = r.id AND me.student_id = $1
              )
            ORDER BY r.name, r.id
            ",
            user_id.into_inner(),
            Some(university_id.into_inner()),
        )
        .await
    }
}
