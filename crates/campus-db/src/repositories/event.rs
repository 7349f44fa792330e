//! PostgreSQL implementation of EventRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use campus_core::entities::{Event, EventStatus};
use campus_core::error::DomainError;
use campus_core::traits::{EventRepository, RepoResult};
use campus_core::value_objects::Snowflake;

use crate::models::EventModel;

use super::error::map_db_error;

const EVENT_COLUMNS: &str = r"
    id, name, description, date_time, location_name, latitude, longitude,
    contact_phone, contact_email, event_type, rso_id, university_id, created_by,
    status, created_at, updated_at
";

#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_events(rows: Vec<EventModel>) -> RepoResult<Vec<Event>> {
    rows.into_iter().map(Event::try_from).collect()
}

#[async_trait]
impl EventRepository for PgEventRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Event>> {
        let row = sqlx::query_as::<_, EventModel>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(Event::try_from).transpose()
    }

    #[instrument(skip(self, event), fields(event_id = %event.id, event_type = %event.event_type))]
    async fn create(&self, event: &Event) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO events (
                id, name, description, date_time, location_name, latitude, longitude,
                contact_phone, contact_email, event_type, rso_id, university_id, created_by,
                status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            ",
        )
        .bind(event.id.into_inner())
        .bind(&event.name)
        .bind(&event.description)
        .bind(event.date_time)
        .bind(&event.location.name)
        .bind(event.location.latitude)
        .bind(event.location.longitude)
        .bind(&event.contact_phone)
        .bind(&event.contact_email)
        .bind(event.event_type.as_str())
        .bind(event.rso_id.map(Snowflake::into_inner))
        .bind(event.university_id.map(Snowflake::into_inner))
        .bind(event.created_by.into_inner())
        .bind(event.status.as_str())
        .bind(event.created_at)
        .bind(event.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn update(&self, event: &Event) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE events
            SET name = $2, description = $3, date_time = $4, location_name = $5,
                latitude = $6, longitude = $7, contact_phone = $8, contact_email = $9,
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(event.id.into_inner())
        .bind(&event.name)
        .bind(&event.description)
        .bind(event.date_time)
        .bind(&event.location.name)
        .bind(event.location.latitude)
        .bind(event.location.longitude)
        .bind(&event.contact_phone)
        .bind(&event.contact_email)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::EventNotFound(event.id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::EventNotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self, rso_ids), fields(rso_count = rso_ids.len()))]
    async fn find_visible_candidates(
        &self,
        university_id: Option<Snowflake>,
        rso_ids: &[Snowflake],
    ) -> RepoResult<Vec<Event>> {
        let rso_ids: Vec<i64> = rso_ids.iter().map(|id| id.into_inner()).collect();
        let rows = sqlx::query_as::<_, EventModel>(&format!(
            r"
            SELECT {EVENT_COLUMNS}
            FROM events
            WHERE status = 'approved'
              AND (
                    (event_type = 'rso' AND rso_id = ANY($2))
                 OR (event_type IN ('public', 'private') AND university_id = $1)
              )
            ORDER BY date_time ASC, id ASC
            "
        ))
        .bind(university_id.map(Snowflake::into_inner))
        .bind(&rso_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_events(rows)
    }

    #[instrument(skip(self))]
    async fn find_pending_public(&self) -> RepoResult<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventModel>(&format!(
            r"
            SELECT {EVENT_COLUMNS}
            FROM events
            WHERE event_type = 'public' AND status = 'pending'
            ORDER BY date_time ASC, id ASC
            "
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_events(rows)
    }

    #[instrument(skip(self))]
    async fn transition_status(
        &self,
        id: Snowflake,
        from: EventStatus,
        to: EventStatus,
    ) -> RepoResult<bool> {
        // Conditional on the current status so concurrent reviewers cannot both win.
        let result = sqlx::query(
            r"
            UPDATE events
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status = $2
            ",
        )
        .bind(id.into_inner())
        .bind(from.as_str())
        .bind(to.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }
}
