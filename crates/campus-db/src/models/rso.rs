//! RSO database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct RsoModel {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub university_id: i64,
    pub admin_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// RSO row joined with its membership count
#[derive(Debug, Clone, FromRow)]
pub struct RsoWithCountModel {
    #[sqlx(flatten)]
    pub rso: RsoModel,
    pub member_count: i64,
}
