//! Event database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct EventModel {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub date_time: DateTime<Utc>,
    pub location_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub event_type: String,
    pub rso_id: Option<i64>,
    pub university_id: Option<i64>,
    pub created_by: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
