//! University entity

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct University {
    pub id: Snowflake,
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl University {
    pub fn new(id: Snowflake, name: String) -> Self {
        Self {
            id,
            name,
            location: None,
            description: None,
            created_at: Utc::now(),
        }
    }
}
