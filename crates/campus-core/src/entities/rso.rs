//! RSO entity - a Recognized Student Organization and its memberships

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::value_objects::Snowflake;

/// Member count (founder included) at which an RSO is active
pub const RSO_ACTIVE_THRESHOLD: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsoStatus {
    Active,
    Inactive,
}

impl RsoStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    /// Status implied by a member count
    pub const fn for_member_count(count: usize) -> Self {
        if count >= RSO_ACTIVE_THRESHOLD {
            Self::Active
        } else {
            Self::Inactive
        }
    }
}

impl fmt::Display for RsoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RsoStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(format!("unknown RSO status: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rso {
    pub id: Snowflake,
    pub name: String,
    pub status: RsoStatus,
    pub university_id: Snowflake,
    pub admin_id: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rso {
    pub fn new(
        id: Snowflake,
        name: String,
        status: RsoStatus,
        university_id: Snowflake,
        admin_id: Snowflake,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            status,
            university_id,
            admin_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_admin(&self, user_id: Snowflake) -> bool {
        self.admin_id == user_id
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == RsoStatus::Active
    }

    pub fn rename(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }
}

/// An RSO together with its current member count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsoSummary {
    pub rso: Rso,
    pub member_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsoMembership {
    pub rso_id: Snowflake,
    pub student_id: Snowflake,
    pub joined_at: DateTime<Utc>,
}

impl RsoMembership {
    pub fn new(rso_id: Snowflake, student_id: Snowflake) -> Self {
        Self {
            rso_id,
            student_id,
            joined_at: Utc::now(),
        }
    }
}
