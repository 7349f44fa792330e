//! Event entity - a scheduled happening scoped to the public, a university, or an RSO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::value_objects::Snowflake;

/// Audience of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Public,
    Private,
    Rso,
}

impl EventType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Rso => "rso",
        }
    }

    /// Status a newly created event of this type starts in.
    ///
    /// Only campus-wide public events go through moderation.
    pub const fn initial_status(self) -> EventStatus {
        match self {
            Self::Public => EventStatus::Pending,
            Self::Private | Self::Rso => EventStatus::Approved,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            "rso" => Ok(Self::Rso),
            other => Err(format!("unknown event type: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Pending,
    Approved,
    Rejected,
}

impl EventStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("unknown event status: {other}")),
        }
    }
}

/// Where an event takes place
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: Snowflake,
    pub name: String,
    pub description: Option<String>,
    pub date_time: DateTime<Utc>,
    pub location: Location,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub event_type: EventType,
    pub rso_id: Option<Snowflake>,
    pub university_id: Option<Snowflake>,
    pub created_by: Snowflake,
    pub status: EventStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    #[inline]
    pub fn is_creator(&self, user_id: Snowflake) -> bool {
        self.created_by == user_id
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == EventStatus::Pending
    }

    /// Whether this event sits in the moderation queue
    #[inline]
    pub fn is_pending_public(&self) -> bool {
        self.event_type == EventType::Public && self.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_status_by_type() {
        assert_eq!(EventType::Public.initial_status(), EventStatus::Pending);
        assert_eq!(EventType::Private.initial_status(), EventStatus::Approved);
        assert_eq!(EventType::Rso.initial_status(), EventStatus::Approved);
    }

    #[test]
    fn test_type_and_status_parse() {
        assert_eq!("rso".parse::<EventType>().unwrap(), EventType::Rso);
        assert!("campus".parse::<EventType>().is_err());
        assert_eq!(
            "rejected".parse::<EventStatus>().unwrap(),
            EventStatus::Rejected
        );
    }
}
