//! Event, comment and rating mappers

use campus_core::entities::{Comment, Event, Location, Rating};
use campus_core::{DomainError, Snowflake};

use super::parse_column;
use crate::models::{CommentModel, EventModel, RatingModel};

impl TryFrom<EventModel> for Event {
    type Error = DomainError;

    fn try_from(model: EventModel) -> Result<Self, Self::Error> {
        Ok(Event {
            id: Snowflake::new(model.id),
            name: model.name,
            description: model.description,
            date_time: model.date_time,
            location: Location {
                name: model.location_name,
                latitude: model.latitude,
                longitude: model.longitude,
            },
            contact_phone: model.contact_phone,
            contact_email: model.contact_email,
            event_type: parse_column("events.event_type", &model.event_type)?,
            rso_id: model.rso_id.map(Snowflake::new),
            university_id: model.university_id.map(Snowflake::new),
            created_by: Snowflake::new(model.created_by),
            status: parse_column("events.status", &model.status)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Snowflake::new(model.id),
            event_id: Snowflake::new(model.event_id),
            user_id: Snowflake::new(model.user_id),
            content: model.content,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<RatingModel> for Rating {
    fn from(model: RatingModel) -> Self {
        Rating {
            event_id: Snowflake::new(model.event_id),
            user_id: Snowflake::new(model.user_id),
            rating: model.rating,
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::{EventStatus, EventType};
    use chrono::Utc;

    fn model(event_type: &str, status: &str) -> EventModel {
        EventModel {
            id: 1,
            name: "Hack Night".into(),
            description: None,
            date_time: Utc::now(),
            location_name: "Lab".into(),
            latitude: 1.5,
            longitude: -2.5,
            contact_phone: None,
            contact_email: None,
            event_type: event_type.into(),
            rso_id: Some(9),
            university_id: Some(3),
            created_by: 4,
            status: status.into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_event_row_maps() {
        let event = Event::try_from(model("rso", "approved")).unwrap();
        assert_eq!(event.event_type, EventType::Rso);
        assert_eq!(event.status, EventStatus::Approved);
        assert_eq!(event.rso_id, Some(Snowflake::new(9)));
        assert_eq!(event.location.latitude, 1.5);
    }

    #[test]
    fn test_unknown_enum_value_is_storage_error() {
        let err = Event::try_from(model("gala", "approved")).unwrap_err();
        assert!(matches!(err, DomainError::Storage(_)));
        assert!(err.to_string().contains("events.event_type"));
    }
}
