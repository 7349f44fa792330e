//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Ids are accepted as JSON strings or numbers.

use campus_core::{EventStatus, EventType, Snowflake};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    #[serde(default)]
    pub university_id: Option<Snowflake>,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

// ============================================================================
// University Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUniversityRequest {
    #[validate(length(min = 1, max = 200, message = "University name must be 1-200 characters"))]
    pub name: String,

    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
}

// ============================================================================
// Event Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LocationRequest {
    #[validate(length(min = 1, max = 200, message = "Location name must be 1-200 characters"))]
    pub name: String,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub longitude: f64,
}

/// Create event request
///
/// `rso_id` is required for RSO events and `university_id` for private
/// events. A public event without a university takes the creator's.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Event name must be 1-200 characters"))]
    pub name: String,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    pub date_time: DateTime<Utc>,

    #[validate(nested)]
    pub location: LocationRequest,

    #[validate(length(max = 32, message = "Contact phone must be at most 32 characters"))]
    pub contact_phone: Option<String>,

    #[validate(email(message = "Invalid contact email"))]
    pub contact_email: Option<String>,

    pub event_type: EventType,

    #[serde(default)]
    pub rso_id: Option<Snowflake>,

    #[serde(default)]
    pub university_id: Option<Snowflake>,
}

/// Update event request. Type, scope and status cannot change here.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Event name must be 1-200 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    pub date_time: Option<DateTime<Utc>>,

    #[validate(nested)]
    pub location: Option<LocationRequest>,

    #[validate(length(max = 32, message = "Contact phone must be at most 32 characters"))]
    pub contact_phone: Option<String>,

    #[validate(email(message = "Invalid contact email"))]
    pub contact_email: Option<String>,
}

/// Moderation decision; only `approved` and `rejected` are accepted
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetEventStatusRequest {
    pub status: EventStatus,
}

// ============================================================================
// RSO Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRsoRequest {
    #[validate(length(min = 1, max = 100, message = "RSO name must be 1-100 characters"))]
    pub name: String,

    /// Defaults to the founder's university
    #[serde(default)]
    pub university_id: Option<Snowflake>,

    /// Emails of the other founding members
    #[validate(length(max = 200, message = "At most 200 member emails"))]
    pub member_emails: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateRsoRequest {
    #[validate(length(min = 1, max = 100, message = "RSO name must be 1-100 characters"))]
    pub name: String,
}

// ============================================================================
// Comment and Rating Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentRequest {
    #[validate(length(min = 1, max = 1000, message = "Comment must be 1-1000 characters"))]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RatingRequest {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i16,
}
