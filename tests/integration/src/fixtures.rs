//! Test fixtures and data generators
//!
//! Request and response shapes as a client sees them. The database outlives
//! a test run, so every generated email and name carries a per-run tag.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Tag that differs between test runs
pub fn run_tag() -> &'static str {
    static TAG: OnceLock<String> = OnceLock::new();
    TAG.get_or_init(|| format!("r{}", chrono::Utc::now().timestamp_micros()))
}

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A fresh email domain, so RSO founding sees only this test's users
pub fn unique_domain() -> String {
    format!("{}-{}.edu", run_tag(), unique_suffix())
}

pub const PASSWORD: &str = "CampusPass123";

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university_id: Option<String>,
}

impl RegisterRequest {
    pub fn new(email: &str, university_id: Option<&str>) -> Self {
        Self {
            username: format!("user{}", unique_suffix()),
            email: email.to_string(),
            password: PASSWORD.to_string(),
            university_id: university_id.map(String::from),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub university_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateUniversityRequest {
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl CreateUniversityRequest {
    pub fn unique() -> Self {
        Self {
            name: format!("Test University {} {}", run_tag(), unique_suffix()),
            location: Some("Orlando, FL".to_string()),
            description: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UniversityResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct LocationRequest {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub description: Option<String>,
    pub date_time: String,
    pub location: LocationRequest,
    pub event_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rso_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university_id: Option<String>,
}

impl CreateEventRequest {
    pub fn new(event_type: &str) -> Self {
        Self {
            name: format!("Event {}", unique_suffix()),
            description: Some("Integration test event".to_string()),
            date_time: "2030-03-01T18:00:00Z".to_string(),
            location: LocationRequest {
                name: "Student Union".to_string(),
                latitude: 28.6016,
                longitude: -81.2005,
            },
            event_type: event_type.to_string(),
            rso_id: None,
            university_id: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EventResponse {
    pub id: String,
    pub name: String,
    pub event_type: String,
    pub status: String,
    pub rso_id: Option<String>,
    pub university_id: Option<String>,
    pub created_by: String,
}

#[derive(Debug, Serialize)]
pub struct CreateRsoRequest {
    pub name: String,
    pub member_emails: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RsoResponse {
    pub id: String,
    pub name: String,
    pub status: String,
    pub university_id: String,
    pub admin_id: String,
    pub member_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreatedRsoResponse {
    pub rso: RsoResponse,
    pub founder_role: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub user_id: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct RatingListResponse {
    pub ratings: Vec<serde_json::Value>,
    pub average_rating: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}
