//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use campus_core::{
    Comment, Event, Rating, RatingSummary, RsoMembership, RsoSummary, University, User,
};

use super::responses::{
    CommentResponse, CurrentUserResponse, EventResponse, LocationResponse, MembershipResponse,
    RatingListResponse, RatingResponse, RsoResponse, UniversityResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            university_id: user.university_id.map(|id| id.to_string()),
            created_at: user.created_at,
        }
    }
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// University Mappers
// ============================================================================

impl From<University> for UniversityResponse {
    fn from(university: University) -> Self {
        Self {
            id: university.id.to_string(),
            name: university.name,
            location: university.location,
            description: university.description,
            created_at: university.created_at,
        }
    }
}

// ============================================================================
// Event Mappers
// ============================================================================

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id.to_string(),
            name: event.name,
            description: event.description,
            date_time: event.date_time,
            location: LocationResponse {
                name: event.location.name,
                latitude: event.location.latitude,
                longitude: event.location.longitude,
            },
            contact_phone: event.contact_phone,
            contact_email: event.contact_email,
            event_type: event.event_type,
            rso_id: event.rso_id.map(|id| id.to_string()),
            university_id: event.university_id.map(|id| id.to_string()),
            created_by: event.created_by.to_string(),
            status: event.status,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

// ============================================================================
// RSO Mappers
// ============================================================================

impl From<RsoSummary> for RsoResponse {
    fn from(summary: RsoSummary) -> Self {
        let rso = summary.rso;
        Self {
            id: rso.id.to_string(),
            name: rso.name,
            status: rso.status,
            university_id: rso.university_id.to_string(),
            admin_id: rso.admin_id.to_string(),
            member_count: summary.member_count,
            created_at: rso.created_at,
        }
    }
}

impl From<RsoMembership> for MembershipResponse {
    fn from(membership: RsoMembership) -> Self {
        Self {
            rso_id: membership.rso_id.to_string(),
            user_id: membership.student_id.to_string(),
            joined_at: membership.joined_at,
        }
    }
}

// ============================================================================
// Comment and Rating Mappers
// ============================================================================

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            event_id: comment.event_id.to_string(),
            user_id: comment.user_id.to_string(),
            content: comment.content,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

impl From<Rating> for RatingResponse {
    fn from(rating: Rating) -> Self {
        Self {
            event_id: rating.event_id.to_string(),
            user_id: rating.user_id.to_string(),
            rating: rating.rating,
            created_at: rating.created_at,
        }
    }
}

impl From<RatingSummary> for RatingListResponse {
    fn from(summary: RatingSummary) -> Self {
        Self {
            ratings: summary.ratings.into_iter().map(RatingResponse::from).collect(),
            average_rating: summary.average,
        }
    }
}
