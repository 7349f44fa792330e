//! Domain errors - the single failure taxonomy shared by every layer

use thiserror::Error;

use crate::entities::EventStatus;
use crate::value_objects::Snowflake;

/// Coarse classification that callers map to transport status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthenticated,
    Forbidden,
    Validation,
    NotFound,
    Conflict,
    Storage,
}

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Authentication
    // =========================================================================
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    // =========================================================================
    // Authorization
    // =========================================================================
    #[error("Forbidden: {0}")]
    Forbidden(String),

    // =========================================================================
    // Validation
    // =========================================================================
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Some members not found: {}", emails.join(", "))]
    MissingMembers { emails: Vec<String> },

    // =========================================================================
    // Not Found
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("University not found: {0}")]
    UniversityNotFound(Snowflake),

    #[error("RSO not found: {0}")]
    RsoNotFound(Snowflake),

    #[error("Event not found: {0}")]
    EventNotFound(Snowflake),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    #[error("Rating not found")]
    RatingNotFound,

    // =========================================================================
    // Conflict
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("University name already in use")]
    UniversityNameTaken,

    #[error("Already a member of this RSO")]
    AlreadyMember,

    #[error("You have already rated this event")]
    AlreadyRated,

    #[error("Event is not pending (current status: {current})")]
    EventNotPending { current: EventStatus },

    #[error("Cannot delete {0}: it is still referenced")]
    StillReferenced(&'static str),

    // =========================================================================
    // Storage
    // =========================================================================
    #[error("Database error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden(reason.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthenticated | Self::InvalidCredentials | Self::InvalidToken | Self::TokenExpired => {
                ErrorKind::Unauthenticated
            }
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::Validation(_) | Self::MissingMembers { .. } => ErrorKind::Validation,
            Self::UserNotFound(_)
            | Self::UniversityNotFound(_)
            | Self::RsoNotFound(_)
            | Self::EventNotFound(_)
            | Self::CommentNotFound(_)
            | Self::RatingNotFound => ErrorKind::NotFound,
            Self::EmailAlreadyExists
            | Self::UniversityNameTaken
            | Self::AlreadyMember
            | Self::AlreadyRated
            | Self::EventNotPending { .. }
            | Self::StillReferenced(_) => ErrorKind::Conflict,
            Self::Storage(_) | Self::Internal(_) => ErrorKind::Storage,
        }
    }

    /// Stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",

            Self::Forbidden(_) => "FORBIDDEN",

            Self::Validation(_) => "VALIDATION_ERROR",
            Self::MissingMembers { .. } => "MEMBERS_NOT_FOUND",

            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::UniversityNotFound(_) => "UNKNOWN_UNIVERSITY",
            Self::RsoNotFound(_) => "UNKNOWN_RSO",
            Self::EventNotFound(_) => "UNKNOWN_EVENT",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::RatingNotFound => "UNKNOWN_RATING",

            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::UniversityNameTaken => "UNIVERSITY_NAME_TAKEN",
            Self::AlreadyMember => "ALREADY_MEMBER",
            Self::AlreadyRated => "ALREADY_RATED",
            Self::EventNotPending { .. } => "EVENT_NOT_PENDING",
            Self::StillReferenced(_) => "STILL_REFERENCED",

            Self::Storage(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    pub fn is_authorization(&self) -> bool {
        self.kind() == ErrorKind::Forbidden
    }

    pub fn is_authentication(&self) -> bool {
        self.kind() == ErrorKind::Unauthenticated
    }

    pub fn is_conflict(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }
}
