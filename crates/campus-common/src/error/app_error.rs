//! Application error type shared by the service and transport layers

use campus_core::{DomainError, ErrorKind};
use serde::Serialize;
use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Missing authentication")]
    MissingAuth,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::InvalidCredentials | Self::InvalidToken | Self::TokenExpired | Self::MissingAuth => {
                401
            }
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::RateLimitExceeded => 429,
            Self::Database(_) | Self::Internal(_) | Self::Config(_) => 500,
            Self::Domain(e) => Self::status_code_for(e),
        }
    }

    /// HTTP status for a domain error, by its kind
    #[must_use]
    pub fn status_code_for(err: &DomainError) -> u16 {
        match err.kind() {
            ErrorKind::Validation => 400,
            ErrorKind::Unauthenticated => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::Storage => 500,
        }
    }

    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::MissingAuth => "MISSING_AUTH",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Body of an error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        let details = match err {
            AppError::Domain(DomainError::MissingMembers { emails }) => {
                Some(serde_json::json!({ "missing_emails": emails }))
            }
            AppError::Domain(DomainError::EventNotPending { current }) => {
                Some(serde_json::json!({ "current_status": current }))
            }
            _ => None,
        };
        // Never leak internal error chains to clients.
        let message = if err.is_server_error() {
            "Internal server error".to_string()
        } else {
            err.to_string()
        };
        Self {
            code: err.error_code().to_string(),
            message,
            details,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::{EventStatus, Snowflake};

    #[test]
    fn test_domain_status_codes() {
        let cases = [
            (DomainError::InvalidToken, 401),
            (DomainError::forbidden("no"), 403),
            (DomainError::validation("bad"), 400),
            (DomainError::EventNotFound(Snowflake::new(1)), 404),
            (DomainError::AlreadyRated, 409),
            (DomainError::Storage("down".into()), 500),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_missing_members_details() {
        let err = AppError::from(DomainError::MissingMembers {
            emails: vec!["x@uni.edu".into()],
        });
        let body = ErrorResponse::from(&err);
        assert_eq!(body.code, "MEMBERS_NOT_FOUND");
        assert_eq!(
            body.details,
            Some(serde_json::json!({ "missing_emails": ["x@uni.edu"] }))
        );
    }

    #[test]
    fn test_not_pending_details() {
        let err = AppError::from(DomainError::EventNotPending {
            current: EventStatus::Approved,
        });
        let body = ErrorResponse::from(&err);
        assert_eq!(body.details, Some(serde_json::json!({ "current_status": "approved" })));
    }

    #[test]
    fn test_server_errors_are_masked() {
        let body = ErrorResponse::from(&AppError::Database("password=hunter2".into()));
        assert_eq!(body.code, "DATABASE_ERROR");
        assert_eq!(body.message, "Internal server error");
    }
}
