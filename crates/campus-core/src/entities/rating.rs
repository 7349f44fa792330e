//! Rating entity - one score per user per event

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rating {
    pub event_id: Snowflake,
    pub user_id: Snowflake,
    pub rating: i16,
    pub created_at: DateTime<Utc>,
}

impl Rating {
    /// Build a rating, rejecting scores outside `1..=5`
    pub fn new(event_id: Snowflake, user_id: Snowflake, rating: i16) -> Result<Self, DomainError> {
        validate_score(rating)?;
        Ok(Self {
            event_id,
            user_id,
            rating,
            created_at: Utc::now(),
        })
    }
}

pub fn validate_score(rating: i16) -> Result<(), DomainError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(DomainError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}"
        )))
    }
}

/// All ratings for an event plus their mean
#[derive(Debug, Clone, PartialEq)]
pub struct RatingSummary {
    pub ratings: Vec<Rating>,
    pub average: Option<f64>,
}

impl RatingSummary {
    pub fn from_ratings(ratings: Vec<Rating>) -> Self {
        let average = if ratings.is_empty() {
            None
        } else {
            let total: f64 = ratings.iter().map(|r| f64::from(r.rating)).sum();
            Some(total / ratings.len() as f64)
        };
        Self { ratings, average }
    }
}
