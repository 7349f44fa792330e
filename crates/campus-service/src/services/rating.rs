//! Rating service
//!
//! One rating per user per event. Adding twice is a conflict; updating or
//! deleting a rating that does not exist is not found.

use campus_core::entities::validate_score;
use campus_core::{Action, DomainError, Principal, Rating, RatingSummary, Snowflake, Target};
use tracing::{info, instrument};

use crate::dto::{RatingListResponse, RatingResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::event::EventService;
use super::policy::PolicyService;

/// Rating service
pub struct RatingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RatingService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All ratings of an event with their mean
    #[instrument(skip(self, principal), fields(user_id = %principal.id))]
    pub async fn list_ratings(
        &self,
        principal: &Principal,
        event_id: Snowflake,
    ) -> ServiceResult<RatingListResponse> {
        self.readable_event(principal, event_id).await?;

        let ratings = self.ctx.rating_repo().list_by_event(event_id).await?;
        Ok(RatingSummary::from_ratings(ratings).into())
    }

    #[instrument(skip(self, principal), fields(user_id = %principal.id))]
    pub async fn add_rating(
        &self,
        principal: &Principal,
        event_id: Snowflake,
        score: i16,
    ) -> ServiceResult<RatingResponse> {
        let rating = Rating::new(event_id, principal.id, score)?;
        self.readable_event(principal, event_id).await?;

        PolicyService::ensure(principal, Action::AddRating, Target::OwnedBy(rating.user_id))?;

        self.ctx.rating_repo().create(&rating).await?;

        info!(event_id = %event_id, rating = score, "Rating added");
        Ok(RatingResponse::from(rating))
    }

    #[instrument(skip(self, principal), fields(user_id = %principal.id))]
    pub async fn update_rating(
        &self,
        principal: &Principal,
        event_id: Snowflake,
        score: i16,
    ) -> ServiceResult<RatingResponse> {
        validate_score(score)?;
        let mut rating = self.find_rating(principal, event_id).await?;

        PolicyService::ensure(principal, Action::UpdateRating, Target::OwnedBy(rating.user_id))?;

        rating.rating = score;
        self.ctx.rating_repo().update(&rating).await?;

        info!(event_id = %event_id, rating = score, "Rating updated");
        Ok(RatingResponse::from(rating))
    }

    #[instrument(skip(self, principal), fields(user_id = %principal.id))]
    pub async fn delete_rating(&self, principal: &Principal, event_id: Snowflake) -> ServiceResult<()> {
        let rating = self.find_rating(principal, event_id).await?;

        PolicyService::ensure(principal, Action::DeleteRating, Target::OwnedBy(rating.user_id))?;

        self.ctx
            .rating_repo()
            .delete(rating.event_id, rating.user_id)
            .await?;

        info!(event_id = %event_id, "Rating deleted");
        Ok(())
    }

    async fn readable_event(&self, principal: &Principal, event_id: Snowflake) -> ServiceResult<()> {
        EventService::new(self.ctx)
            .find_readable(principal, event_id)
            .await
            .map(|_| ())
    }

    async fn find_rating(&self, principal: &Principal, event_id: Snowflake) -> ServiceResult<Rating> {
        self.readable_event(principal, event_id).await?;
        self.ctx
            .rating_repo()
            .find(event_id, principal.id)
            .await?
            .ok_or_else(|| DomainError::RatingNotFound.into())
    }
}
