//! Comment service

use campus_core::entities::MAX_COMMENT_LENGTH;
use campus_core::{Action, Comment, DomainError, Principal, Snowflake, Target};
use tracing::{info, instrument};

use crate::dto::CommentResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::event::EventService;
use super::policy::PolicyService;

fn clean_content(content: &str) -> ServiceResult<String> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ServiceError::validation("Comment cannot be empty"));
    }
    if content.chars().count() > MAX_COMMENT_LENGTH {
        return Err(ServiceError::validation(format!(
            "Comment must be at most {MAX_COMMENT_LENGTH} characters"
        )));
    }
    Ok(content.to_string())
}

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Comments on an event, oldest first
    #[instrument(skip(self, principal), fields(user_id = %principal.id))]
    pub async fn list_comments(
        &self,
        principal: &Principal,
        event_id: Snowflake,
    ) -> ServiceResult<Vec<CommentResponse>> {
        EventService::new(self.ctx)
            .find_readable(principal, event_id)
            .await?;

        let comments = self.ctx.comment_repo().list_by_event(event_id).await?;
        Ok(comments.into_iter().map(CommentResponse::from).collect())
    }

    #[instrument(skip(self, principal, content), fields(user_id = %principal.id))]
    pub async fn add_comment(
        &self,
        principal: &Principal,
        event_id: Snowflake,
        content: &str,
    ) -> ServiceResult<CommentResponse> {
        let content = clean_content(content)?;
        EventService::new(self.ctx)
            .find_readable(principal, event_id)
            .await?;

        PolicyService::ensure(principal, Action::AddComment, Target::None)?;

        let comment = Comment::new(self.ctx.generate_id(), event_id, principal.id, content);
        self.ctx.comment_repo().create(&comment).await?;

        info!(comment_id = %comment.id, event_id = %event_id, "Comment added");
        Ok(CommentResponse::from(comment))
    }

    /// Only the author may edit
    #[instrument(skip(self, principal, content), fields(user_id = %principal.id))]
    pub async fn edit_comment(
        &self,
        principal: &Principal,
        comment_id: Snowflake,
        content: &str,
    ) -> ServiceResult<CommentResponse> {
        let content = clean_content(content)?;
        let mut comment = self.find_comment(comment_id).await?;

        PolicyService::ensure(principal, Action::EditComment, Target::Comment(&comment))?;

        comment.edit(content);
        self.ctx.comment_repo().update(&comment).await?;

        info!(comment_id = %comment_id, "Comment edited");
        Ok(CommentResponse::from(comment))
    }

    #[instrument(skip(self, principal), fields(user_id = %principal.id))]
    pub async fn delete_comment(
        &self,
        principal: &Principal,
        comment_id: Snowflake,
    ) -> ServiceResult<()> {
        let comment = self.find_comment(comment_id).await?;

        PolicyService::ensure(principal, Action::DeleteComment, Target::Comment(&comment))?;

        self.ctx.comment_repo().delete(comment_id).await?;

        info!(comment_id = %comment_id, "Comment deleted");
        Ok(())
    }

    async fn find_comment(&self, comment_id: Snowflake) -> ServiceResult<Comment> {
        self.ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| DomainError::CommentNotFound(comment_id).into())
    }
}
