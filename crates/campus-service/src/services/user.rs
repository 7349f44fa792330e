//! User service
//!
//! Account lookups and deletion.

use campus_core::{Action, DomainError, Principal, Snowflake, Target};
use tracing::{info, instrument};

use crate::dto::CurrentUserResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::policy::PolicyService;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the principal's own account
    #[instrument(skip(self, principal), fields(user_id = %principal.id))]
    pub async fn get_current_user(&self, principal: &Principal) -> ServiceResult<CurrentUserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(principal.id)
            .await?
            .ok_or(DomainError::UserNotFound(principal.id))?;

        Ok(CurrentUserResponse::from(&user))
    }

    /// Delete an account.
    ///
    /// Users may delete themselves; super admins may delete anyone except
    /// another super admin.
    #[instrument(skip(self, principal), fields(actor_id = %principal.id))]
    pub async fn delete_user(&self, principal: &Principal, user_id: Snowflake) -> ServiceResult<()> {
        let target = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        PolicyService::ensure(
            principal,
            Action::DeleteUser,
            Target::Account {
                id: target.id,
                role: target.role,
            },
        )?;

        self.ctx.user_repo().delete(user_id).await?;

        info!(user_id = %user_id, "User deleted");
        Ok(())
    }
}
