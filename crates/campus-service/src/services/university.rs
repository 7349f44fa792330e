//! University service

use campus_core::{Action, DomainError, Principal, Snowflake, Target, University};
use tracing::{info, instrument};

use crate::dto::{CreateUniversityRequest, UniversityResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::policy::PolicyService;

/// University service
pub struct UniversityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UniversityService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, principal, request), fields(actor_id = %principal.id))]
    pub async fn create_university(
        &self,
        principal: &Principal,
        request: CreateUniversityRequest,
    ) -> ServiceResult<UniversityResponse> {
        PolicyService::ensure(principal, Action::CreateUniversity, Target::None)?;

        let name = request.name.trim();
        if name.is_empty() {
            return Err(ServiceError::validation("University name cannot be blank"));
        }

        let mut university = University::new(self.ctx.generate_id(), name.to_string());
        university.location = request.location;
        university.description = request.description;

        self.ctx.university_repo().create(&university).await?;

        info!(university_id = %university.id, name = %university.name, "University created");
        Ok(UniversityResponse::from(university))
    }

    #[instrument(skip(self))]
    pub async fn list_universities(&self) -> ServiceResult<Vec<UniversityResponse>> {
        let universities = self.ctx.university_repo().list().await?;
        Ok(universities.into_iter().map(UniversityResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_university(&self, university_id: Snowflake) -> ServiceResult<UniversityResponse> {
        let university = self
            .ctx
            .university_repo()
            .find_by_id(university_id)
            .await?
            .ok_or(DomainError::UniversityNotFound(university_id))?;
        Ok(UniversityResponse::from(university))
    }

    /// Delete a university that nothing references any more
    #[instrument(skip(self, principal), fields(actor_id = %principal.id))]
    pub async fn delete_university(
        &self,
        principal: &Principal,
        university_id: Snowflake,
    ) -> ServiceResult<()> {
        PolicyService::ensure(principal, Action::DeleteUniversity, Target::None)?;

        self.ctx.university_repo().delete(university_id).await?;

        info!(university_id = %university_id, "University deleted");
        Ok(())
    }
}
