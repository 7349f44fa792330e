//! RSO service
//!
//! Founding, joining, and administering Registered Student Organizations.

use campus_core::membership::{check_join, normalize_member_emails, plan_rso_creation};
use campus_core::{Action, DomainError, Principal, Rso, RsoMembership, Snowflake, Target};
use tracing::{info, instrument};

use crate::dto::{
    CreateRsoRequest, CreatedRsoResponse, MembershipResponse, RsoResponse, UpdateRsoRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::policy::PolicyService;

/// RSO service
pub struct RsoService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RsoService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Found an RSO with the principal as admin.
    ///
    /// The member list is checked before anything is read. The RSO, every
    /// membership and the founder's promotion to `admin` are then written in
    /// one transaction.
    #[instrument(skip(self, principal, request), fields(user_id = %principal.id, name = %request.name))]
    pub async fn create_rso(
        &self,
        principal: &Principal,
        request: CreateRsoRequest,
    ) -> ServiceResult<CreatedRsoResponse> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(ServiceError::validation("RSO name cannot be blank"));
        }
        let emails = normalize_member_emails(&principal.email, &request.member_emails)?;

        PolicyService::ensure(principal, Action::CreateRso, Target::None)?;

        let university_id = request
            .university_id
            .or(principal.university_id)
            .ok_or_else(|| ServiceError::validation("university_id is required"))?;
        self.ctx
            .university_repo()
            .find_by_id(university_id)
            .await?
            .ok_or(DomainError::UniversityNotFound(university_id))?;

        let founder = self
            .ctx
            .user_repo()
            .find_by_id(principal.id)
            .await?
            .ok_or(DomainError::Unauthenticated)?;
        let members = self.ctx.user_repo().find_by_emails(&emails).await?;

        let plan = plan_rso_creation(
            self.ctx.generate_id(),
            &founder,
            name,
            university_id,
            &emails,
            &members,
        )?;

        self.ctx.rso_repo().create_with_members(&plan).await?;

        let founder_role = plan.founder_role(&founder);
        info!(
            rso_id = %plan.rso.id,
            member_count = plan.member_count(),
            promoted = plan.role_change.is_some(),
            "RSO created"
        );

        let summary = self
            .ctx
            .rso_repo()
            .find_summary(plan.rso.id)
            .await?
            .ok_or(DomainError::RsoNotFound(plan.rso.id))?;

        Ok(CreatedRsoResponse {
            rso: RsoResponse::from(summary),
            founder_role,
        })
    }

    /// Join an active RSO of the principal's own university
    #[instrument(skip(self, principal), fields(user_id = %principal.id))]
    pub async fn join_rso(
        &self,
        principal: &Principal,
        rso_id: Snowflake,
    ) -> ServiceResult<MembershipResponse> {
        let rso = self.find_rso(rso_id).await?;

        PolicyService::ensure(principal, Action::JoinRso, Target::Rso(&rso))?;

        let already_member = self.ctx.rso_repo().is_member(rso_id, principal.id).await?;
        check_join(principal, &rso, already_member)?;

        let membership = RsoMembership::new(rso_id, principal.id);
        self.ctx.rso_repo().add_member(&membership).await?;

        info!(rso_id = %rso_id, "Joined RSO");
        Ok(MembershipResponse::from(membership))
    }

    #[instrument(skip(self))]
    pub async fn get_rso(&self, rso_id: Snowflake) -> ServiceResult<RsoResponse> {
        let summary = self
            .ctx
            .rso_repo()
            .find_summary(rso_id)
            .await?
            .ok_or(DomainError::RsoNotFound(rso_id))?;
        Ok(RsoResponse::from(summary))
    }

    /// Rename an RSO
    #[instrument(skip(self, principal, request), fields(user_id = %principal.id))]
    pub async fn update_rso(
        &self,
        principal: &Principal,
        rso_id: Snowflake,
        request: UpdateRsoRequest,
    ) -> ServiceResult<RsoResponse> {
        let mut rso = self.find_rso(rso_id).await?;

        PolicyService::ensure(principal, Action::UpdateRso, Target::Rso(&rso))?;

        let name = request.name.trim();
        if name.is_empty() {
            return Err(ServiceError::validation("RSO name cannot be blank"));
        }
        rso.rename(name.to_string());
        self.ctx.rso_repo().update(&rso).await?;

        info!(rso_id = %rso_id, "RSO renamed");
        self.get_rso(rso_id).await
    }

    #[instrument(skip(self, principal), fields(user_id = %principal.id))]
    pub async fn delete_rso(&self, principal: &Principal, rso_id: Snowflake) -> ServiceResult<()> {
        let rso = self.find_rso(rso_id).await?;

        PolicyService::ensure(principal, Action::DeleteRso, Target::Rso(&rso))?;

        self.ctx.rso_repo().delete(rso_id).await?;

        info!(rso_id = %rso_id, "RSO deleted");
        Ok(())
    }

    /// RSOs the principal belongs to, active ones first
    #[instrument(skip(self, principal), fields(user_id = %principal.id))]
    pub async fn list_member_rsos(&self, principal: &Principal) -> ServiceResult<Vec<RsoResponse>> {
        let rsos = self.ctx.rso_repo().list_for_member(principal.id).await?;
        Ok(rsos.into_iter().map(RsoResponse::from).collect())
    }

    #[instrument(skip(self, principal), fields(user_id = %principal.id))]
    pub async fn list_admin_rsos(&self, principal: &Principal) -> ServiceResult<Vec<RsoResponse>> {
        PolicyService::ensure(principal, Action::ListAdministeredRsos, Target::None)?;

        let rsos = self.ctx.rso_repo().list_administered(principal.id).await?;
        Ok(rsos.into_iter().map(RsoResponse::from).collect())
    }

    /// RSOs of the principal's university they have not joined yet
    #[instrument(skip(self, principal), fields(user_id = %principal.id))]
    pub async fn list_joinable_rsos(
        &self,
        principal: &Principal,
    ) -> ServiceResult<Vec<RsoResponse>> {
        let Some(university_id) = principal.university_id else {
            return Ok(Vec::new());
        };
        let rsos = self
            .ctx
            .rso_repo()
            .list_joinable(principal.id, university_id)
            .await?;
        Ok(rsos.into_iter().map(RsoResponse::from).collect())
    }

    async fn find_rso(&self, rso_id: Snowflake) -> ServiceResult<Rso> {
        self.ctx
            .rso_repo()
            .find_by_id(rso_id)
            .await?
            .ok_or_else(|| DomainError::RsoNotFound(rso_id).into())
    }
}
