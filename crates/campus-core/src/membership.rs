//! RSO founding and joining rules
//!
//! Founding is split into a pure plan (validation plus the rows to write and
//! the founder's role change) and a transactional apply step that lives in
//! storage. Nothing here performs I/O.

use std::collections::HashSet;

use crate::entities::{normalize_email, Rso, RsoStatus, User, RSO_ACTIVE_THRESHOLD};
use crate::error::DomainError;
use crate::policy::Principal;
use crate::value_objects::{Snowflake, UserRole};

/// Members required besides the founder
pub const MIN_OTHER_MEMBERS: usize = RSO_ACTIVE_THRESHOLD - 1;

/// Role transition applied in the same transaction as the RSO rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleChange {
    pub user_id: Snowflake,
    pub new_role: UserRole,
}

/// Everything storage needs to write when an RSO is founded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsoCreationPlan {
    pub rso: Rso,
    /// Founder first, then the listed members
    pub member_ids: Vec<Snowflake>,
    pub role_change: Option<RoleChange>,
}

impl RsoCreationPlan {
    pub fn member_count(&self) -> usize {
        self.member_ids.len()
    }

    /// Founder's role once the plan is applied
    pub fn founder_role(&self, founder: &User) -> UserRole {
        self.role_change.map_or(founder.role, |change| change.new_role)
    }
}

/// Normalize the requested member list and check its shape.
///
/// Runs before any lookup, so an undersized list is rejected without touching
/// storage.
pub fn normalize_member_emails(
    founder_email: &str,
    emails: &[String],
) -> Result<Vec<String>, DomainError> {
    let founder_email = normalize_email(founder_email);
    let mut seen = HashSet::with_capacity(emails.len());
    let mut normalized = Vec::with_capacity(emails.len());

    for raw in emails {
        let email = normalize_email(raw);
        if email.is_empty() {
            return Err(DomainError::validation("Member emails cannot be empty"));
        }
        if email == founder_email {
            return Err(DomainError::validation(
                "The founder is added automatically and must not be listed as a member",
            ));
        }
        if !seen.insert(email.clone()) {
            return Err(DomainError::validation(format!(
                "Duplicate member email: {email}"
            )));
        }
        normalized.push(email);
    }

    if normalized.len() < MIN_OTHER_MEMBERS {
        return Err(DomainError::validation(format!(
            "Need at least {MIN_OTHER_MEMBERS} other members"
        )));
    }
    Ok(normalized)
}

/// Build the creation plan from the requested emails and the users they resolved to
pub fn plan_rso_creation(
    rso_id: Snowflake,
    founder: &User,
    name: String,
    university_id: Snowflake,
    requested: &[String],
    resolved: &[User],
) -> Result<RsoCreationPlan, DomainError> {
    let found: HashSet<&str> = resolved.iter().map(|u| u.email.as_str()).collect();
    let missing: Vec<String> = requested
        .iter()
        .filter(|email| !found.contains(email.as_str()))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(DomainError::MissingMembers { emails: missing });
    }

    let domain = founder
        .email_domain()
        .ok_or_else(|| DomainError::validation("Founder email has no domain"))?;
    let foreign: Vec<&str> = resolved
        .iter()
        .filter(|member| member.email_domain() != Some(domain))
        .map(|member| member.email.as_str())
        .collect();
    if !foreign.is_empty() {
        return Err(DomainError::validation(format!(
            "All members must share the founder's email domain ({domain}): {}",
            foreign.join(", ")
        )));
    }

    if !founder.is_at(university_id) {
        return Err(DomainError::validation(
            "RSOs can only be founded at your own university",
        ));
    }

    let member_ids: Vec<Snowflake> = std::iter::once(founder.id)
        .chain(resolved.iter().map(|member| member.id))
        .collect();
    if member_ids.len() < RSO_ACTIVE_THRESHOLD {
        return Err(DomainError::validation(format!(
            "Need at least {MIN_OTHER_MEMBERS} other members"
        )));
    }

    let role_change = (founder.role == UserRole::Student).then_some(RoleChange {
        user_id: founder.id,
        new_role: UserRole::Admin,
    });

    Ok(RsoCreationPlan {
        rso: Rso::new(
            rso_id,
            name,
            RsoStatus::for_member_count(member_ids.len()),
            university_id,
            founder.id,
        ),
        member_ids,
        role_change,
    })
}

/// Check whether `principal` may join `rso`
pub fn check_join(principal: &Principal, rso: &Rso, already_member: bool) -> Result<(), DomainError> {
    if !principal.is_at(rso.university_id) {
        return Err(DomainError::validation(
            "You can only join RSOs at your own university",
        ));
    }
    if !rso.is_active() {
        return Err(DomainError::validation("Cannot join an inactive RSO"));
    }
    if already_member {
        return Err(DomainError::AlreadyMember);
    }
    Ok(())
}
