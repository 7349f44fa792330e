//! Authorization policy
//!
//! One decision function covers every guarded operation. Rules are checked in
//! a fixed order and the first one that matches decides:
//!
//! 1. Deleting a `super_admin` account through the generic user path is denied.
//! 2. A `super_admin` may do anything else.
//! 3. Universities are created and deleted by `super_admin` only.
//! 4. Moderation (reviewing events, reading the pending queue) needs `admin`.
//! 5. An RSO is edited or deleted by its recorded admin only.
//! 6. A comment is edited or deleted by its author only.
//! 7. An RSO event is created by that RSO's admin only.
//! 8. A private event is created by members of its university only.
//! 9. Actions on one's own resources are allowed.
//! 10. Everything else is denied.
//!
//! State checks such as "the event is still pending" are not part of the
//! policy; callers make them after authorization succeeds.

mod principal;

pub use principal::Principal;

use crate::entities::{Comment, Event, EventType, Rso};
use crate::error::DomainError;
use crate::value_objects::{Snowflake, UserRole};

/// Operations subject to authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateUniversity,
    DeleteUniversity,
    ViewUser,
    DeleteUser,
    CreateEvent,
    ViewEvent,
    UpdateEvent,
    DeleteEvent,
    ReviewEvent,
    ViewPendingEvents,
    CreateRso,
    UpdateRso,
    DeleteRso,
    JoinRso,
    ListAdministeredRsos,
    AddComment,
    EditComment,
    DeleteComment,
    AddRating,
    UpdateRating,
    DeleteRating,
}

/// Scope of an event that does not exist yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewEventScope {
    pub event_type: EventType,
    pub university_id: Option<Snowflake>,
    /// Recorded admin of the target RSO, for RSO events
    pub rso_admin_id: Option<Snowflake>,
}

/// The entity an action is applied to
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    None,
    Account { id: Snowflake, role: UserRole },
    Event(&'a Event),
    NewEvent(NewEventScope),
    Rso(&'a Rso),
    Comment(&'a Comment),
    OwnedBy(Snowflake),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    ProtectedAccount,
    SuperAdminOnly,
    ModeratorOnly,
    AdminOnly,
    NotRsoAdmin,
    NotCommentAuthor,
    NotEventCreator,
    OutsideUniversity,
    NotOwner,
}

impl DenyReason {
    pub const fn message(self) -> &'static str {
        match self {
            Self::ProtectedAccount => "Cannot delete super_admin account through this endpoint",
            Self::SuperAdminOnly => "Super admin access required",
            Self::ModeratorOnly => "Admin access required",
            Self::AdminOnly => "Only RSO admins can list administered RSOs",
            Self::NotRsoAdmin => "Only the RSO admin can perform this action",
            Self::NotCommentAuthor => "Only the comment author can perform this action",
            Self::NotEventCreator => "Only the event creator can perform this action",
            Self::OutsideUniversity => "Private events can only be created for your own university",
            Self::NotOwner => "You do not own this resource",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    #[inline]
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Convert a denial into [`DomainError::Forbidden`]
    pub fn into_result(self) -> Result<(), DomainError> {
        match self {
            Self::Allow => Ok(()),
            Self::Deny(reason) => Err(DomainError::forbidden(reason.message())),
        }
    }
}

fn allow_if(condition: bool, reason: DenyReason) -> Decision {
    if condition {
        Decision::Allow
    } else {
        Decision::Deny(reason)
    }
}

/// Decide whether `principal` may perform `action` on `target`
pub fn authorize(principal: &Principal, action: Action, target: Target<'_>) -> Decision {
    use Action as A;

    if let (A::DeleteUser, Target::Account { role: UserRole::SuperAdmin, .. }) = (action, target) {
        return Decision::Deny(DenyReason::ProtectedAccount);
    }

    if principal.role.is_super_admin() {
        return Decision::Allow;
    }

    match (action, target) {
        (A::CreateUniversity | A::DeleteUniversity, _) => {
            Decision::Deny(DenyReason::SuperAdminOnly)
        }

        (A::ReviewEvent | A::ViewPendingEvents, _) => {
            allow_if(principal.role.is_moderator(), DenyReason::ModeratorOnly)
        }

        (A::UpdateRso | A::DeleteRso, Target::Rso(rso)) => {
            allow_if(rso.is_admin(principal.id), DenyReason::NotRsoAdmin)
        }
        (A::ListAdministeredRsos, _) => {
            allow_if(principal.role == UserRole::Admin, DenyReason::AdminOnly)
        }

        (A::EditComment | A::DeleteComment, Target::Comment(comment)) => {
            allow_if(comment.is_author(principal.id), DenyReason::NotCommentAuthor)
        }

        (A::CreateEvent, Target::NewEvent(scope)) => match scope.event_type {
            EventType::Rso => allow_if(
                scope.rso_admin_id == Some(principal.id),
                DenyReason::NotRsoAdmin,
            ),
            EventType::Private => allow_if(
                scope.university_id.is_some() && principal.university_id == scope.university_id,
                DenyReason::OutsideUniversity,
            ),
            // Public events are proposals; moderation happens afterwards.
            EventType::Public => Decision::Allow,
        },

        (A::ViewEvent, Target::Event(event)) => allow_if(
            event.is_creator(principal.id)
                || (principal.role.is_moderator() && event.is_pending_public()),
            DenyReason::NotOwner,
        ),
        (A::UpdateEvent | A::DeleteEvent, Target::Event(event)) => {
            allow_if(event.is_creator(principal.id), DenyReason::NotEventCreator)
        }

        (A::ViewUser | A::DeleteUser, Target::Account { id, .. }) => {
            allow_if(id == principal.id, DenyReason::NotOwner)
        }
        (A::AddRating | A::UpdateRating | A::DeleteRating, Target::OwnedBy(owner)) => {
            allow_if(owner == principal.id, DenyReason::NotOwner)
        }
        // Acting on one's own behalf.
        (A::CreateRso | A::JoinRso | A::AddComment, _) => Decision::Allow,

        _ => Decision::Deny(DenyReason::NotOwner),
    }
}
