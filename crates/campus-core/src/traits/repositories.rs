//! Repository traits (ports) - define the interface for data access
//!
//! Implementations must read current state on every call; no method may serve
//! cached rows.

use async_trait::async_trait;

use crate::entities::{
    Comment, Event, EventStatus, Rating, Rso, RsoMembership, RsoSummary, University, User,
};
use crate::error::DomainError;
use crate::membership::RsoCreationPlan;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Lookup by normalized (lowercase) email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Resolve many normalized emails at once; unknown emails are skipped
    async fn find_by_emails(&self, emails: &[String]) -> RepoResult<Vec<User>>;

    /// Insert a user. Fails with `EmailAlreadyExists` on a duplicate email.
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// Fails with `UserNotFound`, or `StillReferenced` while rows point at the user
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// University Repository
// ============================================================================

#[async_trait]
pub trait UniversityRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<University>>;

    /// All universities ordered by name
    async fn list(&self) -> RepoResult<Vec<University>>;

    /// Fails with `UniversityNameTaken` on a duplicate name
    async fn create(&self, university: &University) -> RepoResult<()>;

    /// Fails with `UniversityNotFound`, or `StillReferenced` while users or events point at it
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// RSO Repository
// ============================================================================

#[async_trait]
pub trait RsoRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Rso>>;

    async fn find_summary(&self, id: Snowflake) -> RepoResult<Option<RsoSummary>>;

    /// Write the RSO row, every membership row, and the founder's role change
    /// in one transaction. Nothing is persisted if any step fails.
    async fn create_with_members(&self, plan: &RsoCreationPlan) -> RepoResult<()>;

    async fn update(&self, rso: &Rso) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    async fn is_member(&self, rso_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Fails with `AlreadyMember` when the pair already exists
    async fn add_member(&self, membership: &RsoMembership) -> RepoResult<()>;

    /// Ids of every RSO the user belongs to
    async fn member_rso_ids(&self, user_id: Snowflake) -> RepoResult<Vec<Snowflake>>;

    /// RSOs the user administers, ordered by name
    async fn list_administered(&self, admin_id: Snowflake) -> RepoResult<Vec<RsoSummary>>;

    /// RSOs the user belongs to, active first, then by name
    async fn list_for_member(&self, user_id: Snowflake) -> RepoResult<Vec<RsoSummary>>;

    /// RSOs of a university the user does not belong to, ordered by name
    async fn list_joinable(
        &self,
        user_id: Snowflake,
        university_id: Snowflake,
    ) -> RepoResult<Vec<RsoSummary>>;
}

// ============================================================================
// Event Repository
// ============================================================================

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Event>>;

    async fn create(&self, event: &Event) -> RepoResult<()>;

    /// Update descriptive fields. Type, scope and status are left untouched.
    async fn update(&self, event: &Event) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Approved events that may be visible to a viewer with this university
    /// and these memberships
    async fn find_visible_candidates(
        &self,
        university_id: Option<Snowflake>,
        rso_ids: &[Snowflake],
    ) -> RepoResult<Vec<Event>>;

    /// Public events awaiting review
    async fn find_pending_public(&self) -> RepoResult<Vec<Event>>;

    /// Atomically move an event from `from` to `to`.
    ///
    /// Returns `false` when the event is missing or no longer in `from`.
    async fn transition_status(
        &self,
        id: Snowflake,
        from: EventStatus,
        to: EventStatus,
    ) -> RepoResult<bool>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// Comments on an event, oldest first
    async fn list_by_event(&self, event_id: Snowflake) -> RepoResult<Vec<Comment>>;

    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    async fn update(&self, comment: &Comment) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Rating Repository
// ============================================================================

#[async_trait]
pub trait RatingRepository: Send + Sync {
    async fn find(&self, event_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Rating>>;

    async fn list_by_event(&self, event_id: Snowflake) -> RepoResult<Vec<Rating>>;

    /// Fails with `AlreadyRated` when the user already rated the event
    async fn create(&self, rating: &Rating) -> RepoResult<()>;

    /// Fails with `RatingNotFound` when there is nothing to update
    async fn update(&self, rating: &Rating) -> RepoResult<()>;

    /// Fails with `RatingNotFound` when there is nothing to delete
    async fn delete(&self, event_id: Snowflake, user_id: Snowflake) -> RepoResult<()>;
}
