//! # campus-core
//!
//! Domain layer: entities, the authorization policy, event visibility, RSO
//! membership rules, and the repository traits storage implements.
//! This crate has no infrastructure dependencies and performs no I/O.

pub mod entities;
pub mod error;
pub mod membership;
pub mod policy;
pub mod traits;
pub mod value_objects;
pub mod visibility;

// Re-export commonly used types at crate root
pub use entities::{
    Comment, Event, EventStatus, EventType, Location, Rating, RatingSummary, Rso, RsoMembership,
    RsoStatus, RsoSummary, University, User,
};
pub use error::{DomainError, ErrorKind};
pub use membership::{RoleChange, RsoCreationPlan};
pub use policy::{authorize, Action, Decision, DenyReason, NewEventScope, Principal, Target};
pub use traits::{
    CommentRepository, EventRepository, RatingRepository, RepoResult, RsoRepository,
    UniversityRepository, UserRepository,
};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError, UserRole};
pub use visibility::ViewerScope;
