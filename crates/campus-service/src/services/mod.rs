//! Business logic services
//!
//! Each service borrows a [`ServiceContext`] and enforces the authorization
//! policy before touching storage.

pub mod auth;
pub mod comment;
pub mod context;
pub mod error;
pub mod event;
pub mod policy;
pub mod rating;
pub mod rso;
pub mod university;
pub mod user;

#[cfg(test)]
mod testing;

pub use auth::AuthService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use event::EventService;
pub use policy::PolicyService;
pub use rating::RatingService;
pub use rso::RsoService;
pub use university::UniversityService;
pub use user::UserService;
