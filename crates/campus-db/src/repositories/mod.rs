//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in campus-core.

mod comment;
mod error;
mod event;
mod rating;
mod rso;
mod university;
mod user;

pub use comment::PgCommentRepository;
pub use event::PgEventRepository;
pub use rating::PgRatingRepository;
pub use rso::PgRsoRepository;
pub use university::PgUniversityRepository;
pub use user::PgUserRepository;
