//! Database models - SQLx-compatible structs for PostgreSQL tables

mod comment;
mod event;
mod rso;
mod university;
mod user;

pub use comment::{CommentModel, RatingModel};
pub use event::EventModel;
pub use rso::{RsoModel, RsoWithCountModel};
pub use university::UniversityModel;
pub use user::UserModel;
