//! Ports implemented by the storage layer

mod repositories;

pub use repositories::{
    CommentRepository, EventRepository, RatingRepository, RepoResult, RsoRepository,
    UniversityRepository, UserRepository,
};
