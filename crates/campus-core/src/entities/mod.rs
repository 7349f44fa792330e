//! Domain entities - core business objects

mod comment;
mod event;
mod rating;
mod rso;
mod university;
mod user;

pub use comment::{Comment, MAX_COMMENT_LENGTH};
pub use event::{Event, EventStatus, EventType, Location};
pub use rating::{validate_score, Rating, RatingSummary, MAX_RATING, MIN_RATING};
pub use rso::{Rso, RsoMembership, RsoStatus, RsoSummary, RSO_ACTIVE_THRESHOLD};
pub use university::University;
pub use user::{email_domain, normalize_email, User};
