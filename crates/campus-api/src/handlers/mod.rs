//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod comments;
pub mod events;
pub mod health;
pub mod ratings;
pub mod rsos;
pub mod universities;
pub mod users;
