//! Integration test utilities for the campus events API
//!
//! Spawns the real Axum application against PostgreSQL and drives it over
//! HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
