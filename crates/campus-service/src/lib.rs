//! # campus-service
//!
//! Application layer: services that orchestrate the domain rules over the
//! repository traits, plus the request and response DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AuthService, CommentService, EventService, PolicyService, RatingService, RsoService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, UniversityService,
    UserService,
};
