//! Service context - dependency container for services
//!
//! Holds all repositories and the other dependencies services need.

use std::sync::Arc;

use campus_common::auth::JwtService;
use campus_common::BootstrapConfig;
use campus_core::traits::{
    CommentRepository, EventRepository, RatingRepository, RsoRepository, UniversityRepository,
    UserRepository,
};
use campus_core::{Snowflake, SnowflakeGenerator};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Repositories for every stored entity
/// - JWT service for authentication
/// - Snowflake generator for ID generation
/// - Bootstrap settings applied at registration
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    university_repo: Arc<dyn UniversityRepository>,
    rso_repo: Arc<dyn RsoRepository>,
    event_repo: Arc<dyn EventRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    rating_repo: Arc<dyn RatingRepository>,

    // Services
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,

    bootstrap: BootstrapConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        university_repo: Arc<dyn UniversityRepository>,
        rso_repo: Arc<dyn RsoRepository>,
        event_repo: Arc<dyn EventRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        rating_repo: Arc<dyn RatingRepository>,
        jwt_service: Arc<JwtService>,
        snowflake_generator: Arc<SnowflakeGenerator>,
        bootstrap: BootstrapConfig,
    ) -> Self {
        Self {
            user_repo,
            university_repo,
            rso_repo,
            event_repo,
            comment_repo,
            rating_repo,
            jwt_service,
            snowflake_generator,
            bootstrap,
        }
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the university repository
    pub fn university_repo(&self) -> &dyn UniversityRepository {
        self.university_repo.as_ref()
    }

    /// Get the RSO repository
    pub fn rso_repo(&self) -> &dyn RsoRepository {
        self.rso_repo.as_ref()
    }

    /// Get the event repository
    pub fn event_repo(&self) -> &dyn EventRepository {
        self.event_repo.as_ref()
    }

    /// Get the comment repository
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// Get the rating repository
    pub fn rating_repo(&self) -> &dyn RatingRepository {
        self.rating_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }

    /// Email that registers as `super_admin`, already lowercase
    pub fn bootstrap_super_admin_email(&self) -> Option<&str> {
        self.bootstrap.super_admin_email.as_deref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("jwt_service", &self.jwt_service)
            .field("worker_id", &self.snowflake_generator.worker_id())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    university_repo: Option<Arc<dyn UniversityRepository>>,
    rso_repo: Option<Arc<dyn RsoRepository>>,
    event_repo: Option<Arc<dyn EventRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    rating_repo: Option<Arc<dyn RatingRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    bootstrap: BootstrapConfig,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn university_repo(mut self, repo: Arc<dyn UniversityRepository>) -> Self {
        self.university_repo = Some(repo);
        self
    }

    pub fn rso_repo(mut self, repo: Arc<dyn RsoRepository>) -> Self {
        self.rso_repo = Some(repo);
        self
    }

    pub fn event_repo(mut self, repo: Arc<dyn EventRepository>) -> Self {
        self.event_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn rating_repo(mut self, repo: Arc<dyn RatingRepository>) -> Self {
        self.rating_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn bootstrap(mut self, bootstrap: BootstrapConfig) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::internal(format!("{name} is required")))
        }

        Ok(ServiceContext::new(
            required(self.user_repo, "user_repo")?,
            required(self.university_repo, "university_repo")?,
            required(self.rso_repo, "rso_repo")?,
            required(self.event_repo, "event_repo")?,
            required(self.comment_repo, "comment_repo")?,
            required(self.rating_repo, "rating_repo")?,
            required(self.jwt_service, "jwt_service")?,
            self.snowflake_generator.unwrap_or_default(),
            self.bootstrap,
        ))
    }
}
