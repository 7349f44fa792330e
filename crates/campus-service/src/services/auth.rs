//! Authentication service
//!
//! Handles registration, login, and resolving a bearer token into the
//! principal behind a request.

use campus_common::auth::{hash_password, validate_password_strength, verify_password};
use campus_common::AppError;
use campus_core::entities::normalize_email;
use campus_core::{DomainError, Principal, User, UserRole};
use tracing::{info, instrument, warn};

use crate::dto::{AuthResponse, CurrentUserResponse, LoginRequest, RegisterRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new account.
    ///
    /// Every account starts as a student, except the configured bootstrap
    /// email which registers as `super_admin`.
    #[instrument(skip(self, request), fields(username = %request.username, email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        validate_password_strength(&request.password)?;

        let email = normalize_email(&request.email);
        if self.ctx.user_repo().find_by_email(&email).await?.is_some() {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        if let Some(university_id) = request.university_id {
            self.ctx
                .university_repo()
                .find_by_id(university_id)
                .await?
                .ok_or(DomainError::UniversityNotFound(university_id))?;
        }

        let password_hash = hash_password(&request.password)?;

        let mut user = User::new(
            self.ctx.generate_id(),
            request.username.trim().to_string(),
            &email,
            request.university_id,
        );
        if self.ctx.bootstrap_super_admin_email() == Some(user.email.as_str()) {
            user.promote(UserRole::SuperAdmin);
            warn!(user_id = %user.id, "Bootstrap super admin registered");
        }

        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, role = %user.role, "User registered successfully");

        self.issue(&user)
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let email = normalize_email(&request.email);
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!(email = %email, "Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        info!(user_id = %user.id, "User logged in successfully");

        self.issue(&user)
    }

    /// Resolve an access token into the current principal.
    ///
    /// The user is re-read on every call, so a role granted after the token
    /// was issued applies immediately and a deleted account stops working.
    #[instrument(skip(self, token))]
    pub async fn resolve_principal(&self, token: &str) -> ServiceResult<Principal> {
        let claims = self.ctx.jwt_service().decode(token)?;
        let user_id = claims.user_id()?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user_id, "Token subject no longer exists");
                ServiceError::from(DomainError::Unauthenticated)
            })?;

        Ok(Principal::from_user(&user))
    }

    fn issue(&self, user: &User) -> ServiceResult<AuthResponse> {
        let token = self.ctx.jwt_service().issue(user)?;
        Ok(AuthResponse {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            user: CurrentUserResponse::from(user),
        })
    }
}
