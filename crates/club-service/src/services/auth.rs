//! Authentication service
//!
//! Account registration and credential verification. Password hashes are
//! written and read through the user repository and never appear on the
//! `User` entity.

use club_core::entities::User;
use club_core::error::DomainError;
use tracing::{info, instrument, warn};
use validator::Validate;

use club_common::auth::validate_password_strength;
use club_common::error::AppError;

use crate::dto::{LoginRequest, RegisterRequest, UserResponse};

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

    /// Register a new account
    #[instrument(skip(self, request))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<UserResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;
        validate_password_strength(&request.password)?;

        let email = request.email.trim().to_lowercase();

        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = self
            .ctx
            .password_service()
            .hash(&request.password)?;

        let user = User::new(
            self.ctx.generate_id(),
            email,
            request.first_name,
            request.last_name,
        );

        self.ctx.user_repo().create(&user, &password_hash).await?;
        // Registration counts as the first login
        self.ctx.user_repo().touch_last_login(user.id).await?;

        info!(user_id = %user.id, "Account registered");

        Ok(UserResponse::from(&user))
    }

    /// Verify credentials and record the login
    ///
    /// Unknown email, wrong password, and a deactivated account all report
    /// `InvalidCredentials`; the caller learns nothing else.
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<UserResponse> {
        let email = request.email.trim().to_lowercase();

        let user = self
            .ctx
            .user_repo()
            .find_by_email(&email)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidCredentials))?;

        if !user.is_active {
            warn!(user_id = %user.id, "Login attempt on deactivated account");
            return Err(AppError::InvalidCredentials.into());
        }

        let stored_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidCredentials))?;

        self.ctx
            .password_service()
            .verify_or_error(&request.password, &stored_hash)?;

        self.ctx.user_repo().touch_last_login(user.id).await?;

        info!(user_id = %user.id, "User logged in");

        Ok(UserResponse::from(&user))
    }
}
