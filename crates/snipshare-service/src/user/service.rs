//! User self-service: registration, login, token refresh, profile.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use snipshare_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use snipshare_auth::password::PasswordHasher;
use snipshare_core::config::auth::AuthConfig;
use snipshare_core::error::AppError;
use snipshare_database::repositories::user::UserRepository;
use snipshare_entity::user::UserRole;
use snipshare_entity::user::model::{CreateUser, User};

use crate::context::RequestContext;

/// Result of a successful login or refresh.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AuthenticatedUser {
    /// The user record.
    pub user: User,
    /// Fresh token pair.
    pub tokens: TokenPair,
}

/// Manages user registration, authentication, and profile updates.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// JWT encoder.
    encoder: Arc<JwtEncoder>,
    /// JWT decoder (for refresh tokens).
    decoder: Arc<JwtDecoder>,
    /// Auth configuration (password rules).
    config: AuthConfig,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        config: AuthConfig,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            encoder,
            decoder,
            config,
        }
    }

    /// Registers a new user account.
    pub async fn register(
        &self,
        username: String,
        email: String,
        password: String,
        display_name: Option<String>,
    ) -> Result<User, AppError> {
        if username.len() < 3 || username.len() > 32 {
            return Err(AppError::validation(
                "Username must be between 3 and 32 characters",
            ));
        }
        if !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(AppError::validation(
                "Username may only contain letters, digits, '_' and '-'",
            ));
        }
        if password.len() < self.config.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.config.password_min_length
            )));
        }
        if !email.contains('@') {
            return Err(AppError::validation("Invalid email address"));
        }

        if self.user_repo.find_by_username(&username).await?.is_some() {
            return Err(AppError::conflict("Username is already taken"));
        }

        let password_hash = self.hasher.hash_password(&password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                username,
                email,
                password_hash,
                display_name,
                role: UserRole::User,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Authenticates a user and issues a token pair.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, AppError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid username or password"))?;

        // Same error for wrong password and unknown user.
        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::unauthorized("Invalid username or password"));
        }
        if !user.can_login() {
            return Err(AppError::forbidden("Account is disabled"));
        }

        let tokens = self
            .encoder
            .generate_token_pair(user.id, user.role, &user.username)?;
        self.user_repo.record_login(user.id, Utc::now()).await?;

        info!(user_id = %user.id, "User logged in");
        Ok(AuthenticatedUser { user, tokens })
    }

    /// Exchanges a refresh token for a fresh token pair.
    ///
    /// Role and status are re-read from the store so revoked accounts and
    /// role changes take effect at refresh time.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthenticatedUser, AppError> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;

        let user = self
            .user_repo
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::unauthorized("Account no longer exists"))?;
        if !user.can_login() {
            return Err(AppError::forbidden("Account is disabled"));
        }

        let tokens = self
            .encoder
            .generate_token_pair(user.id, user.role, &user.username)?;
        Ok(AuthenticatedUser { user, tokens })
    }

    /// Gets the current user's record.
    pub async fn me(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates the current user's profile.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        email: Option<String>,
        display_name: Option<String>,
    ) -> Result<User, AppError> {
        if let Some(ref e) = email {
            if !e.contains('@') {
                return Err(AppError::validation("Invalid email address"));
            }
        }
        self.user_repo
            .update_profile(ctx.user_id, email.as_deref(), display_name.as_deref())
            .await
    }

    /// Changes the current user's password after verifying the old one.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        if new_password.len() < self.config.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.config.password_min_length
            )));
        }

        let user = self.me(ctx).await?;
        if !self
            .hasher
            .verify_password(current_password, &user.password_hash)?
        {
            return Err(AppError::unauthorized("Current password is incorrect"));
        }

        let password_hash = self.hasher.hash_password(new_password)?;
        self.user_repo
            .update_password(ctx.user_id, &password_hash)
            .await?;

        info!(user_id = %ctx.user_id, "Password changed");
        Ok(())
    }
}
