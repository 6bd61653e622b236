//! Admin user management.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use snipshare_auth::policy::{Action, Policy};
use snipshare_core::error::AppError;
use snipshare_core::types::pagination::{PageRequest, PageResponse};
use snipshare_database::repositories::user::UserRepository;
use snipshare_entity::user::model::User;
use snipshare_entity::user::{UserRole, UserStatus};

use crate::context::RequestContext;

/// Admin-only user management operations.
#[derive(Debug, Clone)]
pub struct AdminUserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Capability policy.
    policy: Arc<Policy>,
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(user_repo: Arc<UserRepository>, policy: Arc<Policy>) -> Self {
        Self { user_repo, policy }
    }

    /// Lists all users.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<User>, AppError> {
        self.policy
            .authorize(ctx.user_id, ctx.role, ctx.user_id, Action::Administer)?;
        self.user_repo.find_all(&page).await
    }

    /// Gets one user.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<User, AppError> {
        self.policy
            .authorize(ctx.user_id, ctx.role, ctx.user_id, Action::Administer)?;
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Changes a user's role.
    pub async fn change_role(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        role: UserRole,
    ) -> Result<User, AppError> {
        self.policy
            .authorize(ctx.user_id, ctx.role, ctx.user_id, Action::Administer)?;
        if id == ctx.user_id {
            return Err(AppError::validation("Cannot change your own role"));
        }

        self.get(ctx, id).await?;
        let updated = self.user_repo.update_role(id, role).await?;
        info!(admin = %ctx.user_id, user_id = %id, role = %role, "User role changed");
        Ok(updated)
    }

    /// Changes a user's account status.
    pub async fn change_status(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        status: UserStatus,
    ) -> Result<User, AppError> {
        self.policy
            .authorize(ctx.user_id, ctx.role, ctx.user_id, Action::Administer)?;
        if id == ctx.user_id {
            return Err(AppError::validation("Cannot change your own status"));
        }

        self.get(ctx, id).await?;
        let updated = self.user_repo.update_status(id, status).await?;
        info!(admin = %ctx.user_id, user_id = %id, status = %status, "User status changed");
        Ok(updated)
    }
}
