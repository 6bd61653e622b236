//! Share token lifecycle operations.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::info;
use uuid::Uuid;

use snipshare_auth::password::PasswordHasher;
use snipshare_auth::policy::{Action, Policy};
use snipshare_core::error::AppError;
use snipshare_core::types::pagination::{PageRequest, PageResponse};
use snipshare_database::repositories::access_log::ShareAccessLogRepository;
use snipshare_database::repositories::share::{ShareTokenRepository, ShareTokenUpdate};
use snipshare_database::repositories::snippet::SnippetRepository;
use snipshare_entity::share::access_log::ShareAccessLog;
use snipshare_entity::share::model::{CreateShareToken, SharePermission, ShareToken};

use super::token::TokenGenerator;
use crate::context::RequestContext;

/// Lower bound for extend-expiry, in hours.
const MIN_EXTEND_HOURS: i64 = 1;
/// Upper bound for extend-expiry, in hours (one year).
const MAX_EXTEND_HOURS: i64 = 8760;

/// Request to create a new share token.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateShareRequest {
    /// The snippet to share.
    pub snippet_id: Uuid,
    /// Free-text description.
    pub description: Option<String>,
    /// Expiry instant (must be in the future).
    pub expires_at: DateTime<Utc>,
    /// Access quota (0 = unlimited).
    pub max_access_count: i32,
    /// Permission level.
    pub permission: SharePermission,
    /// Optional access password (hashed before storage).
    pub password: Option<String>,
    /// Allow raw download.
    pub allow_download: bool,
    /// Allow copy-to-clipboard.
    pub allow_copy: bool,
}

/// Request to update an existing share token.
///
/// Outer `None` leaves a field unchanged; for description and password
/// the inner option distinguishes "clear" from "keep".
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UpdateShareRequest {
    /// New description.
    pub description: Option<Option<String>>,
    /// New password (`Some(None)` removes protection).
    pub password: Option<Option<String>>,
    /// New permission level.
    pub permission: Option<SharePermission>,
    /// New download flag.
    pub allow_download: Option<bool>,
    /// New copy flag.
    pub allow_copy: Option<bool>,
    /// New expiry instant.
    pub expires_at: Option<DateTime<Utc>>,
    /// New quota (0 = unlimited).
    pub max_access_count: Option<i32>,
}

/// Manages share token creation, listing, mutation, and revocation.
#[derive(Debug, Clone)]
pub struct ShareService {
    /// Share token repository.
    share_repo: Arc<ShareTokenRepository>,
    /// Access log repository.
    log_repo: Arc<ShareAccessLogRepository>,
    /// Snippet repository.
    snippet_repo: Arc<SnippetRepository>,
    /// Token string generator.
    generator: TokenGenerator,
    /// Password hasher for password-protected shares.
    hasher: Arc<PasswordHasher>,
    /// Capability policy.
    policy: Arc<Policy>,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        share_repo: Arc<ShareTokenRepository>,
        log_repo: Arc<ShareAccessLogRepository>,
        snippet_repo: Arc<SnippetRepository>,
        hasher: Arc<PasswordHasher>,
        policy: Arc<Policy>,
    ) -> Self {
        Self {
            share_repo,
            log_repo,
            snippet_repo,
            generator: TokenGenerator::new(),
            hasher,
            policy,
        }
    }

    /// Lists share tokens created by the current user.
    pub async fn list_own(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<ShareToken>, AppError> {
        self.share_repo.find_by_creator(ctx.user_id, &page).await
    }

    /// Lists all share tokens (admin only).
    pub async fn list_all(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<ShareToken>, AppError> {
        self.policy
            .authorize(ctx.user_id, ctx.role, ctx.user_id, Action::Administer)?;
        self.share_repo.find_all(&page).await
    }

    /// Creates a new share token for a snippet the caller owns.
    ///
    /// The token string is returned once, in the created record.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateShareRequest,
    ) -> Result<ShareToken, AppError> {
        if req.expires_at <= Utc::now() {
            return Err(AppError::validation("expires_at must be in the future"));
        }
        if req.max_access_count < 0 {
            return Err(AppError::validation("max_access_count must be >= 0"));
        }

        let snippet = self
            .snippet_repo
            .find_by_id(req.snippet_id)
            .await?
            .filter(|s| !s.is_deleted())
            .ok_or_else(|| AppError::not_found("Snippet not found"))?;

        self.policy
            .authorize(ctx.user_id, ctx.role, snippet.owner_id, Action::Modify)?;

        let password_hash = match req.password {
            Some(ref password) => Some(self.hasher.hash_password(password)?),
            None => None,
        };

        let share = self
            .share_repo
            .create(&CreateShareToken {
                token: self.generator.generate(),
                snippet_id: snippet.id,
                created_by: ctx.user_id,
                description: req.description,
                expires_at: req.expires_at,
                max_access_count: req.max_access_count,
                permission: req.permission,
                password_hash,
                allow_download: req.allow_download,
                allow_copy: req.allow_copy,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            share_id = %share.id,
            snippet_id = %snippet.id,
            "Share token created"
        );

        Ok(share)
    }

    /// Gets a share token by ID (creator or admin only).
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<ShareToken, AppError> {
        let share = self
            .share_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Share token not found"))?;

        self.policy
            .authorize(ctx.user_id, ctx.role, share.created_by, Action::Read)?;

        Ok(share)
    }

    /// Updates mutable share fields. Never touches `access_count`.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        req: UpdateShareRequest,
    ) -> Result<ShareToken, AppError> {
        let share = self.get(ctx, id).await?;
        self.policy
            .authorize(ctx.user_id, ctx.role, share.created_by, Action::Modify)?;

        if let Some(expires_at) = req.expires_at {
            if expires_at <= Utc::now() {
                return Err(AppError::validation("expires_at must be in the future"));
            }
        }
        if matches!(req.max_access_count, Some(n) if n < 0) {
            return Err(AppError::validation("max_access_count must be >= 0"));
        }

        let password_hash = match req.password {
            None => None,
            Some(None) => Some(None),
            Some(Some(ref password)) => Some(Some(self.hasher.hash_password(password)?)),
        };

        let updated = self
            .share_repo
            .update(
                id,
                &ShareTokenUpdate {
                    description: req.description,
                    password_hash,
                    permission: req.permission,
                    allow_download: req.allow_download,
                    allow_copy: req.allow_copy,
                    expires_at: req.expires_at,
                    max_access_count: req.max_access_count,
                },
            )
            .await?;

        info!(user_id = %ctx.user_id, share_id = %id, "Share token updated");
        Ok(updated)
    }

    /// Revokes (deactivates) a share token. Idempotent: revoking an
    /// already-revoked token is a no-op success.
    pub async fn revoke(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        let share = self.get(ctx, id).await?;
        self.policy
            .authorize(ctx.user_id, ctx.role, share.created_by, Action::Modify)?;

        self.share_repo.revoke(id).await?;
        info!(user_id = %ctx.user_id, share_id = %id, "Share token revoked");
        Ok(())
    }

    /// Hard-deletes a share token.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        let share = self.get(ctx, id).await?;
        self.policy
            .authorize(ctx.user_id, ctx.role, share.created_by, Action::Modify)?;

        self.share_repo.delete(id).await?;
        info!(user_id = %ctx.user_id, share_id = %id, "Share token deleted");
        Ok(())
    }

    /// Extends the expiry by a bounded number of hours.
    pub async fn extend_expiry(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        hours: i64,
    ) -> Result<ShareToken, AppError> {
        validate_extend_hours(hours)?;

        let share = self.get(ctx, id).await?;
        self.policy
            .authorize(ctx.user_id, ctx.role, share.created_by, Action::Modify)?;

        let updated = self.share_repo.extend_expiry(id, hours).await?;
        info!(
            user_id = %ctx.user_id,
            share_id = %id,
            hours,
            expires_at = %updated.expires_at,
            "Share expiry extended"
        );
        Ok(updated)
    }

    /// Zeroes `access_count` and clears `last_accessed_at`. Leaves
    /// `is_active` and `expires_at` alone.
    pub async fn reset_stats(&self, ctx: &RequestContext, id: Uuid) -> Result<ShareToken, AppError> {
        let share = self.get(ctx, id).await?;
        self.policy
            .authorize(ctx.user_id, ctx.role, share.created_by, Action::Modify)?;

        let updated = self.share_repo.reset_stats(id).await?;
        info!(user_id = %ctx.user_id, share_id = %id, "Share stats reset");
        Ok(updated)
    }

    /// Lists the access log for one share token (creator or admin only).
    pub async fn list_logs(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        page: PageRequest,
    ) -> Result<PageResponse<ShareAccessLog>, AppError> {
        let share = self.get(ctx, id).await?;
        self.policy
            .authorize(ctx.user_id, ctx.role, share.created_by, Action::Read)?;

        self.log_repo.find_by_token(id, &page).await
    }

    /// Searches the access log across all tokens (admin only).
    pub async fn search_logs(
        &self,
        ctx: &RequestContext,
        share_token_id: Option<Uuid>,
        snippet_id: Option<Uuid>,
        success: Option<bool>,
        page: PageRequest,
    ) -> Result<PageResponse<ShareAccessLog>, AppError> {
        self.policy
            .authorize(ctx.user_id, ctx.role, ctx.user_id, Action::Administer)?;
        self.log_repo
            .search(share_token_id, snippet_id, success, &page)
            .await
    }

    /// Bulk-deletes access log rows older than the given age (admin only).
    pub async fn purge_logs(
        &self,
        ctx: &RequestContext,
        older_than_days: i64,
    ) -> Result<u64, AppError> {
        self.policy
            .authorize(ctx.user_id, ctx.role, ctx.user_id, Action::Administer)?;
        if older_than_days < 1 {
            return Err(AppError::validation("older_than_days must be >= 1"));
        }

        let cutoff = Utc::now() - Duration::days(older_than_days);
        let removed = self.log_repo.delete_older_than(cutoff).await?;
        info!(user_id = %ctx.user_id, older_than_days, removed, "Access logs purged");
        Ok(removed)
    }
}

/// Bounds check for extend-expiry.
fn validate_extend_hours(hours: i64) -> Result<(), AppError> {
    if !(MIN_EXTEND_HOURS..=MAX_EXTEND_HOURS).contains(&hours) {
        return Err(AppError::validation(format!(
            "hours must be between {MIN_EXTEND_HOURS} and {MAX_EXTEND_HOURS}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_bounds() {
        assert!(validate_extend_hours(0).is_err());
        assert!(validate_extend_hours(-5).is_err());
        assert!(validate_extend_hours(8761).is_err());
        assert!(validate_extend_hours(1).is_ok());
        assert!(validate_extend_hours(8760).is_ok());
    }
}
