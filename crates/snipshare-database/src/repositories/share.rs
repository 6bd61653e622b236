//! Share token repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use snipshare_core::error::{AppError, ErrorKind};
use snipshare_core::result::AppResult;
use snipshare_core::types::pagination::{PageRequest, PageResponse};
use snipshare_entity::share::model::{CreateShareToken, SharePermission, ShareToken};

/// Repository for share token CRUD and token lookup operations.
#[derive(Debug, Clone)]
pub struct ShareTokenRepository {
    pool: PgPool,
}

/// Column updates applied by the owner/admin update operation.
///
/// `None` means "leave unchanged"; the nested options distinguish
/// "clear the field" from "keep it".
#[derive(Debug, Clone, Default)]
pub struct ShareTokenUpdate {
    /// New description (`Some(None)` clears it).
    pub description: Option<Option<String>>,
    /// New password hash (`Some(None)` removes protection).
    pub password_hash: Option<Option<String>>,
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

impl ShareTokenRepository {
    /// Create a new share token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a share token by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ShareToken>> {
        sqlx::query_as::<_, ShareToken>("SELECT * FROM share_tokens WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find share token", e))
    }

    /// Find a share token by its opaque token string.
    ///
    /// Revoked and expired rows are returned too: the validator needs the
    /// record to report the precise deny reason and to log the attempt.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<ShareToken>> {
        sqlx::query_as::<_, ShareToken>("SELECT * FROM share_tokens WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find share token by token", e)
            })
    }

    /// List share tokens created by a user.
    pub async fn find_by_creator(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ShareToken>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM share_tokens WHERE created_by = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count share tokens", e)
                })?;

        let tokens = sqlx::query_as::<_, ShareToken>(
            "SELECT * FROM share_tokens WHERE created_by = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list share tokens", e))?;

        Ok(PageResponse::new(
            tokens,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List all share tokens (admin view).
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<ShareToken>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM share_tokens")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count share tokens", e)
            })?;

        let tokens = sqlx::query_as::<_, ShareToken>(
            "SELECT * FROM share_tokens ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list share tokens", e))?;

        Ok(PageResponse::new(
            tokens,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new share token.
    pub async fn create(&self, data: &CreateShareToken) -> AppResult<ShareToken> {
        sqlx::query_as::<_, ShareToken>(
            "INSERT INTO share_tokens (token, snippet_id, created_by, description, expires_at, \
             max_access_count, permission, password_hash, allow_download, allow_copy) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
        )
        .bind(&data.token)
        .bind(data.snippet_id)
        .bind(data.created_by)
        .bind(&data.description)
        .bind(data.expires_at)
        .bind(data.max_access_count)
        .bind(data.permission)
        .bind(&data.password_hash)
        .bind(data.allow_download)
        .bind(data.allow_copy)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create share token", e))
    }

    /// Apply an owner/admin update. `access_count` is never touched here.
    pub async fn update(&self, id: Uuid, update: &ShareTokenUpdate) -> AppResult<ShareToken> {
        sqlx::query_as::<_, ShareToken>(
            "UPDATE share_tokens SET \
             description = CASE WHEN $2 THEN $3 ELSE description END, \
             password_hash = CASE WHEN $4 THEN $5 ELSE password_hash END, \
             permission = COALESCE($6, permission), \
             allow_download = COALESCE($7, allow_download), \
             allow_copy = COALESCE($8, allow_copy), \
             expires_at = COALESCE($9, expires_at), \
             max_access_count = COALESCE($10, max_access_count), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(update.description.is_some())
        .bind(update.description.clone().flatten())
        .bind(update.password_hash.is_some())
        .bind(update.password_hash.clone().flatten())
        .bind(update.permission)
        .bind(update.allow_download)
        .bind(update.allow_copy)
        .bind(update.expires_at)
        .bind(update.max_access_count)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update share token", e))
    }

    /// Record one successful access: bump the counter and stamp
    /// `last_accessed_at`, re-checking the quota in the same statement so
    /// two racing requests cannot both take the last slot.
    ///
    /// Returns the new count, or `None` if the guarded update matched no
    /// row (quota raced to exhaustion or the token was concurrently
    /// revoked).
    pub async fn record_access(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<Option<i32>> {
        let row: Option<(i32,)> = sqlx::query_as(
            "UPDATE share_tokens SET access_count = access_count + 1, last_accessed_at = $2 \
             WHERE id = $1 AND is_active = TRUE \
             AND (max_access_count = 0 OR access_count < max_access_count) \
             RETURNING access_count",
        )
        .bind(id)
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record access", e))?;
        Ok(row.map(|r| r.0))
    }

    /// Revoke (deactivate) a share token. Idempotent: already-revoked rows
    /// are matched too and the call reports success either way.
    pub async fn revoke(&self, id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE share_tokens SET is_active = FALSE, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to revoke share token", e)
                })?;
        Ok(result.rows_affected() > 0)
    }

    /// Push the expiry out by a number of hours.
    pub async fn extend_expiry(&self, id: Uuid, hours: i64) -> AppResult<ShareToken> {
        sqlx::query_as::<_, ShareToken>(
            "UPDATE share_tokens SET \
             expires_at = expires_at + make_interval(hours => $2), updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(hours as i32)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to extend expiry", e))
    }

    /// Zero the access counter and clear the last-access stamp.
    pub async fn reset_stats(&self, id: Uuid) -> AppResult<ShareToken> {
        sqlx::query_as::<_, ShareToken>(
            "UPDATE share_tokens SET access_count = 0, last_accessed_at = NULL, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to reset stats", e))
    }

    /// Hard-delete a share token.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM share_tokens WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete share token", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Deactivate every active token whose expiry has passed.
    ///
    /// Used by the maintenance worker; returns the number of rows flipped.
    pub async fn deactivate_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE share_tokens SET is_active = FALSE, updated_at = NOW() \
             WHERE is_active = TRUE AND expires_at <= $1",
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to deactivate expired tokens", e)
        })?;
        Ok(result.rows_affected())
    }
}
