//! Share access validation — the public gate in front of shared snippets.
//!
//! Every attempt, allowed or denied, appends exactly one access log row.
//! The decision itself is a pure function over the loaded token record so
//! the ordering rules are testable without a database; the side effects
//! (guarded counter increment, log append) live in [`AccessValidator::access`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use snipshare_auth::password::PasswordHasher;
use snipshare_core::error::AppError;
use snipshare_database::repositories::access_log::ShareAccessLogRepository;
use snipshare_database::repositories::share::ShareTokenRepository;
use snipshare_database::repositories::snippet::SnippetRepository;
use snipshare_entity::share::access_log::CreateShareAccessLog;
use snipshare_entity::share::model::{AccessDenyReason, ShareToken};
use snipshare_entity::snippet::model::Snippet;

use super::useragent;

/// Where the request came from, for the access log.
#[derive(Debug, Clone, Default)]
pub struct ClientMeta {
    /// Client IP address.
    pub ip_address: String,
    /// Raw User-Agent header.
    pub user_agent: Option<String>,
}

/// What a successful validation hands back to the HTTP layer.
#[derive(Debug, Clone, Serialize)]
pub struct ShareAccessGrant {
    /// The share record, with the freshly bumped counter.
    pub share: ShareToken,
    /// The snippet the token unlocks.
    pub snippet: Snippet,
}

/// Validates share tokens and enforces share restrictions.
#[derive(Debug, Clone)]
pub struct AccessValidator {
    /// Share token repository.
    share_repo: Arc<ShareTokenRepository>,
    /// Access log repository.
    log_repo: Arc<ShareAccessLogRepository>,
    /// Snippet repository.
    snippet_repo: Arc<SnippetRepository>,
    /// Password hasher for verification.
    hasher: Arc<PasswordHasher>,
}

impl AccessValidator {
    /// Creates a new access validator.
    pub fn new(
        share_repo: Arc<ShareTokenRepository>,
        log_repo: Arc<ShareAccessLogRepository>,
        snippet_repo: Arc<SnippetRepository>,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            share_repo,
            log_repo,
            snippet_repo,
            hasher,
        }
    }

    /// The pure access decision for a loaded token record.
    ///
    /// Checks run in a fixed order: active flag, expiry, quota, password.
    /// A malformed stored hash is reported as `BadPassword` rather than an
    /// internal error; the anomaly is logged.
    pub fn decide(
        hasher: &PasswordHasher,
        token: &ShareToken,
        password: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<(), AccessDenyReason> {
        token.check_usable(now)?;

        if let Some(ref hash) = token.password_hash {
            let supplied = password.ok_or(AccessDenyReason::BadPassword)?;
            let matches = hasher.verify_password(supplied, hash).unwrap_or_else(|e| {
                warn!(share_id = %token.id, error = %e, "Share password hash unreadable");
                false
            });
            if !matches {
                return Err(AccessDenyReason::BadPassword);
            }
        }

        Ok(())
    }

    /// Validates a token string and, on success, returns the snippet
    /// payload with the counter already bumped.
    ///
    /// One access log row is appended per call regardless of outcome.
    pub async fn access(
        &self,
        token_str: &str,
        password: Option<&str>,
        meta: &ClientMeta,
    ) -> Result<ShareAccessGrant, AppError> {
        let now = Utc::now();

        let Some(token) = self.share_repo.find_by_token(token_str).await? else {
            self.append_log(None, None, meta, Some(AccessDenyReason::NotFound))
                .await;
            return Err(Self::deny_error(AccessDenyReason::NotFound));
        };

        if let Err(reason) = Self::decide(&self.hasher, &token, password, now) {
            self.append_log(Some(token.id), Some(token.snippet_id), meta, Some(reason))
                .await;
            return Err(Self::deny_error(reason));
        }

        // The shared snippet may have been soft-deleted since the token
        // was created; that reads as not-found and does not consume quota.
        let snippet = match self.snippet_repo.find_by_id(token.snippet_id).await? {
            Some(s) if !s.is_deleted() => s,
            _ => {
                self.append_log(
                    Some(token.id),
                    Some(token.snippet_id),
                    meta,
                    Some(AccessDenyReason::NotFound),
                )
                .await;
                return Err(Self::deny_error(AccessDenyReason::NotFound));
            }
        };

        // Guarded increment: the SQL re-checks the quota, so a request
        // that loses the race on the last slot is denied here.
        let Some(new_count) = self.share_repo.record_access(token.id, now).await? else {
            self.append_log(
                Some(token.id),
                Some(token.snippet_id),
                meta,
                Some(AccessDenyReason::QuotaExceeded),
            )
            .await;
            return Err(Self::deny_error(AccessDenyReason::QuotaExceeded));
        };

        self.append_log(Some(token.id), Some(token.snippet_id), meta, None)
            .await;

        info!(
            share_id = %token.id,
            snippet_id = %token.snippet_id,
            access_count = new_count,
            "Share accessed"
        );

        let mut share = token;
        share.access_count = new_count;
        share.last_accessed_at = Some(now);

        Ok(ShareAccessGrant { share, snippet })
    }

    /// Appends one log row. Failures are logged and swallowed: the log is
    /// a side effect of the decision, never a gate on it.
    async fn append_log(
        &self,
        share_token_id: Option<Uuid>,
        snippet_id: Option<Uuid>,
        meta: &ClientMeta,
        deny: Option<AccessDenyReason>,
    ) {
        let entry = CreateShareAccessLog {
            share_token_id,
            snippet_id,
            ip_address: meta.ip_address.clone(),
            user_agent: meta.user_agent.clone(),
            device_type: meta
                .user_agent
                .as_deref()
                .map(|ua| useragent::device_type(ua).to_string()),
            browser: meta
                .user_agent
                .as_deref()
                .map(|ua| useragent::browser(ua).to_string()),
            success: deny.is_none(),
            failure_reason: deny.map(|r| r.code().to_string()),
        };

        if let Err(e) = self.log_repo.create(&entry).await {
            warn!(error = %e, "Failed to append share access log");
        }
    }

    /// Maps a deny reason to the application error surfaced over HTTP.
    pub fn deny_error(reason: AccessDenyReason) -> AppError {
        match reason {
            AccessDenyReason::NotFound => AppError::not_found("Share link not found"),
            AccessDenyReason::Revoked => AppError::not_found("Share link has been revoked"),
            AccessDenyReason::Expired => AppError::gone("Share link has expired"),
            AccessDenyReason::QuotaExceeded => {
                AppError::rate_limited("Share link has reached its access limit")
            }
            AccessDenyReason::BadPassword => AppError::unauthorized("Invalid share password"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use snipshare_core::error::ErrorKind;
    use snipshare_entity::share::model::SharePermission;

    fn token(now: DateTime<Utc>, password_hash: Option<String>) -> ShareToken {
        ShareToken {
            id: Uuid::new_v4(),
            token: "x".repeat(43),
            snippet_id: Uuid::new_v4(),
            created_by: Uuid::new_v4(),
            description: None,
            expires_at: now + Duration::hours(1),
            is_active: true,
            access_count: 0,
            max_access_count: 0,
            permission: SharePermission::ReadOnly,
            password_hash,
            allow_download: true,
            allow_copy: true,
            last_accessed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_open_token_allows_without_password() {
        let hasher = PasswordHasher::new();
        let now = Utc::now();
        let t = token(now, None);
        assert!(AccessValidator::decide(&hasher, &t, None, now).is_ok());
        // A stray supplied password on an unprotected token is ignored.
        assert!(AccessValidator::decide(&hasher, &t, Some("anything"), now).is_ok());
    }

    #[test]
    fn test_password_exact_match_required() {
        let hasher = PasswordHasher::new();
        let now = Utc::now();
        let hash = hasher.hash_password("abc123").unwrap();
        let t = token(now, Some(hash));

        assert_eq!(
            AccessValidator::decide(&hasher, &t, None, now),
            Err(AccessDenyReason::BadPassword)
        );
        assert_eq!(
            AccessValidator::decide(&hasher, &t, Some("wrong"), now),
            Err(AccessDenyReason::BadPassword)
        );
        assert_eq!(
            AccessValidator::decide(&hasher, &t, Some("ABC123"), now),
            Err(AccessDenyReason::BadPassword)
        );
        assert!(AccessValidator::decide(&hasher, &t, Some("abc123"), now).is_ok());
    }

    #[test]
    fn test_revoked_wins_over_password() {
        let hasher = PasswordHasher::new();
        let now = Utc::now();
        let hash = hasher.hash_password("abc123").unwrap();
        let mut t = token(now, Some(hash));
        t.is_active = false;
        // Even the right password cannot pass a revoked token.
        assert_eq!(
            AccessValidator::decide(&hasher, &t, Some("abc123"), now),
            Err(AccessDenyReason::Revoked)
        );
    }

    #[test]
    fn test_expired_before_quota_before_password() {
        let hasher = PasswordHasher::new();
        let now = Utc::now();
        let mut t = token(now, Some(hasher.hash_password("pw").unwrap()));
        t.expires_at = now - Duration::seconds(1);
        t.max_access_count = 1;
        t.access_count = 1;
        assert_eq!(
            AccessValidator::decide(&hasher, &t, None, now),
            Err(AccessDenyReason::Expired)
        );

        t.expires_at = now + Duration::hours(1);
        assert_eq!(
            AccessValidator::decide(&hasher, &t, None, now),
            Err(AccessDenyReason::QuotaExceeded)
        );
    }

    #[test]
    fn test_quota_boundary_allows_first_n() {
        let hasher = PasswordHasher::new();
        let now = Utc::now();
        let mut t = token(now, None);
        t.max_access_count = 2;

        t.access_count = 0;
        assert!(AccessValidator::decide(&hasher, &t, None, now).is_ok());
        t.access_count = 1;
        assert!(AccessValidator::decide(&hasher, &t, None, now).is_ok());
        t.access_count = 2;
        assert_eq!(
            AccessValidator::decide(&hasher, &t, None, now),
            Err(AccessDenyReason::QuotaExceeded)
        );
    }

    #[test]
    fn test_deny_error_status_mapping() {
        assert_eq!(
            AccessValidator::deny_error(AccessDenyReason::NotFound).kind,
            ErrorKind::NotFound
        );
        assert_eq!(
            AccessValidator::deny_error(AccessDenyReason::Revoked).kind,
            ErrorKind::NotFound
        );
        assert_eq!(
            AccessValidator::deny_error(AccessDenyReason::Expired).kind,
            ErrorKind::Gone
        );
        assert_eq!(
            AccessValidator::deny_error(AccessDenyReason::QuotaExceeded).kind,
            ErrorKind::RateLimited
        );
        assert_eq!(
            AccessValidator::deny_error(AccessDenyReason::BadPassword).kind,
            ErrorKind::Unauthorized
        );
    }
}
