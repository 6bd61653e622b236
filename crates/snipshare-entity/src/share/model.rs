//! Share token entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Permission level granted by a share token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "share_permission", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SharePermission {
    /// View the snippet only.
    ReadOnly,
    /// View and propose edits.
    Edit,
    /// Full access, including settings of the shared snippet.
    Full,
}

/// Why an access attempt was denied.
///
/// Carried as a typed value end-to-end; the stable `code()` string is what
/// gets persisted in the access log. Status inference from message text is
/// deliberately not a thing here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDenyReason {
    /// No token row matches the supplied string.
    NotFound,
    /// The token was revoked by its owner or an admin.
    Revoked,
    /// The token's expiry instant has passed.
    Expired,
    /// The access quota has been used up.
    QuotaExceeded,
    /// The token requires a password and none/a wrong one was supplied.
    BadPassword,
}

impl AccessDenyReason {
    /// Stable snake_case code stored in access log rows.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Revoked => "revoked",
            Self::Expired => "expired",
            Self::QuotaExceeded => "quota_exceeded",
            Self::BadPassword => "bad_password",
        }
    }
}

/// A share token granting time- and count-limited access to a snippet
/// without authentication.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShareToken {
    /// Unique share identifier.
    pub id: Uuid,
    /// Opaque unique string used as the external lookup key.
    pub token: String,
    /// The snippet being shared.
    pub snippet_id: Uuid,
    /// User who created the share.
    pub created_by: Uuid,
    /// Free-text description shown to the owner.
    pub description: Option<String>,
    /// Absolute expiry instant.
    pub expires_at: DateTime<Utc>,
    /// False once revoked; revocation is irreversible via the public API.
    pub is_active: bool,
    /// Number of successful accesses so far.
    pub access_count: i32,
    /// Upper bound on successful accesses (0 = unlimited).
    pub max_access_count: i32,
    /// Permission level granted to holders of the token.
    pub permission: SharePermission,
    /// Argon2 hash of the access password, if one is set.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Whether the raw snippet may be downloaded.
    pub allow_download: bool,
    /// Whether copy-to-clipboard is offered.
    pub allow_copy: bool,
    /// Last successful access time.
    pub last_accessed_at: Option<DateTime<Utc>>,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
    /// When the share was last updated.
    pub updated_at: DateTime<Utc>,
}

impl ShareToken {
    /// Gate on everything except the password: active flag, expiry, quota,
    /// checked in that order.
    ///
    /// Password verification needs the hasher and happens after this gate
    /// passes; see the access validator.
    pub fn check_usable(&self, now: DateTime<Utc>) -> Result<(), AccessDenyReason> {
        if !self.is_active {
            return Err(AccessDenyReason::Revoked);
        }
        if now >= self.expires_at {
            return Err(AccessDenyReason::Expired);
        }
        if self.max_access_count > 0 && self.access_count >= self.max_access_count {
            return Err(AccessDenyReason::QuotaExceeded);
        }
        Ok(())
    }

    /// Whether a password must be supplied to use this token.
    pub fn requires_password(&self) -> bool {
        self.password_hash.is_some()
    }
}

/// Data required to create a new share token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShareToken {
    /// Opaque token string (generated, unique).
    pub token: String,
    /// The snippet being shared.
    pub snippet_id: Uuid,
    /// User creating the share.
    pub created_by: Uuid,
    /// Free-text description.
    pub description: Option<String>,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
    /// Access quota (0 = unlimited).
    pub max_access_count: i32,
    /// Permission level.
    pub permission: SharePermission,
    /// Pre-hashed password, if protection was requested.
    pub password_hash: Option<String>,
    /// Allow raw download.
    pub allow_download: bool,
    /// Allow copy-to-clipboard.
    pub allow_copy: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token(now: DateTime<Utc>) -> ShareToken {
        ShareToken {
            id: Uuid::new_v4(),
            token: "t".repeat(43),
            snippet_id: Uuid::new_v4(),
            created_by: Uuid::new_v4(),
            description: None,
            expires_at: now + Duration::hours(1),
            is_active: true,
            access_count: 0,
            max_access_count: 0,
            permission: SharePermission::ReadOnly,
            password_hash: None,
            allow_download: true,
            allow_copy: true,
            last_accessed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_usable_token_passes() {
        let now = Utc::now();
        assert!(token(now).check_usable(now).is_ok());
    }

    #[test]
    fn test_revoked_denies_regardless_of_other_fields() {
        let now = Utc::now();
        let mut t = token(now);
        t.is_active = false;
        // Revocation wins even when the token is also expired and over quota.
        t.expires_at = now - Duration::hours(1);
        t.max_access_count = 1;
        t.access_count = 5;
        assert_eq!(t.check_usable(now), Err(AccessDenyReason::Revoked));
    }

    #[test]
    fn test_expired_beats_quota() {
        let now = Utc::now();
        let mut t = token(now);
        t.expires_at = now;
        t.max_access_count = 1;
        t.access_count = 1;
        assert_eq!(t.check_usable(now), Err(AccessDenyReason::Expired));
    }

    #[test]
    fn test_quota_boundary() {
        let now = Utc::now();
        let mut t = token(now);
        t.max_access_count = 2;
        t.access_count = 1;
        assert!(t.check_usable(now).is_ok());
        t.access_count = 2;
        assert_eq!(t.check_usable(now), Err(AccessDenyReason::QuotaExceeded));
    }

    #[test]
    fn test_zero_quota_means_unlimited() {
        let now = Utc::now();
        let mut t = token(now);
        t.max_access_count = 0;
        t.access_count = i32::MAX;
        assert!(t.check_usable(now).is_ok());
    }

    #[test]
    fn test_reason_codes_are_stable() {
        assert_eq!(AccessDenyReason::QuotaExceeded.code(), "quota_exceeded");
        assert_eq!(AccessDenyReason::BadPassword.code(), "bad_password");
    }
}
