//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use snipshare_entity::comment::model::CommentStatus;
use snipshare_entity::comment::report::ReportStatus;
use snipshare_entity::share::model::SharePermission;
use snipshare_entity::snippet::model::SnippetVisibility;
use snipshare_entity::user::{UserRole, UserStatus};

// ── Auth ───────────────────────────────────────────────────

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    /// Email address.
    #[validate(email)]
    pub email: String,
    /// Password.
    #[validate(length(min = 8))]
    pub password: String,
    /// Display name.
    pub display_name: Option<String>,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1))]
    pub current_password: String,
    /// New password.
    #[validate(length(min = 8))]
    pub new_password: String,
}

/// Update profile request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// Display name.
    pub display_name: Option<String>,
    /// Email.
    pub email: Option<String>,
}

// ── Snippets ───────────────────────────────────────────────

/// Create snippet request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSnippetRequest {
    /// Snippet title.
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Programming language tag.
    #[validate(length(min = 1, max = 64))]
    pub language: String,
    /// Snippet source text.
    #[validate(length(min = 1))]
    pub content: String,
    /// Visibility level.
    pub visibility: SnippetVisibility,
}

/// Update snippet request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSnippetRequest {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New language tag.
    pub language: Option<String>,
    /// New source text.
    pub content: Option<String>,
    /// New visibility.
    pub visibility: Option<SnippetVisibility>,
}

/// Public snippet listing filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicSnippetQuery {
    /// Filter by language tag.
    pub language: Option<String>,
}

// ── Shares ─────────────────────────────────────────────────

/// Create share token request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateShareRequest {
    /// Snippet to share.
    pub snippet_id: Uuid,
    /// Free-text description.
    pub description: Option<String>,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
    /// Access quota (0 = unlimited).
    #[serde(default)]
    pub max_access_count: i32,
    /// Permission level.
    pub permission: SharePermission,
    /// Optional access password.
    pub password: Option<String>,
    /// Allow raw download.
    #[serde(default = "default_true")]
    pub allow_download: bool,
    /// Allow copy-to-clipboard.
    #[serde(default = "default_true")]
    pub allow_copy: bool,
}

/// Update share token request.
///
/// Omitted fields are left unchanged; explicit `null` clears description
/// or removes password protection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateShareRequest {
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    /// New password (`null` removes protection).
    #[serde(default, skip_serializing_if = "Option::is_none")]
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

/// Body for `POST /api/share/access`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AccessShareRequest {
    /// The opaque token string.
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
    /// Password for protected shares.
    pub password: Option<String>,
}

/// Body for `POST /api/share/:id/extend`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtendShareRequest {
    /// Hours to add to the expiry (1..=8760).
    pub hours: i64,
}

/// Query filters for the admin access log search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessLogQuery {
    /// Filter by share token.
    pub share_token_id: Option<Uuid>,
    /// Filter by snippet.
    pub snippet_id: Option<Uuid>,
    /// Filter by outcome.
    pub success: Option<bool>,
}

/// Query for the admin access log retention delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurgeLogsQuery {
    /// Delete rows older than this many days.
    pub older_than_days: i64,
}

// ── Comments ───────────────────────────────────────────────

/// Create comment request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCommentRequest {
    /// Comment text.
    #[validate(length(min = 1, max = 4000))]
    pub content: String,
    /// Parent comment for threaded replies.
    pub parent_id: Option<Uuid>,
}

/// Update comment request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    /// New comment text.
    #[validate(length(min = 1, max = 4000))]
    pub content: String,
}

/// Admin comment moderation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerateCommentRequest {
    /// Target moderation status.
    pub status: CommentStatus,
}

/// File a comment report.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReportCommentRequest {
    /// Why the comment is being reported.
    #[validate(length(min = 1, max = 1000))]
    pub reason: String,
}

/// Admin report handling request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandleReportRequest {
    /// Target handling status.
    pub status: ReportStatus,
}

/// Query filters for the admin report listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportQuery {
    /// Filter by handling status.
    pub status: Option<ReportStatus>,
}

// ── Messages ───────────────────────────────────────────────

/// Send message request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendMessageRequest {
    /// Receiving user.
    pub recipient_id: Uuid,
    /// Optional subject line.
    pub subject: Option<String>,
    /// Message body.
    #[validate(length(min = 1, max = 8000))]
    pub body: String,
}

// ── Admin ──────────────────────────────────────────────────

/// Change user role request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRoleRequest {
    /// New role.
    pub role: UserRole,
}

/// Change user status request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeStatusRequest {
    /// New status.
    pub status: UserStatus,
}

/// Upsert system setting request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertSettingRequest {
    /// Setting value as JSON.
    pub value: serde_json::Value,
    /// Human-readable description.
    pub description: Option<String>,
}

/// Admin broadcast request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BroadcastRequest {
    /// Notification title.
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    /// Notification body.
    #[validate(length(min = 1, max = 4000))]
    pub body: String,
}

fn default_true() -> bool {
    true
}
