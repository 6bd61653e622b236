//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use snipshare_auth::jwt::decoder::JwtDecoder;
use snipshare_auth::jwt::encoder::JwtEncoder;
use snipshare_auth::password::hasher::PasswordHasher;
use snipshare_auth::policy::Policy;
use snipshare_cache::MemoryCache;
use snipshare_core::config::AppConfig;

use snipshare_service::comment::CommentService;
use snipshare_service::message::MessageService;
use snipshare_service::notification::NotificationService;
use snipshare_service::settings::SettingsService;
use snipshare_service::share::{AccessValidator, ShareService};
use snipshare_service::snippet::SnippetService;
use snipshare_service::user::{AdminUserService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// In-process TTL cache
    pub cache: Arc<MemoryCache>,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token encoder
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Password hasher (Argon2)
    pub password_hasher: Arc<PasswordHasher>,
    /// Capability policy
    pub policy: Arc<Policy>,

    // ── Services ─────────────────────────────────────────────
    /// User self-service
    pub user_service: Arc<UserService>,
    /// Admin user management
    pub admin_user_service: Arc<AdminUserService>,
    /// Snippet service
    pub snippet_service: Arc<SnippetService>,
    /// Share lifecycle service
    pub share_service: Arc<ShareService>,
    /// Public share access validator
    pub access_validator: Arc<AccessValidator>,
    /// Comment service
    pub comment_service: Arc<CommentService>,
    /// Message service
    pub message_service: Arc<MessageService>,
    /// Notification service
    pub notification_service: Arc<NotificationService>,
    /// System settings service
    pub settings_service: Arc<SettingsService>,
}
