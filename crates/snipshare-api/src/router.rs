//! Route definitions for the Snipshare HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(snippet_routes())
        .merge(share_routes())
        .merge(comment_routes())
        .merge(message_routes())
        .merge(notification_routes())
        .merge(admin_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Auth endpoints: register, login, refresh, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/me", get(handlers::auth::me))
}

/// User self-service endpoints
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", put(handlers::user::update_profile))
        .route("/users/me/password", put(handlers::user::change_password))
}

/// Snippet CRUD
fn snippet_routes() -> Router<AppState> {
    Router::new()
        .route("/snippets", get(handlers::snippet::list_snippets))
        .route("/snippets", post(handlers::snippet::create_snippet))
        .route(
            "/snippets/public",
            get(handlers::snippet::list_public_snippets),
        )
        .route("/snippets/{id}", get(handlers::snippet::get_snippet))
        .route("/snippets/{id}", put(handlers::snippet::update_snippet))
        .route("/snippets/{id}", delete(handlers::snippet::delete_snippet))
}

/// Share lifecycle and public access
///
/// `GET /share/{id}` is the public token access route — the captured
/// segment is the opaque token string there, a share UUID everywhere
/// else. One parameter name, because the router requires consistent
/// names per position.
fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/share", get(handlers::share::list_shares))
        .route("/share", post(handlers::share::create_share))
        // Public access routes: no authentication, every attempt is logged.
        .route("/share/{id}", get(handlers::share::access_share))
        .route(
            "/share/access",
            post(handlers::share::access_share_with_password),
        )
        // Owner/admin lifecycle routes.
        .route("/share/{id}/detail", get(handlers::share::get_share))
        .route("/share/{id}", put(handlers::share::update_share))
        .route("/share/{id}/revoke", delete(handlers::share::revoke_share))
        .route("/share/{id}", delete(handlers::share::delete_share))
        .route("/share/{id}/extend", post(handlers::share::extend_share))
        .route(
            "/share/{id}/reset-stats",
            post(handlers::share::reset_share_stats),
        )
        .route("/share/{id}/logs", get(handlers::share::list_share_logs))
}

/// Comments and reports
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/snippets/{id}/comments",
            get(handlers::comment::list_comments),
        )
        .route(
            "/snippets/{id}/comments",
            post(handlers::comment::create_comment),
        )
        .route("/comments/{id}", put(handlers::comment::update_comment))
        .route("/comments/{id}", delete(handlers::comment::delete_comment))
        .route(
            "/comments/{id}/report",
            post(handlers::comment::report_comment),
        )
}

/// Direct messages
fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/messages", post(handlers::message::send_message))
        .route("/messages/inbox", get(handlers::message::inbox))
        .route("/messages/outbox", get(handlers::message::outbox))
        .route(
            "/messages/unread-count",
            get(handlers::message::unread_count),
        )
        .route("/messages/{id}", get(handlers::message::get_message))
        .route("/messages/{id}/read", put(handlers::message::mark_read))
        .route("/messages/{id}", delete(handlers::message::delete_message))
}

/// Notification endpoints
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
        .route(
            "/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
        .route(
            "/notifications/{id}",
            delete(handlers::notification::dismiss),
        )
}

/// Admin-only endpoints
fn admin_routes() -> Router<AppState> {
    Router::new()
        // User management
        .route("/admin/users", get(handlers::admin::users::list_users))
        .route("/admin/users/{id}", get(handlers::admin::users::get_user))
        .route(
            "/admin/users/{id}/role",
            put(handlers::admin::users::change_role),
        )
        .route(
            "/admin/users/{id}/status",
            put(handlers::admin::users::change_status),
        )
        // Share oversight
        .route("/admin/shares", get(handlers::admin::shares::list_shares))
        .route(
            "/admin/shares/{id}/revoke",
            delete(handlers::admin::shares::revoke_share),
        )
        // Access logs
        .route(
            "/admin/access-logs",
            get(handlers::admin::access_logs::search_access_logs),
        )
        .route(
            "/admin/access-logs",
            delete(handlers::admin::access_logs::purge_access_logs),
        )
        // Reports & moderation
        .route(
            "/admin/reports",
            get(handlers::admin::reports::list_reports),
        )
        .route(
            "/admin/reports/{id}",
            put(handlers::admin::reports::handle_report),
        )
        .route(
            "/admin/comments/{id}/moderate",
            put(handlers::admin::reports::moderate_comment),
        )
        // Settings
        .route(
            "/admin/settings",
            get(handlers::admin::settings::list_settings),
        )
        .route(
            "/admin/settings/{key}",
            get(handlers::admin::settings::get_setting),
        )
        .route(
            "/admin/settings/{key}",
            put(handlers::admin::settings::upsert_setting),
        )
        // Broadcast
        .route(
            "/admin/broadcast",
            post(handlers::admin::broadcast::send_broadcast),
        )
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/detailed", get(handlers::health::detailed_health))
}
