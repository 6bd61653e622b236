//! Share token lifecycle and public access handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use snipshare_core::error::AppError;

use crate::dto::request::{
    AccessShareRequest, CreateShareRequest, ExtendShareRequest, UpdateShareRequest,
};
use crate::dto::validate_body;
use crate::extractors::{AuthUser, ClientMetaParams, PaginationParams};
use crate::state::AppState;

/// GET /api/share
pub async fn list_shares(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = state
        .share_service
        .list_own(&auth, params.into_page_request())
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// POST /api/share
pub async fn create_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateShareRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    validate_body(&req)?;

    // The token string is included here and shown once; callers are
    // expected to persist it client-side.
    let share = state
        .share_service
        .create(
            &auth,
            snipshare_service::share::service::CreateShareRequest {
                snippet_id: req.snippet_id,
                description: req.description,
                expires_at: req.expires_at,
                max_access_count: req.max_access_count,
                permission: req.permission,
                password: req.password,
                allow_download: req.allow_download,
                allow_copy: req.allow_copy,
            },
        )
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": share })))
}

/// GET /api/share/:id/detail
pub async fn get_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let share = state.share_service.get(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": share })))
}

/// PUT /api/share/:id
pub async fn update_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateShareRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let share = state
        .share_service
        .update(
            &auth,
            id,
            snipshare_service::share::service::UpdateShareRequest {
                description: req.description,
                password: req.password,
                permission: req.permission,
                allow_download: req.allow_download,
                allow_copy: req.allow_copy,
                expires_at: req.expires_at,
                max_access_count: req.max_access_count,
            },
        )
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": share })))
}

/// DELETE /api/share/:id/revoke
pub async fn revoke_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.share_service.revoke(&auth, id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Share revoked" } }),
    ))
}

/// DELETE /api/share/:id
pub async fn delete_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.share_service.delete(&auth, id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Share deleted" } }),
    ))
}

/// POST /api/share/:id/extend
pub async fn extend_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ExtendShareRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let share = state.share_service.extend_expiry(&auth, id, req.hours).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": share })))
}

/// POST /api/share/:id/reset-stats
pub async fn reset_share_stats(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let share = state.share_service.reset_stats(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": share })))
}

/// GET /api/share/:id/logs
pub async fn list_share_logs(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = state
        .share_service
        .list_logs(&auth, id, params.into_page_request())
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// GET /api/share/:token — public access, no authentication.
///
/// Validates the token, logs the attempt, bumps the counter, and returns
/// the snippet payload. Password-protected shares must use the POST form.
pub async fn access_share(
    State(state): State<AppState>,
    meta: ClientMetaParams,
    Path(token): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let grant = state.access_validator.access(&token, None, &meta.0).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": grant })))
}

/// POST /api/share/access — public access with optional password.
pub async fn access_share_with_password(
    State(state): State<AppState>,
    meta: ClientMetaParams,
    Json(req): Json<AccessShareRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    validate_body(&req)?;

    let grant = state
        .access_validator
        .access(&req.token, req.password.as_deref(), &meta.0)
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": grant })))
}
