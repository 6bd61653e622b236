//! Admin user management handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use snipshare_core::error::AppError;

use crate::dto::request::{ChangeRoleRequest, ChangeStatusRequest};
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = state
        .admin_user_service
        .list(&auth, params.into_page_request())
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// GET /api/admin/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = state.admin_user_service.get(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": user })))
}

/// PUT /api/admin/users/:id/role
pub async fn change_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ChangeRoleRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = state
        .admin_user_service
        .change_role(&auth, id, req.role)
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": user })))
}

/// PUT /api/admin/users/:id/status
pub async fn change_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ChangeStatusRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = state
        .admin_user_service
        .change_status(&auth, id, req.status)
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": user })))
}
