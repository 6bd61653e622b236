//! Admin comment report and moderation handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use snipshare_core::error::AppError;

use crate::dto::request::{HandleReportRequest, ModerateCommentRequest, ReportQuery};
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/admin/reports
pub async fn list_reports(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<ReportQuery>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = state
        .comment_service
        .list_reports(&auth, filter.status, params.into_page_request())
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// PUT /api/admin/reports/:id
pub async fn handle_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<HandleReportRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let report = state
        .comment_service
        .handle_report(&auth, id, req.status)
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": report })))
}

/// PUT /api/admin/comments/:id/moderate
pub async fn moderate_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ModerateCommentRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let comment = state
        .comment_service
        .moderate(&auth, id, req.status)
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": comment })))
}
