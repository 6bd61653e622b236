//! Comment and report handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use snipshare_core::error::AppError;

use crate::dto::request::{CreateCommentRequest, ReportCommentRequest, UpdateCommentRequest};
use crate::dto::validate_body;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/snippets/:id/comments
pub async fn list_comments(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(snippet_id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = state
        .comment_service
        .list(&auth, snippet_id, params.into_page_request())
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// POST /api/snippets/:id/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(snippet_id): Path<Uuid>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    validate_body(&req)?;

    let comment = state
        .comment_service
        .create(&auth, snippet_id, req.parent_id, req.content)
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": comment })))
}

/// PUT /api/comments/:id
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCommentRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    validate_body(&req)?;

    let comment = state.comment_service.update(&auth, id, req.content).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": comment })))
}

/// DELETE /api/comments/:id
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.comment_service.delete(&auth, id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Comment deleted" } }),
    ))
}

/// POST /api/comments/:id/report
pub async fn report_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ReportCommentRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    validate_body(&req)?;

    let report = state.comment_service.report(&auth, id, req.reason).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": report })))
}
