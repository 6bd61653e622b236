//! Direct message handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use snipshare_core::error::AppError;

use crate::dto::request::SendMessageRequest;
use crate::dto::validate_body;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/messages/inbox
pub async fn inbox(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = state
        .message_service
        .inbox(&auth, params.into_page_request())
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// GET /api/messages/outbox
pub async fn outbox(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = state
        .message_service
        .outbox(&auth, params.into_page_request())
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// GET /api/messages/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let count = state.message_service.unread_count(&auth).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "unread": count } }),
    ))
}

/// POST /api/messages
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    validate_body(&req)?;

    let message = state
        .message_service
        .send(&auth, req.recipient_id, req.subject, req.body)
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": message })))
}

/// GET /api/messages/:id
pub async fn get_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let message = state.message_service.get(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": message })))
}

/// PUT /api/messages/:id/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.message_service.mark_read(&auth, id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Marked read" } }),
    ))
}

/// DELETE /api/messages/:id
pub async fn delete_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.message_service.delete(&auth, id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Message deleted" } }),
    ))
}
