//! Admin broadcast handlers.

use axum::Json;
use axum::extract::State;

use snipshare_core::error::AppError;

use crate::dto::request::BroadcastRequest;
use crate::dto::validate_body;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/admin/broadcast
pub async fn send_broadcast(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<BroadcastRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    validate_body(&req)?;

    let recipients = state
        .notification_service
        .broadcast(&auth, req.title, req.body)
        .await?;

    Ok(Json(
        serde_json::json!({ "success": true, "data": { "recipients": recipients } }),
    ))
}
