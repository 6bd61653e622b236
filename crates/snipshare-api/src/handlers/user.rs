//! User self-service handlers.

use axum::Json;
use axum::extract::State;

use snipshare_core::error::AppError;

use crate::dto::request::{ChangePasswordRequest, UpdateProfileRequest};
use crate::dto::validate_body;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// PUT /api/users/me
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = state
        .user_service
        .update_profile(&auth, req.email, req.display_name)
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": user })))
}

/// PUT /api/users/me/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    validate_body(&req)?;

    state
        .user_service
        .change_password(&auth, &req.current_password, &req.new_password)
        .await?;

    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Password changed" } }),
    ))
}
