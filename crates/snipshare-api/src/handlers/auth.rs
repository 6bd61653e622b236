//! Registration, login, refresh, and current-user handlers.

use axum::Json;
use axum::extract::State;

use snipshare_core::error::AppError;

use crate::dto::request::{LoginRequest, RefreshRequest, RegisterRequest};
use crate::dto::validate_body;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    validate_body(&req)?;

    let user = state
        .user_service
        .register(req.username, req.email, req.password, req.display_name)
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": user })))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    validate_body(&req)?;

    let authenticated = state.user_service.login(&req.username, &req.password).await?;

    Ok(Json(
        serde_json::json!({ "success": true, "data": authenticated }),
    ))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let authenticated = state.user_service.refresh(&req.refresh_token).await?;

    Ok(Json(
        serde_json::json!({ "success": true, "data": authenticated }),
    ))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = state.user_service.me(&auth).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": user })))
}
