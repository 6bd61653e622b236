//! Admin system settings handlers.

use axum::Json;
use axum::extract::{Path, State};

use snipshare_core::error::AppError;

use crate::dto::request::UpsertSettingRequest;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/settings
pub async fn list_settings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let settings = state.settings_service.list(&auth).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": settings })))
}

/// GET /api/admin/settings/:key
pub async fn get_setting(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(key): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let setting = state.settings_service.get(&auth, &key).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": setting })))
}

/// PUT /api/admin/settings/:key
pub async fn upsert_setting(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(key): Path<String>,
    Json(req): Json<UpsertSettingRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let setting = state
        .settings_service
        .upsert(&auth, &key, req.value, req.description)
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": setting })))
}
