//! Snippet CRUD handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use snipshare_core::error::AppError;

use crate::dto::request::{CreateSnippetRequest, PublicSnippetQuery, UpdateSnippetRequest};
use crate::dto::validate_body;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/snippets
pub async fn list_snippets(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = state
        .snippet_service
        .list_own(&auth, params.into_page_request())
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// GET /api/snippets/public
pub async fn list_public_snippets(
    State(state): State<AppState>,
    Query(filter): Query<PublicSnippetQuery>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = state
        .snippet_service
        .list_public(filter.language.as_deref(), params.into_page_request())
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// POST /api/snippets
pub async fn create_snippet(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateSnippetRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    validate_body(&req)?;

    let snippet = state
        .snippet_service
        .create(
            &auth,
            snipshare_service::snippet::service::CreateSnippetRequest {
                title: req.title,
                description: req.description,
                language: req.language,
                content: req.content,
                visibility: req.visibility,
            },
        )
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": snippet })))
}

/// GET /api/snippets/:id
pub async fn get_snippet(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let snippet = state.snippet_service.get(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": snippet })))
}

/// PUT /api/snippets/:id
pub async fn update_snippet(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateSnippetRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let snippet = state
        .snippet_service
        .update(
            &auth,
            id,
            snipshare_service::snippet::service::UpdateSnippetRequest {
                title: req.title,
                description: req.description,
                language: req.language,
                content: req.content,
                visibility: req.visibility,
            },
        )
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": snippet })))
}

/// DELETE /api/snippets/:id
pub async fn delete_snippet(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.snippet_service.delete(&auth, id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Snippet deleted" } }),
    ))
}
