//! Admin access log handlers.

use axum::Json;
use axum::extract::{Query, State};

use snipshare_core::error::AppError;

use crate::dto::request::{AccessLogQuery, PurgeLogsQuery};
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/admin/access-logs
pub async fn search_access_logs(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<AccessLogQuery>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = state
        .share_service
        .search_logs(
            &auth,
            filter.share_token_id,
            filter.snippet_id,
            filter.success,
            params.into_page_request(),
        )
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": result })))
}

/// DELETE /api/admin/access-logs?older_than_days=N — bulk retention delete.
pub async fn purge_access_logs(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PurgeLogsQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let removed = state
        .share_service
        .purge_logs(&auth, query.older_than_days)
        .await?;

    Ok(Json(
        serde_json::json!({ "success": true, "data": { "removed": removed } }),
    ))
}
