//! Share access log repository implementation.
//!
//! Rows are append-only; the only write paths are the insert and the
//! admin bulk retention delete.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use snipshare_core::error::{AppError, ErrorKind};
use snipshare_core::result::AppResult;
use snipshare_core::types::pagination::{PageRequest, PageResponse};
use snipshare_entity::share::access_log::{CreateShareAccessLog, ShareAccessLog};

/// Repository for share access log entries.
#[derive(Debug, Clone)]
pub struct ShareAccessLogRepository {
    pool: PgPool,
}

impl ShareAccessLogRepository {
    /// Create a new access log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append one access attempt row.
    pub async fn create(&self, data: &CreateShareAccessLog) -> AppResult<ShareAccessLog> {
        sqlx::query_as::<_, ShareAccessLog>(
            "INSERT INTO share_access_logs (share_token_id, snippet_id, ip_address, user_agent, \
             device_type, browser, success, failure_reason) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(data.share_token_id)
        .bind(data.snippet_id)
        .bind(&data.ip_address)
        .bind(&data.user_agent)
        .bind(&data.device_type)
        .bind(&data.browser)
        .bind(data.success)
        .bind(&data.failure_reason)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to append access log", e))
    }

    /// List attempts for one share token, newest first.
    pub async fn find_by_token(
        &self,
        share_token_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ShareAccessLog>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM share_access_logs WHERE share_token_id = $1")
                .bind(share_token_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count access logs", e)
                })?;

        let logs = sqlx::query_as::<_, ShareAccessLog>(
            "SELECT * FROM share_access_logs WHERE share_token_id = $1 \
             ORDER BY accessed_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(share_token_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list access logs", e))?;

        Ok(PageResponse::new(
            logs,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Search the log with optional filters (admin view).
    pub async fn search(
        &self,
        share_token_id: Option<Uuid>,
        snippet_id: Option<Uuid>,
        success: Option<bool>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ShareAccessLog>> {
        let mut conditions = Vec::new();
        let mut param_idx = 1u32;

        if share_token_id.is_some() {
            conditions.push(format!("share_token_id = ${param_idx}"));
            param_idx += 1;
        }
        if snippet_id.is_some() {
            conditions.push(format!("snippet_id = ${param_idx}"));
            param_idx += 1;
        }
        if success.is_some() {
            conditions.push(format!("success = ${param_idx}"));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM share_access_logs {where_clause}");
        let select_sql = format!(
            "SELECT * FROM share_access_logs {where_clause} \
             ORDER BY accessed_at DESC LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, ShareAccessLog>(&select_sql);

        if let Some(tid) = share_token_id {
            count_query = count_query.bind(tid);
            select_query = select_query.bind(tid);
        }
        if let Some(sid) = snippet_id {
            count_query = count_query.bind(sid);
            select_query = select_query.bind(sid);
        }
        if let Some(s) = success {
            count_query = count_query.bind(s);
            select_query = select_query.bind(s);
        }

        let total = count_query.fetch_one(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count access logs", e)
        })?;

        let logs = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to search access logs", e)
            })?;

        Ok(PageResponse::new(
            logs,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Bulk-delete rows older than a cutoff (retention). Returns the
    /// number of rows removed.
    pub async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM share_access_logs WHERE accessed_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to purge access logs", e)
            })?;
        Ok(result.rows_affected())
    }
}
