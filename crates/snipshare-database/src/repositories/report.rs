//! Comment report repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use snipshare_core::error::{AppError, ErrorKind};
use snipshare_core::result::AppResult;
use snipshare_core::types::pagination::{PageRequest, PageResponse};
use snipshare_entity::comment::report::{CommentReport, CreateCommentReport, ReportStatus};

/// Repository for comment reports.
#[derive(Debug, Clone)]
pub struct CommentReportRepository {
    pool: PgPool,
}

impl CommentReportRepository {
    /// Create a new report repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a report by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CommentReport>> {
        sqlx::query_as::<_, CommentReport>("SELECT * FROM comment_reports WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find report", e))
    }

    /// List reports, optionally filtered by status, newest first.
    pub async fn find_all(
        &self,
        status: Option<ReportStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<CommentReport>> {
        let (count_sql, select_sql) = if status.is_some() {
            (
                "SELECT COUNT(*) FROM comment_reports WHERE status = $1",
                "SELECT * FROM comment_reports WHERE status = $1 \
                 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
            )
        } else {
            (
                "SELECT COUNT(*) FROM comment_reports",
                "SELECT * FROM comment_reports ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            )
        };

        let mut count_query = sqlx::query_scalar::<_, i64>(count_sql);
        let mut select_query = sqlx::query_as::<_, CommentReport>(select_sql);
        if let Some(s) = status {
            count_query = count_query.bind(s);
            select_query = select_query.bind(s);
        }

        let total = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count reports", e))?;

        let reports = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list reports", e))?;

        Ok(PageResponse::new(
            reports,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// File a new report.
    pub async fn create(&self, data: &CreateCommentReport) -> AppResult<CommentReport> {
        sqlx::query_as::<_, CommentReport>(
            "INSERT INTO comment_reports (comment_id, reporter_id, reason) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(data.comment_id)
        .bind(data.reporter_id)
        .bind(&data.reason)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create report", e))
    }

    /// Set the handling status. Last write wins.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: ReportStatus,
        resolved_by: Uuid,
    ) -> AppResult<CommentReport> {
        sqlx::query_as::<_, CommentReport>(
            "UPDATE comment_reports SET status = $2, resolved_by = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(resolved_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update report status", e)
        })
    }
}
