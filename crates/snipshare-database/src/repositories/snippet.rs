//! Snippet repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use snipshare_core::error::{AppError, ErrorKind};
use snipshare_core::result::AppResult;
use snipshare_core::types::pagination::{PageRequest, PageResponse};
use snipshare_entity::snippet::model::{CreateSnippet, Snippet, SnippetVisibility};

/// Repository for snippet CRUD operations.
#[derive(Debug, Clone)]
pub struct SnippetRepository {
    pool: PgPool,
}

impl SnippetRepository {
    /// Create a new snippet repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a snippet by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Snippet>> {
        sqlx::query_as::<_, Snippet>("SELECT * FROM snippets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find snippet", e))
    }

    /// List snippets owned by a user, excluding soft-deleted rows.
    pub async fn find_by_owner(
        &self,
        owner_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Snippet>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM snippets WHERE owner_id = $1 AND status = 'normal'",
        )
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count snippets", e))?;

        let snippets = sqlx::query_as::<_, Snippet>(
            "SELECT * FROM snippets WHERE owner_id = $1 AND status = 'normal' \
             ORDER BY updated_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(owner_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list snippets", e))?;

        Ok(PageResponse::new(
            snippets,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List public snippets, optionally filtered by language.
    pub async fn find_public(
        &self,
        language: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Snippet>> {
        let (count_sql, select_sql) = if language.is_some() {
            (
                "SELECT COUNT(*) FROM snippets \
                 WHERE visibility = 'public' AND status = 'normal' AND language = $1",
                "SELECT * FROM snippets \
                 WHERE visibility = 'public' AND status = 'normal' AND language = $1 \
                 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
            )
        } else {
            (
                "SELECT COUNT(*) FROM snippets WHERE visibility = 'public' AND status = 'normal'",
                "SELECT * FROM snippets WHERE visibility = 'public' AND status = 'normal' \
                 ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            )
        };

        let mut count_query = sqlx::query_scalar::<_, i64>(count_sql);
        let mut select_query = sqlx::query_as::<_, Snippet>(select_sql);
        if let Some(lang) = language {
            count_query = count_query.bind(lang.to_string());
            select_query = select_query.bind(lang.to_string());
        }

        let total = count_query.fetch_one(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count public snippets", e)
        })?;

        let snippets = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list public snippets", e)
            })?;

        Ok(PageResponse::new(
            snippets,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new snippet.
    pub async fn create(&self, data: &CreateSnippet) -> AppResult<Snippet> {
        sqlx::query_as::<_, Snippet>(
            "INSERT INTO snippets (owner_id, title, description, language, content, visibility) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(data.owner_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.language)
        .bind(&data.content)
        .bind(data.visibility)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create snippet", e))
    }

    /// Update snippet fields.
    pub async fn update(
        &self,
        id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        language: Option<&str>,
        content: Option<&str>,
        visibility: Option<SnippetVisibility>,
    ) -> AppResult<Snippet> {
        sqlx::query_as::<_, Snippet>(
            "UPDATE snippets SET \
             title = COALESCE($2, title), \
             description = COALESCE($3, description), \
             language = COALESCE($4, language), \
             content = COALESCE($5, content), \
             visibility = COALESCE($6, visibility), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(language)
        .bind(content)
        .bind(visibility)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update snippet", e))
    }

    /// Soft-delete a snippet.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE snippets SET status = 'deleted', updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to delete snippet", e)
                })?;
        Ok(result.rows_affected() > 0)
    }

    /// Bump the view counter.
    pub async fn increment_view_count(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE snippets SET view_count = view_count + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to increment view count", e)
            })?;
        Ok(())
    }
}
