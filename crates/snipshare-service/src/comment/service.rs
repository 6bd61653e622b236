//! Comment CRUD, moderation, and report handling.
//!
//! Read paths go through the injected TTL cache keyed by the filter
//! signature; every write invalidates the snippet's comment key prefix.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use snipshare_auth::policy::{Action, Policy};
use snipshare_cache::{MemoryCache, keys};
use snipshare_core::error::AppError;
use snipshare_core::traits::cache::CacheProvider;
use snipshare_core::types::pagination::{PageRequest, PageResponse};
use snipshare_database::repositories::comment::CommentRepository;
use snipshare_database::repositories::report::CommentReportRepository;
use snipshare_database::repositories::snippet::SnippetRepository;
use snipshare_entity::comment::model::{Comment, CommentStatus, CreateComment};
use snipshare_entity::comment::report::{CommentReport, CreateCommentReport, ReportStatus};
use snipshare_entity::notification::model::{CreateNotification, NotificationCategory};

use crate::context::RequestContext;
use crate::notification::NotificationService;

/// Manages comments on snippets and the reports filed against them.
#[derive(Debug, Clone)]
pub struct CommentService {
    /// Comment repository.
    comment_repo: Arc<CommentRepository>,
    /// Report repository.
    report_repo: Arc<CommentReportRepository>,
    /// Snippet repository, for existence and ownership checks.
    snippet_repo: Arc<SnippetRepository>,
    /// Notification service, for comment/report notifications.
    notifications: Arc<NotificationService>,
    /// Read-path cache.
    cache: Arc<MemoryCache>,
    /// Capability policy.
    policy: Arc<Policy>,
}

impl CommentService {
    /// Creates a new comment service.
    pub fn new(
        comment_repo: Arc<CommentRepository>,
        report_repo: Arc<CommentReportRepository>,
        snippet_repo: Arc<SnippetRepository>,
        notifications: Arc<NotificationService>,
        cache: Arc<MemoryCache>,
        policy: Arc<Policy>,
    ) -> Self {
        Self {
            comment_repo,
            report_repo,
            snippet_repo,
            notifications,
            cache,
            policy,
        }
    }

    /// Lists visible comments on a snippet, cached per filter signature.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        snippet_id: Uuid,
        page: PageRequest,
    ) -> Result<PageResponse<Comment>, AppError> {
        let snippet = self
            .snippet_repo
            .find_by_id(snippet_id)
            .await?
            .filter(|s| !s.is_deleted())
            .ok_or_else(|| AppError::not_found("Snippet not found"))?;
        if !snippet.readable_by(ctx.user_id) && !ctx.is_admin() {
            return Err(AppError::not_found("Snippet not found"));
        }

        let key = keys::comment_list(snippet_id, page.page, page.page_size);
        if let Ok(Some(cached)) = self.cache.get_json::<PageResponse<Comment>>(&key).await {
            return Ok(cached);
        }

        let result = self.comment_repo.find_by_snippet(snippet_id, &page).await?;

        if let Err(e) = self.cache.set_json(&key, &result).await {
            warn!(error = %e, "Failed to cache comment list");
        }

        Ok(result)
    }

    /// Creates a comment (or threaded reply) and notifies the snippet owner.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        snippet_id: Uuid,
        parent_id: Option<Uuid>,
        content: String,
    ) -> Result<Comment, AppError> {
        if content.trim().is_empty() {
            return Err(AppError::validation("Comment content must not be empty"));
        }

        let snippet = self
            .snippet_repo
            .find_by_id(snippet_id)
            .await?
            .filter(|s| !s.is_deleted())
            .ok_or_else(|| AppError::not_found("Snippet not found"))?;
        if !snippet.readable_by(ctx.user_id) && !ctx.is_admin() {
            return Err(AppError::not_found("Snippet not found"));
        }

        if let Some(parent) = parent_id {
            let parent_comment = self
                .comment_repo
                .find_by_id(parent)
                .await?
                .ok_or_else(|| AppError::not_found("Parent comment not found"))?;
            if parent_comment.snippet_id != snippet_id {
                return Err(AppError::validation(
                    "Parent comment belongs to a different snippet",
                ));
            }
        }

        let comment = self
            .comment_repo
            .create(&CreateComment {
                snippet_id,
                author_id: ctx.user_id,
                parent_id,
                content,
            })
            .await?;

        self.invalidate(snippet_id).await;

        if snippet.owner_id != ctx.user_id {
            self.notifications
                .notify(CreateNotification {
                    user_id: snippet.owner_id,
                    category: NotificationCategory::Comment,
                    title: format!("New comment on \"{}\"", snippet.title),
                    body: format!("{} commented on your snippet", ctx.username),
                })
                .await;
        }

        info!(user_id = %ctx.user_id, comment_id = %comment.id, "Comment created");
        Ok(comment)
    }

    /// Edits a comment's text (author only, admins included via policy).
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        content: String,
    ) -> Result<Comment, AppError> {
        if content.trim().is_empty() {
            return Err(AppError::validation("Comment content must not be empty"));
        }

        let comment = self
            .comment_repo
            .find_by_id(id)
            .await?
            .filter(|c| c.status != CommentStatus::Deleted)
            .ok_or_else(|| AppError::not_found("Comment not found"))?;

        self.policy
            .authorize(ctx.user_id, ctx.role, comment.author_id, Action::Modify)?;

        let updated = self.comment_repo.update_content(id, &content).await?;
        self.invalidate(comment.snippet_id).await;
        Ok(updated)
    }

    /// Soft-deletes a comment (author or admin).
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        let comment = self
            .comment_repo
            .find_by_id(id)
            .await?
            .filter(|c| c.status != CommentStatus::Deleted)
            .ok_or_else(|| AppError::not_found("Comment not found"))?;

        self.policy
            .authorize(ctx.user_id, ctx.role, comment.author_id, Action::Modify)?;

        self.comment_repo
            .update_status(id, CommentStatus::Deleted)
            .await?;
        self.invalidate(comment.snippet_id).await;

        info!(user_id = %ctx.user_id, comment_id = %id, "Comment deleted");
        Ok(())
    }

    /// Sets a comment's moderation status (admin only). Last write wins.
    pub async fn moderate(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        status: CommentStatus,
    ) -> Result<Comment, AppError> {
        self.policy
            .authorize(ctx.user_id, ctx.role, ctx.user_id, Action::Moderate)?;

        let comment = self
            .comment_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Comment not found"))?;

        let updated = self.comment_repo.update_status(id, status).await?;
        self.invalidate(comment.snippet_id).await;

        info!(user_id = %ctx.user_id, comment_id = %id, status = ?status, "Comment moderated");
        Ok(updated)
    }

    /// Files a report against a comment.
    pub async fn report(
        &self,
        ctx: &RequestContext,
        comment_id: Uuid,
        reason: String,
    ) -> Result<CommentReport, AppError> {
        if reason.trim().is_empty() {
            return Err(AppError::validation("Report reason must not be empty"));
        }

        self.comment_repo
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| AppError::not_found("Comment not found"))?;

        let report = self
            .report_repo
            .create(&CreateCommentReport {
                comment_id,
                reporter_id: ctx.user_id,
                reason,
            })
            .await?;

        info!(user_id = %ctx.user_id, report_id = %report.id, "Comment reported");
        Ok(report)
    }

    /// Lists reports, optionally filtered by status (admin only).
    pub async fn list_reports(
        &self,
        ctx: &RequestContext,
        status: Option<ReportStatus>,
        page: PageRequest,
    ) -> Result<PageResponse<CommentReport>, AppError> {
        self.policy
            .authorize(ctx.user_id, ctx.role, ctx.user_id, Action::Moderate)?;
        self.report_repo.find_all(status, &page).await
    }

    /// Sets a report's handling status (admin only) and notifies the
    /// reporter when the report reaches a terminal state.
    pub async fn handle_report(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        status: ReportStatus,
    ) -> Result<CommentReport, AppError> {
        self.policy
            .authorize(ctx.user_id, ctx.role, ctx.user_id, Action::Moderate)?;

        self.report_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Report not found"))?;

        let updated = self
            .report_repo
            .update_status(id, status, ctx.user_id)
            .await?;

        if matches!(status, ReportStatus::Resolved | ReportStatus::Rejected) {
            let outcome = if status == ReportStatus::Resolved {
                "resolved"
            } else {
                "rejected"
            };
            self.notifications
                .notify(CreateNotification {
                    user_id: updated.reporter_id,
                    category: NotificationCategory::System,
                    title: "Your report was reviewed".to_string(),
                    body: format!("A moderator has {outcome} your comment report"),
                })
                .await;
        }

        info!(user_id = %ctx.user_id, report_id = %id, status = ?status, "Report handled");
        Ok(updated)
    }

    /// Drops every cached comment page for a snippet.
    async fn invalidate(&self, snippet_id: Uuid) {
        if let Err(e) = self.cache.delete_prefix(&keys::comment_prefix(snippet_id)).await {
            warn!(error = %e, "Failed to invalidate comment cache");
        }
    }
}
