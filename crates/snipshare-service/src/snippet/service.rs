//! Snippet CRUD service.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use snipshare_auth::policy::{Action, Policy};
use snipshare_core::error::AppError;
use snipshare_core::types::pagination::{PageRequest, PageResponse};
use snipshare_database::repositories::snippet::SnippetRepository;
use snipshare_entity::snippet::model::{CreateSnippet, Snippet, SnippetVisibility};

use crate::context::RequestContext;

/// Request to create a snippet.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateSnippetRequest {
    /// Snippet title.
    pub title: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Programming language tag.
    pub language: String,
    /// The snippet source text.
    pub content: String,
    /// Visibility level.
    pub visibility: SnippetVisibility,
}

/// Request to update a snippet. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UpdateSnippetRequest {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New language tag.
    pub language: Option<String>,
    /// New source text.
    pub content: Option<String>,
    /// New visibility.
    pub visibility: Option<SnippetVisibility>,
}

/// Manages snippet creation, reading, and lifecycle.
#[derive(Debug, Clone)]
pub struct SnippetService {
    /// Snippet repository.
    snippet_repo: Arc<SnippetRepository>,
    /// Capability policy.
    policy: Arc<Policy>,
}

impl SnippetService {
    /// Creates a new snippet service.
    pub fn new(snippet_repo: Arc<SnippetRepository>, policy: Arc<Policy>) -> Self {
        Self {
            snippet_repo,
            policy,
        }
    }

    /// Creates a new snippet owned by the caller.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateSnippetRequest,
    ) -> Result<Snippet, AppError> {
        let snippet = self
            .snippet_repo
            .create(&CreateSnippet {
                owner_id: ctx.user_id,
                title: req.title,
                description: req.description,
                language: req.language,
                content: req.content,
                visibility: req.visibility,
            })
            .await?;

        info!(user_id = %ctx.user_id, snippet_id = %snippet.id, "Snippet created");
        Ok(snippet)
    }

    /// Gets a snippet the caller is allowed to see.
    ///
    /// Reads by someone other than the owner bump the view counter.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Snippet, AppError> {
        let snippet = self
            .snippet_repo
            .find_by_id(id)
            .await?
            .filter(|s| !s.is_deleted())
            .ok_or_else(|| AppError::not_found("Snippet not found"))?;

        if !snippet.readable_by(ctx.user_id) && !ctx.is_admin() {
            return Err(AppError::not_found("Snippet not found"));
        }

        if snippet.owner_id != ctx.user_id {
            // Best-effort counter; a failed bump must not fail the read.
            let _ = self.snippet_repo.increment_view_count(id).await;
        }

        Ok(snippet)
    }

    /// Lists the caller's own snippets.
    pub async fn list_own(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<Snippet>, AppError> {
        self.snippet_repo.find_by_owner(ctx.user_id, &page).await
    }

    /// Lists public snippets, optionally filtered by language.
    pub async fn list_public(
        &self,
        language: Option<&str>,
        page: PageRequest,
    ) -> Result<PageResponse<Snippet>, AppError> {
        self.snippet_repo.find_public(language, &page).await
    }

    /// Updates a snippet (owner or admin).
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        req: UpdateSnippetRequest,
    ) -> Result<Snippet, AppError> {
        let snippet = self
            .snippet_repo
            .find_by_id(id)
            .await?
            .filter(|s| !s.is_deleted())
            .ok_or_else(|| AppError::not_found("Snippet not found"))?;

        self.policy
            .authorize(ctx.user_id, ctx.role, snippet.owner_id, Action::Modify)?;

        let updated = self
            .snippet_repo
            .update(
                id,
                req.title.as_deref(),
                req.description.as_deref(),
                req.language.as_deref(),
                req.content.as_deref(),
                req.visibility,
            )
            .await?;

        info!(user_id = %ctx.user_id, snippet_id = %id, "Snippet updated");
        Ok(updated)
    }

    /// Soft-deletes a snippet (owner or admin).
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        let snippet = self
            .snippet_repo
            .find_by_id(id)
            .await?
            .filter(|s| !s.is_deleted())
            .ok_or_else(|| AppError::not_found("Snippet not found"))?;

        self.policy
            .authorize(ctx.user_id, ctx.role, snippet.owner_id, Action::Modify)?;

        self.snippet_repo.soft_delete(id).await?;
        info!(user_id = %ctx.user_id, snippet_id = %id, "Snippet deleted");
        Ok(())
    }
}
