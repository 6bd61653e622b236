//! Notification CRUD and broadcast fan-out.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use snipshare_auth::policy::{Action, Policy};
use snipshare_core::error::AppError;
use snipshare_core::types::pagination::{PageRequest, PageResponse};
use snipshare_database::repositories::notification::NotificationRepository;
use snipshare_database::repositories::user::UserRepository;
use snipshare_entity::notification::model::{
    CreateNotification, Notification, NotificationCategory,
};

use crate::context::RequestContext;

/// Manages user notifications.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification repository.
    notif_repo: Arc<NotificationRepository>,
    /// User repository, for broadcast fan-out.
    user_repo: Arc<UserRepository>,
    /// Capability policy.
    policy: Arc<Policy>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(
        notif_repo: Arc<NotificationRepository>,
        user_repo: Arc<UserRepository>,
        policy: Arc<Policy>,
    ) -> Self {
        Self {
            notif_repo,
            user_repo,
            policy,
        }
    }

    /// Lists notifications for the current user.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<Notification>, AppError> {
        self.notif_repo.find_by_user(ctx.user_id, &page).await
    }

    /// Gets the unread notification count.
    pub async fn unread_count(&self, ctx: &RequestContext) -> Result<i64, AppError> {
        self.notif_repo.count_unread(ctx.user_id).await
    }

    /// Marks a notification as read.
    pub async fn mark_read(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        self.notif_repo.mark_read(id, ctx.user_id, Utc::now()).await?;
        Ok(())
    }

    /// Marks all notifications as read for the current user.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> Result<u64, AppError> {
        self.notif_repo.mark_all_read(ctx.user_id, Utc::now()).await
    }

    /// Dismisses (deletes) one of the caller's notifications.
    pub async fn dismiss(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        let removed = self.notif_repo.delete(id, ctx.user_id).await?;
        if !removed {
            return Err(AppError::not_found("Notification not found"));
        }
        Ok(())
    }

    /// Best-effort delivery used by other services as a write-path side
    /// effect: a failed insert is logged, never propagated.
    pub async fn notify(&self, notification: CreateNotification) {
        if let Err(e) = self.notif_repo.create(&notification).await {
            warn!(
                user_id = %notification.user_id,
                error = %e,
                "Failed to deliver notification"
            );
        }
    }

    /// Sends a system notification to every active user (admin only).
    ///
    /// Returns the number of notifications created.
    pub async fn broadcast(
        &self,
        ctx: &RequestContext,
        title: String,
        body: String,
    ) -> Result<u64, AppError> {
        self.policy
            .authorize(ctx.user_id, ctx.role, ctx.user_id, Action::Administer)?;
        if title.trim().is_empty() {
            return Err(AppError::validation("Broadcast title must not be empty"));
        }

        let recipients = self.user_repo.find_active_ids().await?;
        let items: Vec<CreateNotification> = recipients
            .into_iter()
            .map(|user_id| CreateNotification {
                user_id,
                category: NotificationCategory::System,
                title: title.clone(),
                body: body.clone(),
            })
            .collect();

        let created = self.notif_repo.create_many(&items).await?;
        info!(user_id = %ctx.user_id, recipients = created, "Broadcast sent");
        Ok(created)
    }
}
