//! Direct message service.
//!
//! Inbox and outbox reads are cached per filter signature; sends,
//! mark-read, and per-side deletes invalidate both participants' prefixes.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use snipshare_cache::{MemoryCache, keys};
use snipshare_core::error::AppError;
use snipshare_core::traits::cache::CacheProvider;
use snipshare_core::types::pagination::{PageRequest, PageResponse};
use snipshare_database::repositories::message::MessageRepository;
use snipshare_database::repositories::user::UserRepository;
use snipshare_entity::message::model::{CreateMessage, Message};
use snipshare_entity::notification::model::{CreateNotification, NotificationCategory};

use crate::context::RequestContext;
use crate::notification::NotificationService;

/// Manages direct messages between users.
#[derive(Debug, Clone)]
pub struct MessageService {
    /// Message repository.
    message_repo: Arc<MessageRepository>,
    /// User repository, to resolve recipients.
    user_repo: Arc<UserRepository>,
    /// Notification service for delivery notices.
    notifications: Arc<NotificationService>,
    /// Read-path cache.
    cache: Arc<MemoryCache>,
}

impl MessageService {
    /// Creates a new message service.
    pub fn new(
        message_repo: Arc<MessageRepository>,
        user_repo: Arc<UserRepository>,
        notifications: Arc<NotificationService>,
        cache: Arc<MemoryCache>,
    ) -> Self {
        Self {
            message_repo,
            user_repo,
            notifications,
            cache,
        }
    }

    /// Sends a message to another user.
    pub async fn send(
        &self,
        ctx: &RequestContext,
        recipient_id: Uuid,
        subject: Option<String>,
        body: String,
    ) -> Result<Message, AppError> {
        if body.trim().is_empty() {
            return Err(AppError::validation("Message body must not be empty"));
        }
        if recipient_id == ctx.user_id {
            return Err(AppError::validation("Cannot send a message to yourself"));
        }

        let recipient = self
            .user_repo
            .find_by_id(recipient_id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipient not found"))?;
        if !recipient.can_login() {
            return Err(AppError::validation("Recipient account is disabled"));
        }

        let message = self
            .message_repo
            .create(&CreateMessage {
                sender_id: ctx.user_id,
                recipient_id,
                subject,
                body,
            })
            .await?;

        self.invalidate(ctx.user_id).await;
        self.invalidate(recipient_id).await;

        self.notifications
            .notify(CreateNotification {
                user_id: recipient_id,
                category: NotificationCategory::Message,
                title: "New message".to_string(),
                body: format!("You have a new message from {}", ctx.username),
            })
            .await;

        info!(sender = %ctx.user_id, recipient = %recipient_id, "Message sent");
        Ok(message)
    }

    /// Lists the caller's inbox, cached.
    pub async fn inbox(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<Message>, AppError> {
        let key = keys::message_list(ctx.user_id, "inbox", page.page, page.page_size);
        if let Ok(Some(cached)) = self.cache.get_json::<PageResponse<Message>>(&key).await {
            return Ok(cached);
        }

        let result = self.message_repo.find_inbox(ctx.user_id, &page).await?;
        if let Err(e) = self.cache.set_json(&key, &result).await {
            warn!(error = %e, "Failed to cache inbox");
        }
        Ok(result)
    }

    /// Lists the caller's outbox, cached.
    pub async fn outbox(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<Message>, AppError> {
        let key = keys::message_list(ctx.user_id, "outbox", page.page, page.page_size);
        if let Ok(Some(cached)) = self.cache.get_json::<PageResponse<Message>>(&key).await {
            return Ok(cached);
        }

        let result = self.message_repo.find_outbox(ctx.user_id, &page).await?;
        if let Err(e) = self.cache.set_json(&key, &result).await {
            warn!(error = %e, "Failed to cache outbox");
        }
        Ok(result)
    }

    /// Gets one message the caller participates in.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Message, AppError> {
        let message = self
            .message_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Message not found"))?;

        if message.sender_id != ctx.user_id && message.recipient_id != ctx.user_id {
            return Err(AppError::not_found("Message not found"));
        }

        Ok(message)
    }

    /// Counts unread inbox messages.
    pub async fn unread_count(&self, ctx: &RequestContext) -> Result<i64, AppError> {
        self.message_repo.count_unread(ctx.user_id).await
    }

    /// Marks a message read (recipient only).
    pub async fn mark_read(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        let message = self.get(ctx, id).await?;
        if message.recipient_id != ctx.user_id {
            return Err(AppError::forbidden("Only the recipient can mark a message read"));
        }

        self.message_repo
            .mark_read(id, ctx.user_id, Utc::now())
            .await?;
        self.invalidate(ctx.user_id).await;
        Ok(())
    }

    /// Removes the message from the caller's side of the conversation.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        // get() already restricts to participants.
        self.get(ctx, id).await?;

        self.message_repo.delete_for_user(id, ctx.user_id).await?;
        self.invalidate(ctx.user_id).await;
        Ok(())
    }

    /// Drops every cached message page for a user.
    async fn invalidate(&self, user_id: Uuid) {
        if let Err(e) = self.cache.delete_prefix(&keys::message_prefix(user_id)).await {
            warn!(error = %e, "Failed to invalidate message cache");
        }
    }
}
