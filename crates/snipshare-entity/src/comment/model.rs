//! Comment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Moderation status of a comment.
///
/// Transitions are admin- or owner-triggered single-row updates; last
/// write wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "comment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    /// Visible comment.
    Normal,
    /// Soft-deleted by the author.
    Deleted,
    /// Hidden by a moderator.
    Hidden,
    /// Awaiting moderation.
    Pending,
}

impl CommentStatus {
    /// Whether the comment should appear in listings.
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Normal)
    }
}

/// A comment on a snippet, optionally a threaded reply.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    /// Unique comment identifier.
    pub id: Uuid,
    /// The snippet being commented on.
    pub snippet_id: Uuid,
    /// The comment author.
    pub author_id: Uuid,
    /// Parent comment for threaded replies.
    pub parent_id: Option<Uuid>,
    /// Comment text.
    pub content: String,
    /// Moderation status.
    pub status: CommentStatus,
    /// When the comment was created.
    pub created_at: DateTime<Utc>,
    /// When the comment was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateComment {
    /// The snippet being commented on.
    pub snippet_id: Uuid,
    /// The comment author.
    pub author_id: Uuid,
    /// Parent comment for threaded replies.
    pub parent_id: Option<Uuid>,
    /// Comment text.
    pub content: String,
}
