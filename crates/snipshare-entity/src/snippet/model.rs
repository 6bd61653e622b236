//! Code snippet entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Who can see a snippet outside of share links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "snippet_visibility", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SnippetVisibility {
    /// Visible to the owner only.
    Private,
    /// Reachable by anyone with the direct link, not listed publicly.
    Unlisted,
    /// Listed in the public feed.
    Public,
}

/// Lifecycle status of a snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "snippet_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SnippetStatus {
    /// Normal, visible snippet.
    Normal,
    /// Soft-deleted by the owner or an admin.
    Deleted,
}

/// A code snippet owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Snippet {
    /// Unique snippet identifier.
    pub id: Uuid,
    /// Owning user.
    pub owner_id: Uuid,
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
    /// Lifecycle status.
    pub status: SnippetStatus,
    /// Number of times the snippet was viewed.
    pub view_count: i64,
    /// When the snippet was created.
    pub created_at: DateTime<Utc>,
    /// When the snippet was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Snippet {
    /// Whether this snippet is soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.status == SnippetStatus::Deleted
    }

    /// Whether the given user may read the snippet through the normal
    /// (non-share-token) path.
    pub fn readable_by(&self, user_id: Uuid) -> bool {
        if self.is_deleted() {
            return false;
        }
        match self.visibility {
            SnippetVisibility::Private => self.owner_id == user_id,
            SnippetVisibility::Unlisted | SnippetVisibility::Public => true,
        }
    }
}

/// Data required to create a new snippet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSnippet {
    /// Owning user.
    pub owner_id: Uuid,
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
