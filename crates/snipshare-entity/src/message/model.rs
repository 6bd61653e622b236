//! Direct message entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A direct message between two users.
///
/// Deletion is per-side: each participant can remove the message from
/// their own view without affecting the other.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    /// Unique message identifier.
    pub id: Uuid,
    /// Sending user.
    pub sender_id: Uuid,
    /// Receiving user.
    pub recipient_id: Uuid,
    /// Optional subject line.
    pub subject: Option<String>,
    /// Message body.
    pub body: String,
    /// Whether the recipient has read the message.
    pub is_read: bool,
    /// When the recipient read the message.
    pub read_at: Option<DateTime<Utc>>,
    /// Sender removed the message from their outbox.
    pub sender_deleted: bool,
    /// Recipient removed the message from their inbox.
    pub recipient_deleted: bool,
    /// When the message was sent.
    pub created_at: DateTime<Utc>,
}

/// Data required to send a new message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMessage {
    /// Sending user.
    pub sender_id: Uuid,
    /// Receiving user.
    pub recipient_id: Uuid,
    /// Optional subject line.
    pub subject: Option<String>,
    /// Message body.
    pub body: String,
}
