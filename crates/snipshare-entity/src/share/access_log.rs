//! Share access log entity model.
//!
//! One row per access attempt, successful or not. Append-only: rows are
//! never mutated, and the only deletion path is admin bulk retention.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An audit record of a single share access attempt.
///
/// The token and snippet references are nullable so that attempts with an
/// unknown token string still produce a row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShareAccessLog {
    /// Unique log entry identifier.
    pub id: Uuid,
    /// The share token that was attempted, when it exists.
    pub share_token_id: Option<Uuid>,
    /// The snippet behind the token, when known.
    pub snippet_id: Option<Uuid>,
    /// Client IP address.
    pub ip_address: String,
    /// Raw User-Agent header.
    pub user_agent: Option<String>,
    /// Device class derived from the user agent.
    pub device_type: Option<String>,
    /// Browser family derived from the user agent.
    pub browser: Option<String>,
    /// Whether the attempt was allowed.
    pub success: bool,
    /// Deny reason code for failed attempts.
    pub failure_reason: Option<String>,
    /// When the attempt happened.
    pub accessed_at: DateTime<Utc>,
}

/// Data required to append one access log row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShareAccessLog {
    /// The share token that was attempted, when it exists.
    pub share_token_id: Option<Uuid>,
    /// The snippet behind the token, when known.
    pub snippet_id: Option<Uuid>,
    /// Client IP address.
    pub ip_address: String,
    /// Raw User-Agent header.
    pub user_agent: Option<String>,
    /// Device class derived from the user agent.
    pub device_type: Option<String>,
    /// Browser family derived from the user agent.
    pub browser: Option<String>,
    /// Whether the attempt was allowed.
    pub success: bool,
    /// Deny reason code for failed attempts.
    pub failure_reason: Option<String>,
}
