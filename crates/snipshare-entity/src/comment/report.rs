//! Comment report entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Handling status of a comment report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "report_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Newly filed, nobody has looked yet.
    Pending,
    /// Handled; the reported comment was actioned.
    Resolved,
    /// Handled; the report was dismissed.
    Rejected,
    /// An admin is actively looking into it.
    UnderInvestigation,
}

/// A user report against a comment.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CommentReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// The reported comment.
    pub comment_id: Uuid,
    /// The reporting user.
    pub reporter_id: Uuid,
    /// Reason supplied by the reporter.
    pub reason: String,
    /// Handling status.
    pub status: ReportStatus,
    /// Admin who handled the report.
    pub resolved_by: Option<Uuid>,
    /// When the report was filed.
    pub created_at: DateTime<Utc>,
    /// When the report was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to file a new report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentReport {
    /// The reported comment.
    pub comment_id: Uuid,
    /// The reporting user.
    pub reporter_id: Uuid,
    /// Reason supplied by the reporter.
    pub reason: String,
}
