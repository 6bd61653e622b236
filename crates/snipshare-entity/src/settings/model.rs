//! System setting entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An admin-configured key/value system setting.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SystemSetting {
    /// Setting key (primary key).
    pub key: String,
    /// Setting value as JSON.
    pub value: serde_json::Value,
    /// Human-readable description.
    pub description: Option<String>,
    /// Admin who last changed the setting.
    pub updated_by: Option<Uuid>,
    /// When the setting was last changed.
    pub updated_at: DateTime<Utc>,
}
