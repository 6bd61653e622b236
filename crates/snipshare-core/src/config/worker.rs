//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Scheduled maintenance worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the worker is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Days to retain share access log rows.
    #[serde(default = "default_access_log_days")]
    pub access_log_retention_days: i64,
    /// Days to retain read notifications.
    #[serde(default = "default_notification_days")]
    pub notification_retention_days: i64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            access_log_retention_days: default_access_log_days(),
            notification_retention_days: default_notification_days(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_access_log_days() -> i64 {
    90
}

fn default_notification_days() -> i64 {
    30
}
