//! Retention and expiry cleanup jobs.
//!
//! Each job is a direct repository call: failures are logged and the job
//! simply runs again on the next tick.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{error, info};

use snipshare_core::config::worker::WorkerConfig;
use snipshare_database::repositories::access_log::ShareAccessLogRepository;
use snipshare_database::repositories::notification::NotificationRepository;
use snipshare_database::repositories::share::ShareTokenRepository;

/// Holds the repositories the maintenance jobs operate on.
#[derive(Debug, Clone)]
pub struct CleanupJobs {
    /// Share token repository.
    share_repo: Arc<ShareTokenRepository>,
    /// Access log repository.
    log_repo: Arc<ShareAccessLogRepository>,
    /// Notification repository.
    notif_repo: Arc<NotificationRepository>,
    /// Retention windows.
    config: WorkerConfig,
}

impl CleanupJobs {
    /// Creates the cleanup job set.
    pub fn new(
        share_repo: Arc<ShareTokenRepository>,
        log_repo: Arc<ShareAccessLogRepository>,
        notif_repo: Arc<NotificationRepository>,
        config: WorkerConfig,
    ) -> Self {
        Self {
            share_repo,
            log_repo,
            notif_repo,
            config,
        }
    }

    /// Flips `is_active` off for tokens whose expiry has passed.
    ///
    /// The validator already denies expired tokens on its own; this keeps
    /// listings and the database honest.
    pub async fn deactivate_expired_shares(&self) {
        match self.share_repo.deactivate_expired(Utc::now()).await {
            Ok(count) if count > 0 => {
                info!(count, "Deactivated expired share tokens");
            }
            Ok(_) => {}
            Err(e) => error!(error = %e, "Expired share deactivation failed"),
        }
    }

    /// Purges access log rows past the retention window.
    pub async fn purge_old_access_logs(&self) {
        let cutoff = Utc::now() - Duration::days(self.config.access_log_retention_days);
        match self.log_repo.delete_older_than(cutoff).await {
            Ok(count) if count > 0 => {
                info!(count, "Purged old share access logs");
            }
            Ok(_) => {}
            Err(e) => error!(error = %e, "Access log retention failed"),
        }
    }

    /// Purges read notifications past the retention window.
    pub async fn purge_old_notifications(&self) {
        let cutoff = Utc::now() - Duration::days(self.config.notification_retention_days);
        match self.notif_repo.delete_read_older_than(cutoff).await {
            Ok(count) if count > 0 => {
                info!(count, "Purged old notifications");
            }
            Ok(_) => {}
            Err(e) => error!(error = %e, "Notification retention failed"),
        }
    }
}
