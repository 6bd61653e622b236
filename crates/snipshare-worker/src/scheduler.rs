//! Cron scheduler for periodic maintenance tasks.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use snipshare_core::error::AppError;

use crate::jobs::CleanupJobs;

/// Cron-based scheduler for periodic background tasks.
pub struct MaintenanceScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Cleanup job set
    jobs: Arc<CleanupJobs>,
}

impl std::fmt::Debug for MaintenanceScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaintenanceScheduler").finish()
    }
}

impl MaintenanceScheduler {
    /// Create a new scheduler around the cleanup jobs.
    pub async fn new(jobs: Arc<CleanupJobs>) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self { scheduler, jobs })
    }

    /// Register all default scheduled tasks.
    pub async fn register_default_tasks(&self) -> Result<(), AppError> {
        self.register_share_expiry().await?;
        self.register_access_log_retention().await?;
        self.register_notification_retention().await?;

        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler.
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler.
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    /// Expired share deactivation — hourly.
    async fn register_share_expiry(&self) -> Result<(), AppError> {
        let jobs = Arc::clone(&self.jobs);
        let job = CronJob::new_async("0 0 * * * *", move |_uuid, _lock| {
            let jobs = Arc::clone(&jobs);
            Box::pin(async move {
                jobs.deactivate_expired_shares().await;
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create share_expiry schedule: {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add share_expiry schedule: {e}")))?;

        tracing::info!("Registered: share_expiry (hourly)");
        Ok(())
    }

    /// Access log retention — daily at 03:20.
    async fn register_access_log_retention(&self) -> Result<(), AppError> {
        let jobs = Arc::clone(&self.jobs);
        let job = CronJob::new_async("0 20 3 * * *", move |_uuid, _lock| {
            let jobs = Arc::clone(&jobs);
            Box::pin(async move {
                jobs.purge_old_access_logs().await;
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create log_retention schedule: {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add log_retention schedule: {e}")))?;

        tracing::info!("Registered: access_log_retention (daily)");
        Ok(())
    }

    /// Notification retention — daily at 03:40.
    async fn register_notification_retention(&self) -> Result<(), AppError> {
        let jobs = Arc::clone(&self.jobs);
        let job = CronJob::new_async("0 40 3 * * *", move |_uuid, _lock| {
            let jobs = Arc::clone(&jobs);
            Box::pin(async move {
                jobs.purge_old_notifications().await;
            })
        })
        .map_err(|e| {
            AppError::internal(format!("Failed to create notif_retention schedule: {e}"))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add notif_retention schedule: {e}"))
        })?;

        tracing::info!("Registered: notification_retention (daily)");
        Ok(())
    }
}
