//! Admin-configured system settings, read-through cached.

use std::sync::Arc;

use tracing::{info, warn};

use snipshare_auth::policy::{Action, Policy};
use snipshare_cache::{MemoryCache, keys};
use snipshare_core::error::AppError;
use snipshare_core::traits::cache::CacheProvider;
use snipshare_database::repositories::settings::SystemSettingRepository;
use snipshare_entity::settings::model::SystemSetting;

use crate::context::RequestContext;

/// Manages system settings.
#[derive(Debug, Clone)]
pub struct SettingsService {
    /// Settings repository.
    settings_repo: Arc<SystemSettingRepository>,
    /// Read-path cache.
    cache: Arc<MemoryCache>,
    /// Capability policy.
    policy: Arc<Policy>,
}

impl SettingsService {
    /// Creates a new settings service.
    pub fn new(
        settings_repo: Arc<SystemSettingRepository>,
        cache: Arc<MemoryCache>,
        policy: Arc<Policy>,
    ) -> Self {
        Self {
            settings_repo,
            cache,
            policy,
        }
    }

    /// Gets a single setting, read-through cached.
    pub async fn get(&self, ctx: &RequestContext, key: &str) -> Result<SystemSetting, AppError> {
        self.policy
            .authorize(ctx.user_id, ctx.role, ctx.user_id, Action::Administer)?;

        let cache_key = keys::setting(key);
        if let Ok(Some(cached)) = self.cache.get_json::<SystemSetting>(&cache_key).await {
            return Ok(cached);
        }

        let setting = self
            .settings_repo
            .find_by_key(key)
            .await?
            .ok_or_else(|| AppError::not_found("Setting not found"))?;

        if let Err(e) = self.cache.set_json(&cache_key, &setting).await {
            warn!(error = %e, "Failed to cache setting");
        }

        Ok(setting)
    }

    /// Lists all settings.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<SystemSetting>, AppError> {
        self.policy
            .authorize(ctx.user_id, ctx.role, ctx.user_id, Action::Administer)?;
        self.settings_repo.find_all().await
    }

    /// Creates or replaces a setting and invalidates the settings cache.
    pub async fn upsert(
        &self,
        ctx: &RequestContext,
        key: &str,
        value: serde_json::Value,
        description: Option<String>,
    ) -> Result<SystemSetting, AppError> {
        self.policy
            .authorize(ctx.user_id, ctx.role, ctx.user_id, Action::Administer)?;
        if key.trim().is_empty() {
            return Err(AppError::validation("Setting key must not be empty"));
        }

        let setting = self
            .settings_repo
            .upsert(key, &value, description.as_deref(), ctx.user_id)
            .await?;

        if let Err(e) = self.cache.delete_prefix(&keys::settings_prefix()).await {
            warn!(error = %e, "Failed to invalidate settings cache");
        }

        info!(admin = %ctx.user_id, key, "System setting updated");
        Ok(setting)
    }
}
