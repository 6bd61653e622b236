//! System setting repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use snipshare_core::error::{AppError, ErrorKind};
use snipshare_core::result::AppResult;
use snipshare_entity::settings::model::SystemSetting;

/// Repository for admin-configured system settings.
#[derive(Debug, Clone)]
pub struct SystemSettingRepository {
    pool: PgPool,
}

impl SystemSettingRepository {
    /// Create a new settings repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch a single setting by key.
    pub async fn find_by_key(&self, key: &str) -> AppResult<Option<SystemSetting>> {
        sqlx::query_as::<_, SystemSetting>("SELECT * FROM system_settings WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find setting", e))
    }

    /// List all settings.
    pub async fn find_all(&self) -> AppResult<Vec<SystemSetting>> {
        sqlx::query_as::<_, SystemSetting>("SELECT * FROM system_settings ORDER BY key")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list settings", e))
    }

    /// Insert or replace a setting.
    pub async fn upsert(
        &self,
        key: &str,
        value: &serde_json::Value,
        description: Option<&str>,
        updated_by: Uuid,
    ) -> AppResult<SystemSetting> {
        sqlx::query_as::<_, SystemSetting>(
            "INSERT INTO system_settings (key, value, description, updated_by) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (key) DO UPDATE SET \
             value = EXCLUDED.value, \
             description = COALESCE(EXCLUDED.description, system_settings.description), \
             updated_by = EXCLUDED.updated_by, \
             updated_at = NOW() \
             RETURNING *",
        )
        .bind(key)
        .bind(value)
        .bind(description)
        .bind(updated_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert setting", e))
    }
}
