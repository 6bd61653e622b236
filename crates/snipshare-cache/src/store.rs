//! In-memory cache implementation using the moka crate.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use snipshare_core::config::cache::CacheConfig;
use snipshare_core::result::AppResult;
use snipshare_core::traits::cache::CacheProvider;

/// In-memory cache backed by moka.
///
/// Entries expire on the store-wide TTL configured at construction;
/// there is no per-entry policy because read endpoints share a single
/// freshness contract (write-through invalidation plus TTL).
#[derive(Debug, Clone)]
pub struct MemoryCache {
    /// The underlying moka cache.
    cache: Cache<String, String>,
}

impl MemoryCache {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.time_to_live_seconds))
            .build();

        Self { cache }
    }

    /// Fetch and deserialize a cached JSON value.
    ///
    /// A corrupt entry is treated as a miss and evicted.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        match self.get(key).await? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => Ok(Some(value)),
                Err(_) => {
                    self.delete(key).await?;
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Serialize and store a JSON value.
    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw).await
    }
}

#[async_trait]
impl CacheProvider for MemoryCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.cache.get(key).await)
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.cache.insert(key.to_string(), value.to_string()).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.remove(key).await;
        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> AppResult<u64> {
        // Moka doesn't support pattern scanning, so we iterate.
        let keys_to_remove: Vec<String> = self
            .cache
            .iter()
            .filter(|entry| entry.0.starts_with(prefix))
            .map(|entry| entry.0.to_string())
            .collect();

        let mut count = 0u64;
        for key in keys_to_remove {
            self.cache.remove(&key).await;
            count += 1;
        }

        debug!(prefix, count, "Invalidated cache keys by prefix");
        Ok(count)
    }

    async fn clear(&self) -> AppResult<()> {
        self.cache.invalidate_all();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_cache() -> MemoryCache {
        MemoryCache::new(&CacheConfig {
            max_capacity: 1000,
            time_to_live_seconds: 300,
        })
    }

    #[tokio::test]
    async fn test_set_get() {
        let cache = make_cache();
        cache.set("key1", "value1").await.unwrap();
        let val = cache.get("key1").await.unwrap();
        assert_eq!(val, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_delete() {
        let cache = make_cache();
        cache.set("key2", "value2").await.unwrap();
        cache.delete("key2").await.unwrap();
        assert_eq!(cache.get("key2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_prefix() {
        let cache = make_cache();
        cache.set("comments:s1:p1", "a").await.unwrap();
        cache.set("comments:s1:p2", "b").await.unwrap();
        cache.set("comments:s2:p1", "c").await.unwrap();

        let removed = cache.delete_prefix("comments:s1:").await.unwrap();
        assert_eq!(removed, 2);
        assert_eq!(cache.get("comments:s1:p1").await.unwrap(), None);
        assert_eq!(
            cache.get("comments:s2:p1").await.unwrap(),
            Some("c".to_string())
        );
    }

    #[tokio::test]
    async fn test_ttl_expiry() {
        let cache = MemoryCache::new(&CacheConfig {
            max_capacity: 100,
            time_to_live_seconds: 1,
        });
        cache.set("short", "lived").await.unwrap();
        assert!(cache.get("short").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(cache.get("short").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_json_roundtrip() {
        let cache = make_cache();
        let data = serde_json::json!({"name": "test", "count": 42});
        cache.set_json("json_key", &data).await.unwrap();
        let result: Option<serde_json::Value> = cache.get_json("json_key").await.unwrap();
        assert_eq!(result, Some(data));
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_a_miss() {
        let cache = make_cache();
        cache.set("bad_json", "{not json").await.unwrap();
        let result: Option<serde_json::Value> = cache.get_json("bad_json").await.unwrap();
        assert_eq!(result, None);
    }
}
