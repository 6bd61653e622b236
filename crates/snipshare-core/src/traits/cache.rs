//! Cache provider trait.
//!
//! The cache is a best-effort read-path optimization: implementations
//! expire entries on a store-wide TTL and callers invalidate by key
//! prefix on every write. Cache failures must degrade to the backing
//! store, never fail a request.

use async_trait::async_trait;

use crate::result::AppResult;

/// Object-safe interface to the in-process cache.
#[async_trait]
pub trait CacheProvider: Send + Sync {
    /// Fetch a raw value by key.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store a raw value under a key, subject to the store TTL.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a single key.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Remove every key starting with the given prefix.
    ///
    /// Returns the number of keys removed.
    async fn delete_prefix(&self, prefix: &str) -> AppResult<u64>;

    /// Drop every entry in the store.
    async fn clear(&self) -> AppResult<()>;
}
