//! # snipshare-cache
//!
//! Process-local TTL cache for read endpoints, plus the key builders
//! used across the application. Best-effort only: no cross-instance
//! invalidation, no consistency guarantee beyond TTL + write-path
//! prefix invalidation.

pub mod keys;
pub mod store;

pub use store::MemoryCache;
