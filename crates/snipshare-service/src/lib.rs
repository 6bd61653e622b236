//! # snipshare-service
//!
//! Business logic services for Snipshare. Each service owns one domain
//! aggregate, holds `Arc`s to the repositories (plus the cache and the
//! capability policy) and exposes the operations the HTTP layer calls.

pub mod comment;
pub mod context;
pub mod message;
pub mod notification;
pub mod settings;
pub mod share;
pub mod snippet;
pub mod user;

pub use context::RequestContext;
