//! # snipshare-entity
//!
//! Domain entity models for Snipshare. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod comment;
pub mod message;
pub mod notification;
pub mod settings;
pub mod share;
pub mod snippet;
pub mod user;
