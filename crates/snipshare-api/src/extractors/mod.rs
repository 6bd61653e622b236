//! Custom Axum extractors.

pub mod auth;
pub mod client_meta;
pub mod pagination;

pub use auth::AuthUser;
pub use client_meta::ClientMetaParams;
pub use pagination::PaginationParams;
