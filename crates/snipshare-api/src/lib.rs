//! # snipshare-api
//!
//! HTTP API layer for Snipshare built on Axum.
//!
//! Provides all REST endpoints, middleware (CORS, tracing), extractors,
//! DTOs, and the route table. Error mapping is a single `IntoResponse`
//! impl on `AppError` in the core crate; handlers return
//! `Result<Json<_>, AppError>` and never branch on status codes.

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
