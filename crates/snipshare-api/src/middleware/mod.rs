//! Middleware layers.

pub mod cors;

pub use cors::build_cors_layer;
