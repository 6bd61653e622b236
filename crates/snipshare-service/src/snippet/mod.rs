//! Snippet services.

pub mod service;

pub use service::SnippetService;
