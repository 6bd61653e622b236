//! Direct message services.

pub mod service;

pub use service::MessageService;
