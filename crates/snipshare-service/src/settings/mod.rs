//! System settings services.

pub mod service;

pub use service::SettingsService;
