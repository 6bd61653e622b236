//! Admin-only handlers.

pub mod access_logs;
pub mod broadcast;
pub mod reports;
pub mod settings;
pub mod shares;
pub mod users;
