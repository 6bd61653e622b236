//! Share token domain entities.

pub mod access_log;
pub mod model;

pub use access_log::{CreateShareAccessLog, ShareAccessLog};
pub use model::{AccessDenyReason, CreateShareToken, SharePermission, ShareToken};
