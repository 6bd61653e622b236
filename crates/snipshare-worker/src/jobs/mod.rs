//! Maintenance job implementations.

pub mod cleanup;

pub use cleanup::CleanupJobs;
