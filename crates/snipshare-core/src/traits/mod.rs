//! Traits defining the seams between Snipshare crates.

pub mod cache;
