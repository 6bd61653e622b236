//! Code snippet domain entities.

pub mod model;

pub use model::{CreateSnippet, Snippet, SnippetStatus, SnippetVisibility};
