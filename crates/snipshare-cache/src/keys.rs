//! Cache key builders for all Snipshare cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses. Keys for paginated lists
//! encode the full filter signature; each family has a prefix builder
//! used for write-path invalidation.

use uuid::Uuid;

/// Prefix applied to all Snipshare cache keys.
const PREFIX: &str = "snipshare";

// ── Comment keys ───────────────────────────────────────────

/// Cache key for one page of a snippet's comment list.
pub fn comment_list(snippet_id: Uuid, page: u64, page_size: u64) -> String {
    format!("{PREFIX}:comments:{snippet_id}:p{page}:s{page_size}")
}

/// Prefix invalidating every cached comment page of a snippet.
pub fn comment_prefix(snippet_id: Uuid) -> String {
    format!("{PREFIX}:comments:{snippet_id}:")
}

// ── Message keys ───────────────────────────────────────────

/// Cache key for one page of a user's inbox or outbox.
pub fn message_list(user_id: Uuid, box_kind: &str, page: u64, page_size: u64) -> String {
    format!("{PREFIX}:messages:{user_id}:{box_kind}:p{page}:s{page_size}")
}

/// Prefix invalidating every cached message page of a user.
pub fn message_prefix(user_id: Uuid) -> String {
    format!("{PREFIX}:messages:{user_id}:")
}

// ── Settings keys ──────────────────────────────────────────

/// Cache key for a system setting by key.
pub fn setting(key: &str) -> String {
    format!("{PREFIX}:settings:{key}")
}

/// Prefix invalidating all cached settings.
pub fn settings_prefix() -> String {
    format!("{PREFIX}:settings:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_key_includes_filter_signature() {
        let id = Uuid::nil();
        assert_eq!(
            comment_list(id, 2, 25),
            "snipshare:comments:00000000-0000-0000-0000-000000000000:p2:s25"
        );
    }

    #[test]
    fn test_prefix_matches_list_keys() {
        let id = Uuid::new_v4();
        assert!(comment_list(id, 1, 25).starts_with(&comment_prefix(id)));
        assert!(message_list(id, "inbox", 3, 10).starts_with(&message_prefix(id)));
    }

    #[test]
    fn test_distinct_pages_get_distinct_keys() {
        let id = Uuid::new_v4();
        assert_ne!(comment_list(id, 1, 25), comment_list(id, 2, 25));
        assert_ne!(comment_list(id, 1, 25), comment_list(id, 1, 50));
    }
}
