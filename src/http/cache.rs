//! Conditional GET support
//!
//! Weak validation via content-hash `ETag`s: the tag combines length and a
//! 64-bit hash of the body, enough for a dev server to spare re-sending
//! unchanged bundles.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Compute the quoted `ETag` for a body, e.g. `"1a2b-9f3c0d"`.
pub fn etag_for(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}-{:x}\"", content.len(), hasher.finish())
}

/// Whether an `If-None-Match` header revalidates against `etag`.
///
/// Handles comma-separated candidate lists and the `*` wildcard; a match
/// means the client's copy is current and a 304 should be returned.
pub fn revalidates(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|candidates| {
        candidates
            .split(',')
            .map(str::trim)
            .any(|candidate| candidate == etag || candidate == "*")
    })
}
