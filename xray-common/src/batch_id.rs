//! Batch identifier utilities

use chrono::Utc;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Prefix carried by every generated batch identifier
pub const BATCH_ID_PREFIX: &str = "b_";

/// Number of hex digest characters kept after the prefix
const DIGEST_CHARS: usize = 12;

/// Generate a new batch identifier, e.g. `b_3f9a0c12d4e7`
///
/// The digest covers the current UTC timestamp plus a UUIDv4 nonce, so two
/// uploads landing in the same clock tick still get distinct ids.
pub fn generate() -> String {
    let seed = format!("{}:{}", Utc::now().to_rfc3339(), Uuid::new_v4());
    let digest = Sha256::digest(seed.as_bytes());

    let mut id = String::with_capacity(BATCH_ID_PREFIX.len() + DIGEST_CHARS);
    id.push_str(BATCH_ID_PREFIX);
    for byte in digest.iter().take(DIGEST_CHARS / 2) {
        id.push_str(&format!("{:02x}", byte));
    }
    id
}

/// Check whether a string has the shape of a generated batch identifier
///
/// Callers may still supply arbitrary ids; this only recognizes our own.
pub fn is_generated(id: &str) -> bool {
    id.strip_prefix(BATCH_ID_PREFIX)
        .map(|hex| {
            hex.len() == DIGEST_CHARS
                && hex.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_id_shape() {
        let id = generate();
        assert!(id.starts_with("b_"));
        assert_eq!(id.len(), 14);
        assert!(is_generated(&id), "unexpected id shape: {}", id);
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let ids: HashSet<String> = (0..1000).map(|_| generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_is_generated_rejects_foreign_ids() {
        assert!(!is_generated("my-batch"));
        assert!(!is_generated("b_XYZ"));
        assert!(!is_generated("b_0123456789AB"));
        assert!(!is_generated("x_0123456789ab"));
        assert!(is_generated("b_0123456789ab"));
    }
}
