//! Deterministic content hashing
//!
//! Hashes are derived from the canonical (N-Triples) string form of a term
//! or statement, so two independently built but value-equal terms always
//! land in the same bucket. No per-process seed is involved.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// 128-bit prefix of the SHA-256 digest of a canonical string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentHash(u128);

impl ContentHash {
    /// Hash a canonical string form
    pub fn of(canonical: &str) -> Self {
        let digest = Sha256::digest(canonical.as_bytes());
        let mut prefix = [0u8; 16];
        prefix.copy_from_slice(&digest[..16]);
        ContentHash(u128::from_be_bytes(prefix))
    }

    /// Hash the `Display` form of a value
    pub fn of_display<T: fmt::Display + ?Sized>(value: &T) -> Self {
        Self::of(&value.to_string())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

impl From<ContentHash> for u128 {
    fn from(hash: ContentHash) -> Self {
        hash.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        let a = ContentHash::of("<http://example.org/alice>");
        let b = ContentHash::of("<http://example.org/alice>");
        assert_eq!(a, b);
        assert_ne!(a, ContentHash::of("<http://example.org/bob>"));
    }

    #[test]
    fn test_hash_display_is_hex() {
        let hash = ContentHash::of("x");
        let text = hash.to_string();
        assert_eq!(text.len(), 32);
        assert!(text.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
