use sha2::{Digest, Sha256};

/// A lowercase-hex SHA-256 digest, stored as an owned `String` so it can be
/// indexed directly by the store without re-hashing on lookup.
pub type HashHex = String;

/// Hashes `content`'s UTF-8 bytes and returns the lowercase-hex digest.
///
/// This is the canonical form referenced throughout the spec ("SHA-256 hex
/// over the canonical byte form"); callers must hash exactly the string
/// that will be persisted, not a re-derived or normalized copy of it.
pub fn sha256_hex(content: &str) -> HashHex {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_hash_is_stable() {
        assert_eq!(
            sha256_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn differs_on_whitespace() {
        assert_ne!(sha256_hex("a b"), sha256_hex("a  b"));
    }

    #[test]
    fn deterministic() {
        let text = "The rate shall be 5 percent.";
        assert_eq!(sha256_hex(text), sha256_hex(text));
    }
}
