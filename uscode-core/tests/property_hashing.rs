use proptest::prelude::*;
use uscode_core::sha256_hex;

proptest! {
    /// P2: `text_hash` is a pure, deterministic function of `text_content`.
    #[test]
    fn hash_is_deterministic(s in ".*") {
        prop_assert_eq!(sha256_hex(&s), sha256_hex(&s));
    }

    /// Any single-byte mutation changes the hash (P7's underlying property:
    /// content changes are always hash-visible).
    #[test]
    fn differing_strings_differ(a in ".{1,40}", b in ".{1,40}") {
        if a != b {
            prop_assert_ne!(sha256_hex(&a), sha256_hex(&b));
        }
    }
}
