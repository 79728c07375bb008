//! SHA-1 digest over a seed and a time bucket.

use sha1::{Digest, Sha1};

/// Name of the digest algorithm. Clients and servers must agree on it.
pub const KEY_ALGORITHM: &str = "sha1";

/// Separator placed between the seed and the time bucket before hashing.
pub const SEPARATOR: &str = "+";

/// Compute the key for a seed and an already formatted time bucket.
///
/// The input is the byte-exact concatenation `seed + "+" + bucket`; the
/// result is the lowercase hex digest (40 characters).
pub fn compute_key(seed: &str, bucket: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(seed.as_bytes());
    hasher.update(SEPARATOR.as_bytes());
    hasher.update(bucket.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_output_size() {
        let key = compute_key("seed", "2022-06-24");
        assert_eq!(key.len(), 40);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_key_deterministic() {
        let key1 = compute_key("Our dear customer-adfuw42", "2022-06-24");
        let key2 = compute_key("Our dear customer-adfuw42", "2022-06-24");
        assert_eq!(key1, key2);
    }

    #[test]
    fn test_key_golden_vector() {
        assert_eq!(
            compute_key("Our dear customer-adfuw42", "2022-06-24"),
            "bda11d301febf5266376c3b4062d27a91781c7aa"
        );
    }

    #[test]
    fn test_key_changes_with_seed() {
        let key1 = compute_key("Our dear customer-adfuw42", "2022-06-24");
        let key2 = compute_key("Our dear customer -adfuw42", "2022-06-24");
        assert_ne!(key1, key2);
        assert_eq!(key2, "7d95f0e24213aba6cae97383e6e2d661be7fcdc7");
    }

    #[test]
    fn test_key_changes_with_bucket() {
        let key1 = compute_key("seed", "2022-06-24");
        let key2 = compute_key("seed", "2022-6-24");
        assert_ne!(key1, key2);
    }

    #[test]
    fn test_separator_is_part_of_input() {
        // The separator is not escaped: both inputs hash "a++b".
        assert_eq!(compute_key("a+", "b"), compute_key("a", "+b"));
        assert_ne!(compute_key("a", "b"), compute_key("ab", ""));
    }
}
