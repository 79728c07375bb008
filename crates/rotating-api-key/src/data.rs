//! Published key entries.

use serde::{Deserialize, Serialize};

use crate::hash::compute_key;

/// A derived key together with the seed and bucket it came from.
///
/// This is what ends up in the server's allowlist. The description is for
/// humans troubleshooting a rejected key; it is never matched against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEntry {
    /// Hex digest of `seed + "+" + bucket`.
    pub key: String,
    /// `"<seed> (<bucket>)"`.
    pub description: String,
}

impl KeyEntry {
    /// Derive the entry for a seed and a formatted bucket.
    pub fn new(seed: &str, bucket: &str) -> Self {
        Self {
            key: compute_key(seed, bucket),
            description: describe(seed, bucket),
        }
    }

    /// Split into `(key, description)`.
    pub fn into_pair(self) -> (String, String) {
        (self.key, self.description)
    }
}

impl From<KeyEntry> for (String, String) {
    fn from(entry: KeyEntry) -> Self {
        entry.into_pair()
    }
}

/// Human readable label for a key.
pub fn describe(seed: &str, bucket: &str) -> String {
    format!("{} ({})", seed, bucket)
}
