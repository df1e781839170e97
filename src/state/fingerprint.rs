use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Computes the content fingerprint of a fetched body
///
/// Hex-encoded SHA-256 over the raw bytes, before any decoding or cleanup.
pub fn fingerprint(body: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body);
    hex::encode(hasher.finalize())
}

/// Maps content fingerprints to the URLs that served that content
///
/// Grows only. A fingerprint with one URL is a unique page; two or more
/// URLs form a duplicate group.
#[derive(Debug, Clone, Default)]
pub struct FingerprintIndex {
    entries: HashMap<String, Vec<String>>,
}

impl FingerprintIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `url` served content with `fingerprint`
    pub fn insert(&mut self, fingerprint: &str, url: &str) {
        let urls = self.entries.entry(fingerprint.to_string()).or_default();
        if !urls.iter().any(|u| u == url) {
            urls.push(url.to_string());
        }
    }

    /// Every URL group sharing a fingerprint with at least one other URL
    pub fn duplicate_groups(&self) -> Vec<&[String]> {
        self.entries
            .values()
            .filter(|urls| urls.len() >= 2)
            .map(Vec::as_slice)
            .collect()
    }

    /// Number of distinct fingerprints
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
