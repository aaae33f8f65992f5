//! Content fingerprints for duplicate window suppression.

use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// SHA-256 of the text as lowercase hex.
pub fn content_fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Fingerprints of the chunks already emitted for the current section.
#[derive(Debug, Default)]
pub struct SeenContent {
    hashes: HashSet<String>,
}

impl SeenContent {
    /// Record `text`; returns `false` if identical text was recorded before.
    pub fn insert(&mut self, text: &str) -> bool {
        self.hashes.insert(content_fingerprint(text))
    }

    pub fn clear(&mut self) {
        self.hashes.clear();
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}
