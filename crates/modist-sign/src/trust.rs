//! Trust anchors for verification
//!
//! A verifier may know several `(key_id, public key)` pairs at once during
//! key rotation. The manifest's own `key_id` selects which anchor to use;
//! an unknown id is a hard failure, never a fallback to some default key.

use crate::keys::PublicKey;
use std::collections::BTreeMap;

/// The set of public keys a verifier trusts, indexed by key id.
#[derive(Debug, Clone, Default)]
pub struct TrustStore {
    anchors: BTreeMap<String, PublicKey>,
}

impl TrustStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trust anchor. Replaces any previous key under the same id.
    pub fn insert(&mut self, key_id: impl Into<String>, key: PublicKey) {
        self.anchors.insert(key_id.into(), key);
    }

    pub fn get(&self, key_id: &str) -> Option<&PublicKey> {
        self.anchors.get(key_id)
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Iterate over `(key_id, public key)` pairs in key-id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PublicKey)> {
        self.anchors.iter().map(|(id, key)| (id.as_str(), key))
    }
}

impl FromIterator<(String, PublicKey)> for TrustStore {
    fn from_iter<I: IntoIterator<Item = (String, PublicKey)>>(iter: I) -> Self {
        Self {
            anchors: iter.into_iter().collect(),
        }
    }
}
