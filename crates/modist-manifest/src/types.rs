//! Manifest type definitions
//!
//! The manifest is the versioned metadata document describing available
//! models, their files, and a signature authenticating its contents.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current manifest schema version
pub const MANIFEST_VERSION: u32 = 1;

/// The model-distribution manifest
///
/// `signature` authenticates everything except itself and `key_id`: the
/// signer canonicalizes the manifest with both fields removed and signs
/// those bytes. `key_id` routes a verifier to the correct public key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Manifest {
    pub version: u32,

    /// UTC timestamp of the last regeneration, `%Y-%m-%dT%H:%M:%SZ`
    pub updated_at: String,

    pub models: Vec<Model>,

    /// Identifies which public key verifies this manifest (key rotation)
    pub key_id: String,

    /// Base64 Ed25519 signature; absent until the manifest is signed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl Manifest {
    /// Create an empty unsigned manifest for the given key id.
    pub fn new(key_id: impl Into<String>) -> Self {
        Self {
            version: MANIFEST_VERSION,
            updated_at: String::new(),
            models: Vec::new(),
            key_id: key_id.into(),
            signature: None,
        }
    }

    /// Whether a signature field is present (says nothing about validity).
    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// Look up a model entry by id.
    pub fn model(&self, id: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.id == id)
    }
}

/// A single distributable model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Model {
    /// Unique within a manifest; doubles as the folder name
    pub id: String,

    pub name: String,

    /// Base URL the file names below are resolved against
    pub base_url: String,

    /// Filename -> size/digest. BTreeMap keeps the on-disk form stable.
    pub files: BTreeMap<String, FileEntry>,

    pub minimum_selector_version: u32,
}

impl Model {
    /// Total size of all files in bytes.
    pub fn total_size(&self) -> u64 {
        self.files.values().map(|f| f.size).sum()
    }
}

/// Size and content hash of one model file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileEntry {
    /// Size in bytes
    pub size: u64,

    /// Lowercase hex SHA-256 digest of the file contents
    pub sha256: String,
}
