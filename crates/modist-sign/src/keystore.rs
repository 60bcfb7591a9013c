//! Filesystem key store
//!
//! The key directory is explicit configuration, not a process-global path:
//! tests and multi-environment setups point different stores at different
//! directories.
//!
//! Layout:
//!
//! ```text
//! <dir>/private_key.pem   unencrypted PKCS#8 Ed25519 private key
//! <dir>/public_key.pem    SubjectPublicKeyInfo public key
//! <dir>/key_id            the key id this pair was generated under
//! ```

use crate::error::SignError;
use crate::keys::{KeyPair, PublicKey};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

pub const PRIVATE_KEY_FILE: &str = "private_key.pem";
pub const PUBLIC_KEY_FILE: &str = "public_key.pem";
pub const KEY_ID_FILE: &str = "key_id";

/// Suggest a key id for a freshly generated pair, e.g. `key_2026_08`.
///
/// Month granularity keeps ids unique enough for rotation while staying
/// human-readable.
pub fn suggested_key_id() -> String {
    Utc::now().format("key_%Y_%m").to_string()
}

/// A key directory holding one signing keypair.
#[derive(Debug, Clone)]
pub struct KeyStore {
    dir: PathBuf,
}

impl KeyStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn private_key_path(&self) -> PathBuf {
        self.dir.join(PRIVATE_KEY_FILE)
    }

    pub fn public_key_path(&self) -> PathBuf {
        self.dir.join(PUBLIC_KEY_FILE)
    }

    pub fn key_id_path(&self) -> PathBuf {
        self.dir.join(KEY_ID_FILE)
    }

    /// Whether a private key already exists in this store.
    pub fn has_keypair(&self) -> bool {
        self.private_key_path().exists()
    }

    /// Generate a fresh keypair and persist it under `key_id`.
    ///
    /// The private key is written to disk and returned, never printed or
    /// logged. Callers that want overwrite protection should check
    /// [`KeyStore::has_keypair`] first.
    pub fn generate(&self, key_id: &str) -> Result<KeyPair, SignError> {
        fs::create_dir_all(&self.dir)?;

        let keypair = KeyPair::generate();
        fs::write(self.private_key_path(), keypair.to_pkcs8_pem()?)?;
        fs::write(
            self.public_key_path(),
            keypair.public_key().to_public_key_pem()?,
        )?;
        fs::write(self.key_id_path(), format!("{}\n", key_id))?;

        Ok(keypair)
    }

    /// Load the signing keypair.
    ///
    /// # Errors
    ///
    /// `SignError::MissingPrivateKey` if the store was never populated;
    /// this is an operator setup error, not a recoverable condition.
    pub fn load_keypair(&self) -> Result<KeyPair, SignError> {
        let path = self.private_key_path();
        if !path.exists() {
            return Err(SignError::MissingPrivateKey(path));
        }

        let pem = fs::read_to_string(&path)?;
        KeyPair::from_pkcs8_pem(&pem)
    }

    /// Load the public verification key.
    pub fn load_public_key(&self) -> Result<PublicKey, SignError> {
        let path = self.public_key_path();
        if !path.exists() {
            return Err(SignError::MissingPrivateKey(path));
        }

        let pem = fs::read_to_string(&path)?;
        PublicKey::from_public_key_pem(&pem)
    }

    /// Load the key id this store's pair was generated under.
    pub fn load_key_id(&self) -> Result<String, SignError> {
        let id = fs::read_to_string(self.key_id_path())?;
        Ok(id.trim().to_string())
    }
}
