//! # Modist Sign
//!
//! Ed25519 signing and verification for the model-distribution manifest.
//!
//! The signature covers the canonical JSON form of the manifest with the
//! `signature` and `key_id` fields removed. Signing is a pure function
//! producing a new manifest value; verification selects the public key by
//! the manifest's own `key_id` and fails closed on anything unexpected.
//!
//! # Example
//!
//! ```
//! use modist_manifest::Manifest;
//! use modist_sign::{sign_manifest, verify_manifest, KeyPair, TrustStore};
//!
//! let keypair = KeyPair::generate();
//!
//! let manifest = Manifest::new("key_2026_08");
//! let signed = sign_manifest(&manifest, &keypair).expect("signing failed");
//!
//! let mut trust = TrustStore::new();
//! trust.insert("key_2026_08", keypair.public_key());
//! assert!(verify_manifest(&signed, &trust).is_ok());
//! ```

pub mod error;
pub mod keys;
pub mod keystore;
pub mod sign;
pub mod trust;

pub use error::*;
pub use keys::*;
pub use keystore::*;
pub use sign::*;
pub use trust::*;
