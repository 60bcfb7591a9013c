//! Manifest signing and verification
//!
//! The signed payload is the canonical JSON of the manifest with the
//! `signature` and `key_id` fields removed. `key_id` routes to the right
//! public key but is not itself authenticated content; a verifier therefore
//! must reject unknown ids outright (see [`verify_manifest`]).

use crate::error::SignError;
use crate::keys::KeyPair;
use crate::trust::TrustStore;
use modist_canonical::to_canonical_json_value;
use modist_manifest::Manifest;
use serde_json::Value;

/// Fields excluded from the signed payload
const UNSIGNED_FIELDS: [&str; 2] = ["signature", "key_id"];

/// Compute the canonical bytes a manifest signature covers.
///
/// Works identically for signed and unsigned manifests: any existing
/// `signature` is stripped before canonicalization, so signing is
/// idempotent with respect to prior signatures.
pub fn signing_bytes(manifest: &Manifest) -> Result<Vec<u8>, SignError> {
    let mut value = serde_json::to_value(manifest)?;

    if let Value::Object(map) = &mut value {
        for field in UNSIGNED_FIELDS {
            map.remove(field);
        }
    }

    Ok(to_canonical_json_value(&value)?)
}

/// Sign a manifest with the given keypair.
///
/// Pure: returns a new manifest with the `signature` field set, leaving the
/// input untouched. `key_id` and all model entries carry over unchanged.
pub fn sign_manifest(manifest: &Manifest, keypair: &KeyPair) -> Result<Manifest, SignError> {
    let bytes = signing_bytes(manifest)?;

    let mut signed = manifest.clone();
    signed.signature = Some(keypair.sign_bytes(&bytes));
    Ok(signed)
}

/// Verify a manifest against a set of trust anchors.
///
/// Fail closed:
/// - no `signature` field -> [`SignError::Unsigned`]
/// - `key_id` not in the store -> [`SignError::UnknownKeyId`]
/// - undecodable signature -> [`SignError::InvalidSignature`]
/// - cryptographic mismatch -> [`SignError::BadSignature`]
///
/// Never mutates the manifest, never falls back to a default key.
pub fn verify_manifest(manifest: &Manifest, trust: &TrustStore) -> Result<(), SignError> {
    let signature = manifest.signature.as_ref().ok_or(SignError::Unsigned)?;

    let public_key = trust
        .get(&manifest.key_id)
        .ok_or_else(|| SignError::UnknownKeyId(manifest.key_id.clone()))?;

    let bytes = signing_bytes(manifest)?;
    public_key.verify_bytes(&bytes, signature)
}
