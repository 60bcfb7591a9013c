//! SHA-256 hashing over canonical bytes and model files

use crate::canonical::to_canonical_json;
use crate::error::CanonicalError;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt::Write;
use std::io::{self, Read};

/// Hash raw bytes with SHA256
///
/// Returns a 64-character lowercase hex string.
///
/// # Example
///
/// ```rust
/// use modist_canonical::hash_bytes;
///
/// let hash = hash_bytes(b"Hello, world!");
/// assert_eq!(hash.len(), 64);
/// assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();

    hex_encode(&result)
}

/// Hash a string with SHA256
///
/// The string is treated as UTF-8 bytes.
pub fn hash_string(s: &str) -> String {
    hash_bytes(s.as_bytes())
}

/// Canonicalize and hash a serializable value
///
/// This combines canonical JSON serialization with SHA256 hashing. The
/// signer prints this digest so an operator can compare independently
/// derived canonical forms without dumping the full byte string.
///
/// # Errors
///
/// Returns `CanonicalError` if canonicalization fails (e.g., non-integer
/// numbers detected).
///
/// # Example
///
/// ```rust
/// use modist_canonical::hash_canonical;
///
/// let value = serde_json::json!({"b": 1, "a": 2});
/// let value2 = serde_json::json!({"a": 2, "b": 1});
///
/// assert_eq!(
///     hash_canonical(&value).unwrap(),
///     hash_canonical(&value2).unwrap()
/// );
/// ```
pub fn hash_canonical<T: Serialize>(value: &T) -> Result<String, CanonicalError> {
    let canonical = to_canonical_json(value)?;
    Ok(hash_bytes(&canonical))
}

/// Hash a serde_json::Value after canonicalization
pub fn hash_canonical_value(value: &serde_json::Value) -> Result<String, CanonicalError> {
    let canonical = crate::canonical::to_canonical_json_value(value)?;
    Ok(hash_bytes(&canonical))
}

/// Stream SHA256 over a reader
///
/// Used for model files, which are far too large to slurp into memory.
/// Reads in 8 KiB chunks until EOF.
pub fn hash_reader<R: Read>(reader: &mut R) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hex_encode(&hasher.finalize()))
}

/// Convert bytes to lowercase hex string
fn hex_encode(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        write!(hex, "{:02x}", byte).unwrap();
    }
    hex
}

/// Validate a SHA256 hash string format
///
/// Returns `true` if the string is a valid 64-character lowercase hex string.
pub fn is_valid_sha256(hash: &str) -> bool {
    hash.len() == 64
        && hash
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hash_bytes() {
        let hash = hash_bytes(b"Hello, world!");

        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hash.to_lowercase());
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_determinism() {
        let hash1 = hash_bytes(b"test data");
        let hash2 = hash_bytes(b"test data");

        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_different_input_different_hash() {
        assert_ne!(hash_bytes(b"input 1"), hash_bytes(b"input 2"));
    }

    #[test]
    fn test_hash_canonical_key_order_independence() {
        let value1 = json!({"z": 3, "a": 1, "m": 2});
        let value2 = json!({"a": 1, "m": 2, "z": 3});

        assert_eq!(
            hash_canonical(&value1).unwrap(),
            hash_canonical(&value2).unwrap()
        );
    }

    #[test]
    fn test_hash_canonical_float_rejected() {
        let value = json!({"threshold": 0.7});
        assert!(hash_canonical(&value).is_err());
    }

    #[test]
    fn test_hash_reader_matches_hash_bytes() {
        let data = vec![0xabu8; 20_000];
        let mut cursor = std::io::Cursor::new(data.clone());

        assert_eq!(hash_reader(&mut cursor).unwrap(), hash_bytes(&data));
    }

    #[test]
    fn test_known_hash() {
        // Known SHA256 of empty string
        let hash = hash_bytes(b"");
        assert_eq!(
            hash,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );

        // Known SHA256 of "hello"
        let hash = hash_string("hello");
        assert_eq!(
            hash,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_is_valid_sha256() {
        assert!(is_valid_sha256(&"a".repeat(64)));
        assert!(is_valid_sha256(&"0123456789abcdef".repeat(4)));

        assert!(!is_valid_sha256("too short"));
        assert!(!is_valid_sha256(&"g".repeat(64)));
        assert!(!is_valid_sha256(&"a".repeat(65)));
        // Uppercase digests are rejected, the manifest stores lowercase only
        assert!(!is_valid_sha256(&"A".repeat(64)));
    }
}
