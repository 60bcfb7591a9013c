//! # Modist Canonical
//!
//! Deterministic JSON serialization and hashing for the modist manifest.
//!
//! A manifest signature is computed over the canonical byte form of the
//! manifest, so signer and verifier must derive identical bytes from the
//! same logical document no matter how the JSON file on disk is formatted.
//!
//! ## Canonical JSON Rules
//!
//! 1. Object keys sorted lexicographically by UTF-8 bytes
//! 2. Arrays preserve insertion order
//! 3. No whitespace
//! 4. ASCII-only output: non-ASCII characters are `\uXXXX`-escaped
//! 5. **Non-integer numbers are NOT allowed** - use strings
//!
//! ## Example
//!
//! ```rust
//! use modist_canonical::{to_canonical_json_string, hash_canonical};
//!
//! let value = serde_json::json!({"b": 1, "a": 2});
//! let canonical = to_canonical_json_string(&value).unwrap();
//! assert_eq!(canonical, r#"{"a":2,"b":1}"#);
//!
//! let hash = hash_canonical(&value).unwrap();
//! assert_eq!(hash.len(), 64);
//! ```
//!
//! ## Number Prohibition
//!
//! Floats are prohibited in canonical JSON regions because different
//! platforms serialize them inconsistently. Use strings instead:
//!
//! ```json
//! // WRONG - will cause signature mismatches
//! {"threshold": 0.7}
//!
//! // CORRECT - deterministic across platforms
//! {"threshold": "0.7"}
//! ```

mod canonical;
mod error;
mod hash;

pub use canonical::*;
pub use error::*;
pub use hash::*;
