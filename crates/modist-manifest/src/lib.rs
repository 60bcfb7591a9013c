//! # Modist Manifest
//!
//! Data model and on-disk store for the model-distribution manifest.
//!
//! This crate provides:
//! - Type definitions for the manifest and its model entries
//! - Structural validation
//! - Atomic load/save of the pretty-printed JSON manifest file
//!
//! ## Example
//!
//! ```rust,ignore
//! use modist_manifest::{load_manifest, validate_manifest};
//!
//! let manifest = load_manifest("models.json")?;
//! validate_manifest(&manifest)?;
//! ```

pub mod error;
pub mod store;
pub mod types;
pub mod validation;

pub use error::*;
pub use store::*;
pub use types::*;
pub use validation::*;
