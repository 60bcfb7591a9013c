//! # Modist Scan
//!
//! Scans a models directory, hashes model files, and regenerates the
//! distribution manifest. Signing is a separate step (see modist-sign);
//! a regenerated manifest always comes back with its signature cleared.
//!
//! A model is any immediate subdirectory of the models directory that
//! contains every required file:
//!
//! ```text
//! models/
//! └── wmiv2/
//!     ├── driving_policy.onnx
//!     └── driving_vision.onnx
//! ```

pub mod error;
pub mod readme;
pub mod scan;

pub use error::*;
pub use readme::*;
pub use scan::*;
