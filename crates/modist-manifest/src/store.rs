//! On-disk manifest store
//!
//! The manifest file is pretty-printed JSON (2-space indent) for human
//! readability. Canonical bytes for signing are derived independently of
//! this formatting, so the store is free to reformat on every save.

use crate::error::ManifestError;
use crate::types::Manifest;
use std::fs;
use std::path::Path;

/// Load and parse a manifest file
///
/// # Errors
///
/// Returns `ManifestError::Io` if the file cannot be read and
/// `ManifestError::Parse` if it is not valid manifest JSON. Both are fatal
/// to the caller; a malformed manifest is never "unsigned but usable".
pub fn load_manifest(path: impl AsRef<Path>) -> Result<Manifest, ManifestError> {
    let json = fs::read_to_string(path)?;
    let manifest = serde_json::from_str(&json)?;
    Ok(manifest)
}

/// Serialize and write a manifest atomically
///
/// Writes the pretty-printed manifest to a temporary file in the same
/// directory, then renames it over the destination. A reader concurrently
/// fetching the file sees either the old manifest or the new one, never a
/// half-written document.
pub fn save_manifest(path: impl AsRef<Path>, manifest: &Manifest) -> Result<(), ManifestError> {
    let path = path.as_ref();
    let mut json = serde_json::to_string_pretty(manifest)?;
    json.push('\n');

    // Temp file must be on the same filesystem for the rename to be atomic
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "manifest.json".to_string());
    let tmp_path = path.with_file_name(format!("{file_name}.tmp"));

    fs::write(&tmp_path, json.as_bytes())?;
    if let Err(err) = fs::rename(&tmp_path, path) {
        // Don't leave the temp file behind on a failed rename
        let _ = fs::remove_file(&tmp_path);
        return Err(err.into());
    }

    Ok(())
}
