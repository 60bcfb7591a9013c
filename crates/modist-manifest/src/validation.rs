//! Manifest validation
//!
//! Structural checks run before signing or after loading. Validation never
//! touches the signature; cryptographic verification lives in modist-sign.

use crate::types::Manifest;
use thiserror::Error;

/// Errors that can occur during validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unsupported manifest version {0} (expected >= 1)")]
    UnsupportedVersion(u32),

    #[error("Empty model id at index {0}")]
    EmptyModelId(usize),

    #[error("Duplicate model id '{0}'")]
    DuplicateModelId(String),

    #[error("Model '{0}' has an empty base_url")]
    EmptyBaseUrl(String),

    #[error("Model '{0}' has no files")]
    NoFiles(String),

    #[error("Invalid SHA256 '{digest}' for file '{file}' of model '{model}': must be 64 lowercase hex characters")]
    InvalidSha256 {
        model: String,
        file: String,
        digest: String,
    },

    #[error("File '{file}' of model '{model}' has zero size")]
    ZeroFileSize { model: String, file: String },

    #[error("Empty key_id")]
    EmptyKeyId,
}

/// Validate a manifest's structure
///
/// # Errors
///
/// Returns the first `ValidationError` encountered.
pub fn validate_manifest(manifest: &Manifest) -> Result<(), ValidationError> {
    if manifest.version < 1 {
        return Err(ValidationError::UnsupportedVersion(manifest.version));
    }

    if manifest.key_id.is_empty() {
        return Err(ValidationError::EmptyKeyId);
    }

    let mut seen = std::collections::BTreeSet::new();
    for (index, model) in manifest.models.iter().enumerate() {
        if model.id.is_empty() {
            return Err(ValidationError::EmptyModelId(index));
        }
        if !seen.insert(model.id.as_str()) {
            return Err(ValidationError::DuplicateModelId(model.id.clone()));
        }
        if model.base_url.is_empty() {
            return Err(ValidationError::EmptyBaseUrl(model.id.clone()));
        }
        if model.files.is_empty() {
            return Err(ValidationError::NoFiles(model.id.clone()));
        }

        for (file, entry) in &model.files {
            if !is_sha256_digest(&entry.sha256) {
                return Err(ValidationError::InvalidSha256 {
                    model: model.id.clone(),
                    file: file.clone(),
                    digest: entry.sha256.clone(),
                });
            }
            if entry.size == 0 {
                return Err(ValidationError::ZeroFileSize {
                    model: model.id.clone(),
                    file: file.clone(),
                });
            }
        }
    }

    Ok(())
}

fn is_sha256_digest(digest: &str) -> bool {
    digest.len() == 64
        && digest
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FileEntry, Model};
    use std::collections::BTreeMap;

    fn model(id: &str) -> Model {
        let mut files = BTreeMap::new();
        files.insert(
            "driving_policy.onnx".to_string(),
            FileEntry {
                size: 1024,
                sha256: "0f".repeat(32),
            },
        );
        Model {
            id: id.to_string(),
            name: id.to_string(),
            base_url: format!("https://example.com/models/{id}"),
            files,
            minimum_selector_version: 1,
        }
    }

    fn manifest(models: Vec<Model>) -> Manifest {
        Manifest {
            version: 1,
            updated_at: "2026-08-30T12:00:00Z".to_string(),
            models,
            key_id: "key_2026_08".to_string(),
            signature: None,
        }
    }

    #[test]
    fn test_valid_manifest() {
        assert!(validate_manifest(&manifest(vec![model("a"), model("b")])).is_ok());
    }

    #[test]
    fn test_empty_models_list_is_valid() {
        assert!(validate_manifest(&manifest(vec![])).is_ok());
    }

    #[test]
    fn test_duplicate_model_id() {
        let result = validate_manifest(&manifest(vec![model("a"), model("a")]));
        assert_eq!(
            result,
            Err(ValidationError::DuplicateModelId("a".to_string()))
        );
    }

    #[test]
    fn test_empty_model_id() {
        let result = validate_manifest(&manifest(vec![model("")]));
        assert_eq!(result, Err(ValidationError::EmptyModelId(0)));
    }

    #[test]
    fn test_uppercase_digest_rejected() {
        let mut bad = model("a");
        bad.files.get_mut("driving_policy.onnx").unwrap().sha256 = "0F".repeat(32);

        assert!(matches!(
            validate_manifest(&manifest(vec![bad])),
            Err(ValidationError::InvalidSha256 { .. })
        ));
    }

    #[test]
    fn test_short_digest_rejected() {
        let mut bad = model("a");
        bad.files.get_mut("driving_policy.onnx").unwrap().sha256 = "abc".to_string();

        assert!(matches!(
            validate_manifest(&manifest(vec![bad])),
            Err(ValidationError::InvalidSha256 { .. })
        ));
    }

    #[test]
    fn test_zero_file_size_rejected() {
        let mut bad = model("a");
        bad.files.get_mut("driving_policy.onnx").unwrap().size = 0;

        assert!(matches!(
            validate_manifest(&manifest(vec![bad])),
            Err(ValidationError::ZeroFileSize { .. })
        ));
    }

    #[test]
    fn test_no_files_rejected() {
        let mut bad = model("a");
        bad.files.clear();

        assert_eq!(
            validate_manifest(&manifest(vec![bad])),
            Err(ValidationError::NoFiles("a".to_string()))
        );
    }

    #[test]
    fn test_empty_key_id_rejected() {
        let mut m = manifest(vec![]);
        m.key_id.clear();

        assert_eq!(validate_manifest(&m), Err(ValidationError::EmptyKeyId));
    }
}
