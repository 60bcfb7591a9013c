//! Models-directory scanning and manifest regeneration

use crate::error::ScanError;
use chrono::Utc;
use modist_canonical::hash_reader;
use modist_manifest::{FileEntry, Manifest, Model};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Files every model directory must contain to be picked up
pub const DEFAULT_REQUIRED_FILES: [&str; 2] = ["driving_policy.onnx", "driving_vision.onnx"];

/// Scanner configuration
///
/// All paths and names are explicit so multiple model trees can coexist
/// and tests never touch a hardcoded location.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory whose subdirectories are candidate models
    pub models_dir: PathBuf,

    /// Base URL model directories are published under; the per-model
    /// `base_url` is `<base_url>/<model id>`
    pub base_url: String,

    pub required_files: Vec<String>,
}

impl ScanConfig {
    pub fn new(models_dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            models_dir: models_dir.into(),
            base_url: base_url.into(),
            required_files: DEFAULT_REQUIRED_FILES.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn model_base_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), id)
    }
}

/// What happened to each model entry during regeneration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelStatus {
    /// New directory, no prior manifest entry
    Added,
    /// File hashes changed; entry rebuilt, name and selector version kept
    Updated,
    /// File hashes identical; prior entry reused verbatim
    Unchanged,
}

impl ModelStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelStatus::Added => "new",
            ModelStatus::Updated => "updated",
            ModelStatus::Unchanged => "unchanged",
        }
    }
}

/// Result of a manifest regeneration
#[derive(Debug)]
pub struct ScanOutcome {
    /// The regenerated manifest, unsigned
    pub manifest: Manifest,

    /// Per-model status in manifest order
    pub statuses: Vec<(String, ModelStatus)>,
}

/// List model directories under the configured models dir
///
/// Returns the sorted set of immediate subdirectories containing every
/// required file. Creates the models dir if it does not exist yet, the way
/// a freshly cloned distribution repo looks.
pub fn scan_model_dirs(config: &ScanConfig) -> Result<Vec<PathBuf>, ScanError> {
    if !config.models_dir.exists() {
        fs::create_dir_all(&config.models_dir)?;
    }
    if !config.models_dir.is_dir() {
        return Err(ScanError::NotADirectory(config.models_dir.clone()));
    }

    let mut dirs = Vec::new();
    for entry in fs::read_dir(&config.models_dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let has_all_files = config
            .required_files
            .iter()
            .all(|f| path.join(f).is_file());
        if has_all_files {
            dirs.push(path);
        }
    }

    dirs.sort();
    Ok(dirs)
}

/// Hash the required files of one model directory
pub fn hash_model_files(
    dir: &Path,
    required_files: &[String],
) -> Result<BTreeMap<String, FileEntry>, ScanError> {
    let mut files = BTreeMap::new();

    for name in required_files {
        let path = dir.join(name);
        let size = fs::metadata(&path)?.len();
        let mut file = fs::File::open(&path)?;
        let sha256 = hash_reader(&mut file)?;

        files.insert(name.clone(), FileEntry { size, sha256 });
    }

    Ok(files)
}

/// UTC timestamp in the manifest's `updated_at` format
pub fn timestamp_now() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Regenerate a manifest from the models directory
///
/// Pure with respect to the input manifest: a new manifest value is
/// returned, carrying over `version` and `key_id`. Entries whose file
/// hashes are unchanged are reused verbatim; changed entries keep their
/// display name and `minimum_selector_version`; new directories get their
/// id as the default name. The result is unsigned (`signature` cleared),
/// since signing happens as the final step before publication.
pub fn update_manifest(existing: &Manifest, config: &ScanConfig) -> Result<ScanOutcome, ScanError> {
    let mut models = Vec::new();
    let mut statuses = Vec::new();

    for dir in scan_model_dirs(config)? {
        let id = match dir.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => continue,
        };

        let files = hash_model_files(&dir, &config.required_files)?;

        let (model, status) = match existing.model(&id) {
            Some(prev) if prev.files == files => (prev.clone(), ModelStatus::Unchanged),
            Some(prev) => (
                Model {
                    id: id.clone(),
                    name: prev.name.clone(),
                    base_url: config.model_base_url(&id),
                    files,
                    minimum_selector_version: prev.minimum_selector_version,
                },
                ModelStatus::Updated,
            ),
            None => (
                Model {
                    id: id.clone(),
                    name: id.clone(),
                    base_url: config.model_base_url(&id),
                    files,
                    minimum_selector_version: 1,
                },
                ModelStatus::Added,
            ),
        };

        statuses.push((id, status));
        models.push(model);
    }

    let mut manifest = existing.clone();
    manifest.models = models;
    manifest.updated_at = timestamp_now();
    manifest.signature = None;

    Ok(ScanOutcome { manifest, statuses })
}

#[cfg(test)]
mod tests {
    use super::*;
    use modist_canonical::hash_bytes;
    use pretty_assertions::assert_eq;

    fn write_model_dir(models_dir: &Path, id: &str, policy: &[u8], vision: &[u8]) {
        let dir = models_dir.join(id);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("driving_policy.onnx"), policy).unwrap();
        fs::write(dir.join("driving_vision.onnx"), vision).unwrap();
    }

    fn config(models_dir: &Path) -> ScanConfig {
        ScanConfig::new(models_dir, "https://example.com/models")
    }

    #[test]
    fn test_scan_finds_complete_dirs_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        write_model_dir(tmp.path(), "zeta", b"p", b"v");
        write_model_dir(tmp.path(), "alpha", b"p", b"v");

        // Incomplete dir: only one required file
        let partial = tmp.path().join("partial");
        fs::create_dir_all(&partial).unwrap();
        fs::write(partial.join("driving_policy.onnx"), b"p").unwrap();

        // Stray file at top level
        fs::write(tmp.path().join("README.md"), b"#").unwrap();

        let dirs = scan_model_dirs(&config(tmp.path())).unwrap();
        let ids: Vec<_> = dirs
            .iter()
            .map(|d| d.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(ids, vec!["alpha".to_string(), "zeta".to_string()]);
    }

    #[test]
    fn test_scan_creates_missing_models_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let models_dir = tmp.path().join("models");

        let dirs = scan_model_dirs(&config(&models_dir)).unwrap();

        assert!(dirs.is_empty());
        assert!(models_dir.is_dir());
    }

    #[test]
    fn test_hash_model_files_matches_content() {
        let tmp = tempfile::tempdir().unwrap();
        write_model_dir(tmp.path(), "wmiv2", b"policy bytes", b"vision bytes");

        let cfg = config(tmp.path());
        let files = hash_model_files(&tmp.path().join("wmiv2"), &cfg.required_files).unwrap();

        let policy = &files["driving_policy.onnx"];
        assert_eq!(policy.size, 12);
        assert_eq!(policy.sha256, hash_bytes(b"policy bytes"));
    }

    #[test]
    fn test_new_model_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        write_model_dir(tmp.path(), "wmiv2", b"p", b"v");

        let outcome = update_manifest(&Manifest::new("key_2026_08"), &config(tmp.path())).unwrap();

        assert_eq!(
            outcome.statuses,
            vec![("wmiv2".to_string(), ModelStatus::Added)]
        );

        let model = &outcome.manifest.models[0];
        assert_eq!(model.name, "wmiv2");
        assert_eq!(model.base_url, "https://example.com/models/wmiv2");
        assert_eq!(model.minimum_selector_version, 1);
        assert_eq!(outcome.manifest.key_id, "key_2026_08");
        assert!(outcome.manifest.signature.is_none());
        assert!(!outcome.manifest.updated_at.is_empty());
    }

    #[test]
    fn test_unchanged_model_entry_reused_verbatim() {
        let tmp = tempfile::tempdir().unwrap();
        write_model_dir(tmp.path(), "wmiv2", b"p", b"v");
        let cfg = config(tmp.path());

        let first = update_manifest(&Manifest::new("key_2026_08"), &cfg).unwrap();

        // Give the entry operator-set fields the rescan must preserve
        let mut manifest = first.manifest;
        manifest.models[0].name = "WMI v2 (stable)".to_string();
        manifest.models[0].minimum_selector_version = 3;

        let second = update_manifest(&manifest, &cfg).unwrap();

        assert_eq!(
            second.statuses,
            vec![("wmiv2".to_string(), ModelStatus::Unchanged)]
        );
        assert_eq!(second.manifest.models, manifest.models);
    }

    #[test]
    fn test_changed_files_keep_name_and_selector_version() {
        let tmp = tempfile::tempdir().unwrap();
        write_model_dir(tmp.path(), "wmiv2", b"p", b"v");
        let cfg = config(tmp.path());

        let first = update_manifest(&Manifest::new("key_2026_08"), &cfg).unwrap();
        let mut manifest = first.manifest;
        manifest.models[0].name = "WMI v2 (stable)".to_string();
        manifest.models[0].minimum_selector_version = 3;

        // Retrain: file contents change
        write_model_dir(tmp.path(), "wmiv2", b"p2", b"v2");
        let second = update_manifest(&manifest, &cfg).unwrap();

        assert_eq!(
            second.statuses,
            vec![("wmiv2".to_string(), ModelStatus::Updated)]
        );

        let model = &second.manifest.models[0];
        assert_eq!(model.name, "WMI v2 (stable)");
        assert_eq!(model.minimum_selector_version, 3);
        assert_eq!(model.files["driving_policy.onnx"].sha256, hash_bytes(b"p2"));
    }

    #[test]
    fn test_removed_directory_drops_entry() {
        let tmp = tempfile::tempdir().unwrap();
        write_model_dir(tmp.path(), "old", b"p", b"v");
        let cfg = config(tmp.path());

        let first = update_manifest(&Manifest::new("key_2026_08"), &cfg).unwrap();
        assert_eq!(first.manifest.models.len(), 1);

        fs::remove_dir_all(tmp.path().join("old")).unwrap();
        let second = update_manifest(&first.manifest, &cfg).unwrap();

        assert!(second.manifest.models.is_empty());
    }

    #[test]
    fn test_rescan_clears_prior_signature() {
        let tmp = tempfile::tempdir().unwrap();
        write_model_dir(tmp.path(), "wmiv2", b"p", b"v");

        let mut manifest = Manifest::new("key_2026_08");
        manifest.signature = Some("c3RhbGU=".to_string());

        let outcome = update_manifest(&manifest, &config(tmp.path())).unwrap();
        assert!(outcome.manifest.signature.is_none());
    }

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp_now();

        // 2026-08-30T12:00:00Z
        assert_eq!(ts.len(), 20);
        assert!(ts.ends_with('Z'));
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], "T");
    }
}
