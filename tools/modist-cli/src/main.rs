//! Modist CLI - signed model manifest maintenance tool.
//!
//! # Commands
//!
//! - `modist keygen` - Generate an Ed25519 signing keypair
//! - `modist sign <manifest>` - Canonicalize and sign a manifest in place
//! - `modist verify <manifest>` - Verify a manifest signature
//! - `modist update` - Rescan the models directory and regenerate the manifest
//! - `modist canonicalize <file>` - Print canonical JSON (debugging aid)

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use modist_canonical::{hash_bytes, to_canonical_json_value};
use modist_manifest::{load_manifest, save_manifest, validate_manifest, Manifest};
use modist_scan::{update_manifest, update_readme, ScanConfig};
use modist_sign::{
    sign_manifest, signing_bytes, suggested_key_id, verify_manifest, KeyStore, PublicKey,
    TrustStore,
};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "modist")]
#[command(about = "Signed model manifest maintenance tool", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new Ed25519 signing keypair
    Keygen {
        /// Directory to create the keypair under
        #[arg(long, default_value = "keys")]
        key_dir: PathBuf,

        /// Key id to record alongside the pair (default: key_<year>_<month>)
        #[arg(long)]
        key_id: Option<String>,

        /// Overwrite an existing keypair
        #[arg(long)]
        force: bool,
    },

    /// Sign a manifest file, overwriting it in place
    Sign {
        /// Manifest JSON file
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,

        /// Directory holding the signing keypair
        #[arg(long, default_value = "keys")]
        key_dir: PathBuf,
    },

    /// Verify a manifest signature; exits nonzero on failure
    Verify {
        /// Manifest JSON file
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,

        /// Key directory whose public key and key id are trusted
        #[arg(long)]
        key_dir: Option<PathBuf>,

        /// Extra trust anchor (repeatable): --anchor key_2026_08=<base64>
        #[arg(long, short = 'a')]
        anchor: Vec<String>,
    },

    /// Scan the models directory and regenerate the manifest
    Update {
        /// Directory whose subdirectories are candidate models
        #[arg(long, default_value = "models")]
        models_dir: PathBuf,

        /// Base URL the model directories are published under
        #[arg(long)]
        base_url: String,

        /// Manifest file to regenerate (created if absent)
        #[arg(long, default_value = "models.json")]
        manifest: PathBuf,

        /// Directory holding the signing keypair
        #[arg(long, default_value = "keys")]
        key_dir: PathBuf,

        /// README whose "## Models" table should be refreshed
        #[arg(long)]
        readme: Option<PathBuf>,

        /// Regenerate only; skip the signing step
        #[arg(long)]
        no_sign: bool,
    },

    /// Print the canonical JSON of an arbitrary JSON file
    Canonicalize {
        /// Path to the JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Keygen {
            key_dir,
            key_id,
            force,
        } => cmd_keygen(key_dir, key_id, force),
        Commands::Sign { manifest, key_dir } => cmd_sign(&manifest, key_dir),
        Commands::Verify {
            manifest,
            key_dir,
            anchor,
        } => cmd_verify(&manifest, key_dir, anchor),
        Commands::Update {
            models_dir,
            base_url,
            manifest,
            key_dir,
            readme,
            no_sign,
        } => cmd_update(models_dir, base_url, &manifest, key_dir, readme, no_sign),
        Commands::Canonicalize { file } => cmd_canonicalize(&file),
    }
}

fn cmd_keygen(key_dir: PathBuf, key_id: Option<String>, force: bool) -> Result<()> {
    let store = KeyStore::new(key_dir);

    if store.has_keypair() && !force {
        bail!(
            "A keypair already exists at {}. Pass --force to overwrite it",
            store.private_key_path().display()
        );
    }

    let key_id = key_id.unwrap_or_else(suggested_key_id);
    let keypair = store
        .generate(&key_id)
        .context("Failed to generate keypair")?;
    let public_b64 = keypair.public_key().to_base64();

    println!("Key generated");
    println!("  private key: {}", store.private_key_path().display());
    println!("  public key:  {}", store.public_key_path().display());
    println!();
    println!("Public key (base64, raw 32 bytes):");
    println!("\"{}\"", public_b64);
    println!();
    println!("Trust anchor entry for verifier code:");
    println!("  {} = {}", key_id, public_b64);

    Ok(())
}

fn cmd_sign(manifest_path: &Path, key_dir: PathBuf) -> Result<()> {
    let store = KeyStore::new(key_dir);
    let keypair = store.load_keypair()?;

    let manifest = load_manifest(manifest_path)
        .with_context(|| format!("Failed to load manifest {}", manifest_path.display()))?;
    validate_manifest(&manifest).context("Manifest failed validation")?;

    if let Ok(store_key_id) = store.load_key_id() {
        if store_key_id != manifest.key_id {
            eprintln!(
                "warning: manifest key_id '{}' does not match the key store's '{}'",
                manifest.key_id, store_key_id
            );
        }
    }

    let payload_sha256 = hash_bytes(&signing_bytes(&manifest)?);
    let signed = sign_manifest(&manifest, &keypair)?;
    save_manifest(manifest_path, &signed)
        .with_context(|| format!("Failed to write manifest {}", manifest_path.display()))?;

    let signature = signed.signature.unwrap_or_default();
    println!("Signed {}", manifest_path.display());
    println!("  key_id:    {}", signed.key_id);
    println!("  payload:   sha256:{}", payload_sha256);
    println!("  signature: {}...", &signature[..signature.len().min(16)]);

    Ok(())
}

fn cmd_verify(manifest_path: &Path, key_dir: Option<PathBuf>, anchors: Vec<String>) -> Result<()> {
    let mut trust = TrustStore::new();

    for anchor in &anchors {
        let (key_id, encoded) = anchor
            .split_once('=')
            .with_context(|| format!("Invalid anchor '{}': expected <key_id>=<base64>", anchor))?;
        trust.insert(key_id, PublicKey::from_base64(encoded)?);
    }

    // Fall back to the local key store when no anchors are given explicitly
    let key_dir = key_dir.or_else(|| {
        if anchors.is_empty() {
            Some(PathBuf::from("keys"))
        } else {
            None
        }
    });
    if let Some(dir) = key_dir {
        let store = KeyStore::new(dir);
        trust.insert(store.load_key_id()?, store.load_public_key()?);
    }

    if trust.is_empty() {
        bail!("No trust anchors: pass --anchor or --key-dir");
    }

    let manifest = load_manifest(manifest_path)
        .with_context(|| format!("Failed to load manifest {}", manifest_path.display()))?;
    verify_manifest(&manifest, &trust)?;

    println!("Signature OK (key_id: {})", manifest.key_id);
    Ok(())
}

fn cmd_update(
    models_dir: PathBuf,
    base_url: String,
    manifest_path: &Path,
    key_dir: PathBuf,
    readme: Option<PathBuf>,
    no_sign: bool,
) -> Result<()> {
    let store = KeyStore::new(key_dir);
    let config = ScanConfig::new(models_dir, base_url);

    let existing = if manifest_path.exists() {
        load_manifest(manifest_path)
            .with_context(|| format!("Failed to load manifest {}", manifest_path.display()))?
    } else {
        let key_id = store.load_key_id().unwrap_or_else(|_| suggested_key_id());
        Manifest::new(key_id)
    };

    let outcome = update_manifest(&existing, &config).context("Scan failed")?;

    if outcome.manifest.models.is_empty() {
        eprintln!(
            "No model folders found under {}. Expected layout:",
            config.models_dir.display()
        );
        eprintln!("  models/");
        eprintln!("  └── wmiv2/");
        for file in &config.required_files {
            eprintln!("      ├── {}", file);
        }
    }

    println!("Scanned {} model(s):", outcome.manifest.models.len());
    for (id, status) in &outcome.statuses {
        println!("  [{}] {}", id, status.as_str());
    }

    validate_manifest(&outcome.manifest).context("Regenerated manifest failed validation")?;

    let manifest = if no_sign {
        outcome.manifest
    } else {
        let keypair = store.load_keypair()?;
        sign_manifest(&outcome.manifest, &keypair)?
    };

    save_manifest(manifest_path, &manifest)
        .with_context(|| format!("Failed to write manifest {}", manifest_path.display()))?;
    println!(
        "Wrote {}{}",
        manifest_path.display(),
        if no_sign { " (unsigned)" } else { " (signed)" }
    );

    if let Some(readme_path) = readme {
        if update_readme(&readme_path, &manifest.models)? {
            println!("Updated models table in {}", readme_path.display());
        }
    }

    Ok(())
}

fn cmd_canonicalize(file: &Path) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;

    let value: serde_json::Value = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse {} as JSON", file.display()))?;

    let canonical =
        to_canonical_json_value(&value).context("Failed to generate canonical JSON")?;

    std::io::stdout()
        .write_all(&canonical)
        .context("Failed to write output")?;

    Ok(())
}
