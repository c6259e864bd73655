//! Dataset layout resolution and file collection.
//!
//! Collection fails only when an expected data location is entirely absent;
//! an empty handles or orgs directory yields an empty file list, which
//! downstream turns into an empty record set, not an error.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::debug;

use crate::core::checks::FileProbe;
use crate::io::config::DatasetConfig;

/// All canonical dataset locations for a dataset root.
#[derive(Debug, Clone)]
pub struct DatasetPaths {
    pub root: PathBuf,
    pub handles_dir: PathBuf,
    pub orgs_dir: PathBuf,
    pub contests_path: PathBuf,
    pub findings_path: PathBuf,
}

impl DatasetPaths {
    pub fn new(root: impl Into<PathBuf>, config: &DatasetConfig) -> Self {
        let root = root.into();
        Self {
            handles_dir: root.join(&config.handles_dir),
            orgs_dir: root.join(&config.orgs_dir),
            contests_path: root.join(&config.contests_file),
            findings_path: root.join(&config.findings_file),
            root,
        }
    }
}

/// Per-record file lists; the contests table and findings list are single
/// files carried by [`DatasetPaths`].
#[derive(Debug, Clone)]
pub struct CollectedFiles {
    pub handle_files: Vec<PathBuf>,
    pub org_files: Vec<PathBuf>,
}

/// Enumerate the dataset's data files.
///
/// Fails when a category's directory or file is missing entirely; no checks
/// can run without the data source.
pub fn collect_dataset(paths: &DatasetPaths) -> Result<CollectedFiles> {
    ensure_dir(&paths.handles_dir)?;
    ensure_dir(&paths.orgs_dir)?;
    ensure_file(&paths.contests_path)?;
    ensure_file(&paths.findings_path)?;

    let collected = CollectedFiles {
        handle_files: json_files(&paths.handles_dir)?,
        org_files: json_files(&paths.orgs_dir)?,
    };
    debug!(
        handles = collected.handle_files.len(),
        orgs = collected.org_files.len(),
        "collected dataset files"
    );
    Ok(collected)
}

/// Probe answering existence checks from the real filesystem.
pub struct FsProbe;

impl FileProbe for FsProbe {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// List `*.json` files directly under `dir`, sorted for deterministic
/// diagnostics.
fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).with_context(|| format!("read directory {}", dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read directory {}", dir.display()))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(anyhow!("missing directory {}", path.display()));
    }
    if !path.is_dir() {
        return Err(anyhow!("expected directory {}", path.display()));
    }
    Ok(())
}

fn ensure_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(anyhow!("missing file {}", path.display()));
    }
    if !path.is_file() {
        return Err(anyhow!("expected file {}", path.display()));
    }
    Ok(())
}
