//! Test-only helpers for building dataset fixtures on disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// A temporary dataset laid out like the production `_data/` tree.
///
/// Starts with empty handles/orgs directories, a header-only contests
/// table, and an empty findings list, so every category collects cleanly.
pub struct TestDataset {
    temp: TempDir,
}

impl TestDataset {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        let dataset = Self { temp };
        for dir in [
            "_data/handles",
            "_data/orgs",
            "_data/contests",
            "_data/findings",
        ] {
            fs::create_dir_all(dataset.root().join(dir))
                .with_context(|| format!("create {dir}"))?;
        }
        dataset.write_contests("contestid,title,sponsor,amount\n")?;
        dataset.write_findings("[]\n")?;
        Ok(dataset)
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn handles_dir(&self) -> PathBuf {
        self.root().join("_data/handles")
    }

    pub fn orgs_dir(&self) -> PathBuf {
        self.root().join("_data/orgs")
    }

    pub fn contests_path(&self) -> PathBuf {
        self.root().join("_data/contests/contests.csv")
    }

    pub fn findings_path(&self) -> PathBuf {
        self.root().join("_data/findings/findings.json")
    }

    /// Write `<name>.json` under the handles directory.
    pub fn write_handle(&self, name: &str, contents: &str) -> Result<PathBuf> {
        self.write(self.handles_dir().join(format!("{name}.json")), contents)
    }

    /// Write `<name>.json` under the orgs directory.
    pub fn write_org(&self, name: &str, contents: &str) -> Result<PathBuf> {
        self.write(self.orgs_dir().join(format!("{name}.json")), contents)
    }

    pub fn write_contests(&self, contents: &str) -> Result<PathBuf> {
        self.write(self.contests_path(), contents)
    }

    pub fn write_findings(&self, contents: &str) -> Result<PathBuf> {
        self.write(self.findings_path(), contents)
    }

    /// Create an empty file at `relative` (parents included), e.g. an
    /// avatar image the dataset references.
    pub fn touch(&self, relative: &str) -> Result<PathBuf> {
        self.write(self.root().join(relative), "")
    }

    /// Sorted list of the handle JSON files, as the collector would see it.
    pub fn handle_files(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(self.handles_dir()).context("read handles dir")?;
        let mut files = Vec::new();
        for entry in entries {
            let path = entry.context("read handles dir")?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn write(&self, path: PathBuf, contents: &str) -> Result<PathBuf> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }
}
