//! Dataset layout configuration stored at `datacheck.toml` in the dataset
//! root.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

/// Name of the optional config file under the dataset root.
pub const CONFIG_FILE: &str = "datacheck.toml";

/// Dataset layout configuration (TOML).
///
/// This file is intended to be edited by humans and must remain stable and
/// automatable. Missing fields default to the production layout.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DatasetConfig {
    /// Directory of per-handle JSON records, relative to the dataset root.
    pub handles_dir: String,

    /// Directory of per-organization JSON records.
    pub orgs_dir: String,

    /// The contests table (CSV with a header row).
    pub contests_file: String,

    /// The findings list (JSON array).
    pub findings_file: String,

    /// Required prefix for handle avatar paths.
    pub avatar_prefix: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            handles_dir: "_data/handles".to_string(),
            orgs_dir: "_data/orgs".to_string(),
            contests_file: "_data/contests/contests.csv".to_string(),
            findings_file: "_data/findings/findings.json".to_string(),
            avatar_prefix: "./avatars/".to_string(),
        }
    }
}

impl DatasetConfig {
    pub fn validate(&self) -> Result<()> {
        if self.handles_dir.trim().is_empty() {
            return Err(anyhow!("handles_dir must not be empty"));
        }
        if self.orgs_dir.trim().is_empty() {
            return Err(anyhow!("orgs_dir must not be empty"));
        }
        if self.contests_file.trim().is_empty() {
            return Err(anyhow!("contests_file must not be empty"));
        }
        if self.findings_file.trim().is_empty() {
            return Err(anyhow!("findings_file must not be empty"));
        }
        if self.avatar_prefix.is_empty() {
            return Err(anyhow!("avatar_prefix must not be empty"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `DatasetConfig::default()`.
pub fn load_config(path: &Path) -> Result<DatasetConfig> {
    if !path.exists() {
        let config = DatasetConfig::default();
        config.validate()?;
        return Ok(config);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let config: DatasetConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    config.validate()?;
    Ok(config)
}
