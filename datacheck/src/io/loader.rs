//! Per-file JSON decoding with parse failures isolated to the offending
//! file.
//!
//! A malformed file never aborts the run: its outcome is captured as a
//! [`ParseDiagnostic`] beside the path, and the remaining files keep
//! loading.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::core::records::{FileRecord, FindingRecord, ParseDiagnostic};

/// Decode one record per file, keeping outcomes in file order.
pub fn load_records<T: DeserializeOwned>(files: &[PathBuf]) -> Vec<FileRecord<T>> {
    files
        .iter()
        .map(|path| FileRecord {
            path: path.clone(),
            parsed: read_record(path),
        })
        .collect()
}

/// Decode the findings list: a single JSON file holding an ordered array of
/// records. A malformed file contributes one diagnostic and no records.
pub fn load_findings(path: &Path) -> (Vec<FindingRecord>, Vec<ParseDiagnostic>) {
    match read_record::<Vec<FindingRecord>>(path) {
        Ok(findings) => {
            debug!(count = findings.len(), "loaded findings");
            (findings, Vec::new())
        }
        Err(diagnostic) => (Vec::new(), vec![diagnostic]),
    }
}

fn read_record<T: DeserializeOwned>(path: &Path) -> Result<T, ParseDiagnostic> {
    let contents = fs::read_to_string(path)
        .map_err(|err| ParseDiagnostic::new(path, err.to_string()))?;
    serde_json::from_str(&contents).map_err(|err| ParseDiagnostic::new(path, err.to_string()))
}
