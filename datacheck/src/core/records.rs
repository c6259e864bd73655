//! Record shapes for the dataset categories.
//!
//! Handle and organization records decode with every field optional: a file
//! missing a key must still load, so the responsible check can report it as
//! a validation diagnostic rather than a parse failure. A wrong-typed field
//! (numeric `handle`, non-array `members`) is a decode failure for that
//! file.

use std::path::PathBuf;

use serde::Deserialize;

/// A registered participant or team, one JSON file per record.
///
/// A record carrying a `members` list represents a team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HandleRecord {
    pub handle: Option<String>,
    /// Avatar path, relative to the handles directory.
    pub image: Option<String>,
    /// Member handles, present only on team records. Order is preserved.
    pub members: Option<Vec<String>>,
}

/// A sponsoring organization, one JSON file per record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OrgRecord {
    /// Referenced by the `sponsor` column of the contests table.
    pub name: Option<String>,
    /// Logo path, relative to the orgs directory.
    pub image: Option<String>,
}

/// One row of the contests table.
///
/// Only the columns the checks consume are kept; the remaining columns
/// (title, timing, amount, ...) are opaque to the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContestRow {
    /// 1-based data row number (header excluded), for diagnostics.
    pub row: usize,
    pub contestid: i64,
    pub sponsor: String,
}

/// One submitted finding linking a handle to a contest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FindingRecord {
    pub handle: String,
    pub contest: i64,
}

/// A file (or table row) that failed to decode into its category's shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub path: PathBuf,
    pub detail: String,
}

impl ParseDiagnostic {
    pub fn new(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            detail: detail.into(),
        }
    }

    /// Render as a single diagnostic line.
    pub fn message(&self) -> String {
        format!("unable to parse {}: {}", self.path.display(), self.detail)
    }
}

/// One data file's decode outcome.
///
/// Parse failures stay attached to the file, in file order, so checks can
/// report them in the position the file occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord<T> {
    pub path: PathBuf,
    pub parsed: Result<T, ParseDiagnostic>,
}

/// Split decode outcomes into (successful records, parse diagnostics).
pub fn partition<T>(outcomes: &[FileRecord<T>]) -> (Vec<&T>, Vec<&ParseDiagnostic>) {
    let mut records = Vec::new();
    let mut diagnostics = Vec::new();
    for outcome in outcomes {
        match &outcome.parsed {
            Ok(record) => records.push(record),
            Err(diagnostic) => diagnostics.push(diagnostic),
        }
    }
    (records, diagnostics)
}
