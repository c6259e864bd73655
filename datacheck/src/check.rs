//! Orchestration for `datacheck check`.
//!
//! Loads every category exactly once, builds the lookup indexes, then runs
//! the five checks in their fixed order: handles, teams, organizations,
//! contests, findings. Later checks consume indexes assembled from earlier
//! categories, so the order is not arbitrary. No check aborts another; the
//! report carries every check's diagnostics.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::checks::{
    CheckReport, check_contests, check_findings, check_handles, check_organizations, check_teams,
};
use crate::core::indexes::build_indexes;
use crate::core::records::{HandleRecord, OrgRecord};
use crate::io::config::{CONFIG_FILE, load_config};
use crate::io::layout::{DatasetPaths, FsProbe, collect_dataset};
use crate::io::loader::{load_findings, load_records};
use crate::io::table::read_contests;

/// Aggregated outcome of one validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// One report per check, in execution order.
    pub checks: Vec<CheckReport>,
}

impl RunReport {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(CheckReport::passed)
    }
}

/// Validate the dataset under `root`.
///
/// Errors only when no meaningful validation is possible: the config is
/// invalid or an expected data location is missing entirely. Parse failures
/// and invariant violations land in the returned report instead.
pub fn run_checks(root: &Path) -> Result<RunReport> {
    let config = load_config(&root.join(CONFIG_FILE)).with_context(|| "load datacheck.toml")?;
    let paths = DatasetPaths::new(root, &config);
    let files = collect_dataset(&paths)?;

    let handles = load_records::<HandleRecord>(&files.handle_files);
    let orgs = load_records::<OrgRecord>(&files.org_files);
    let (contests, contest_errors) = read_contests(&paths.contests_path);
    let (findings, finding_errors) = load_findings(&paths.findings_path);

    let indexes = build_indexes(&handles, &orgs, &contests);
    debug!(
        handles = indexes.unique_handles.len(),
        contests = indexes.unique_contest_ids.len(),
        organizations = indexes.registered_organizations.len(),
        "built indexes"
    );

    let probe = FsProbe;
    let checks = vec![
        check_handles(&handles, &paths.handles_dir, &config.avatar_prefix, &probe),
        check_teams(&handles, &indexes),
        check_organizations(&orgs, &paths.orgs_dir, &probe),
        check_contests(&paths.contests_path, &contests, &contest_errors, &indexes),
        check_findings(&findings, &finding_errors, &indexes),
    ];
    Ok(RunReport { checks })
}
