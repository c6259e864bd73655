//! The five cross-reference checks.
//!
//! Each check is a pure function over parsed records and prebuilt
//! [`DatasetIndexes`], returning its own [`CheckReport`]. Checks never
//! short-circuit each other: every check runs so a single invocation
//! surfaces all problems in the dataset, not just the first.
//!
//! Parse failures are reported by the check owning the category (handles by
//! the handle check, orgs by the organization check, and so on); the team
//! check consumes handle records but never re-reports their parse failures.

use std::collections::BTreeSet;
use std::path::Path;

use crate::core::indexes::DatasetIndexes;
use crate::core::records::{
    ContestRow, FileRecord, FindingRecord, HandleRecord, OrgRecord, ParseDiagnostic,
};

/// Filesystem-existence seam so checks stay pure and tests inject fakes.
pub trait FileProbe {
    fn is_file(&self, path: &Path) -> bool;
}

/// Outcome of one check: an ordered list of diagnostics.
///
/// A report with at least one diagnostic is a failed check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub name: &'static str,
    pub diagnostics: Vec<String>,
}

impl CheckReport {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            diagnostics: Vec::new(),
        }
    }

    fn push(&mut self, diagnostic: String) {
        self.diagnostics.push(diagnostic);
    }

    pub fn passed(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Check every handle record: the `handle` key must be present, and a
/// non-empty `image` must begin with `avatar_prefix` and resolve to an
/// existing file under `handles_root`.
///
/// The prefix and existence sub-checks both run for a bad image; neither
/// masks the other.
pub fn check_handles(
    handles: &[FileRecord<HandleRecord>],
    handles_root: &Path,
    avatar_prefix: &str,
    probe: &impl FileProbe,
) -> CheckReport {
    let mut report = CheckReport::new("handles");
    for file in handles {
        let record = match &file.parsed {
            Ok(record) => record,
            Err(diagnostic) => {
                report.push(diagnostic.message());
                continue;
            }
        };

        if record.handle.is_none() {
            report.push(format!(
                "missing key \"handle\" in {}",
                file.path.display()
            ));
        }

        if let Some(image) = &record.image
            && !image.is_empty()
        {
            if !image.starts_with(avatar_prefix) {
                report.push(format!(
                    "\"image\" must begin with \"{}\" in {} (found \"{}\")",
                    avatar_prefix,
                    file.path.display(),
                    image
                ));
            }
            if !probe.is_file(&handles_root.join(image)) {
                report.push(format!(
                    "\"image\" in {} does not resolve to a file (does \"{}\" exist?)",
                    file.path.display(),
                    image
                ));
            }
        }
    }
    report
}

/// Check every team record: each `members` entry must be a registered
/// handle.
///
/// Handle files that failed to parse are skipped silently here; their parse
/// diagnostic already belongs to the handle check.
pub fn check_teams(
    handles: &[FileRecord<HandleRecord>],
    indexes: &DatasetIndexes,
) -> CheckReport {
    let mut report = CheckReport::new("teams");
    for file in handles {
        let record = match &file.parsed {
            Ok(record) => record,
            Err(_) => continue,
        };
        let Some(members) = &record.members else {
            continue;
        };
        for member in members {
            if !indexes.unique_handles.contains(member) {
                report.push(format!(
                    "team {} has unregistered handle \"{}\"",
                    file.path.display(),
                    member
                ));
            }
        }
    }
    report
}

/// Check every organization record: the `image` key must be present and
/// non-empty, and the path must resolve to an existing file under
/// `orgs_root`.
///
/// A missing or empty `image` fails immediately, without a filesystem
/// lookup.
pub fn check_organizations(
    orgs: &[FileRecord<OrgRecord>],
    orgs_root: &Path,
    probe: &impl FileProbe,
) -> CheckReport {
    let mut report = CheckReport::new("organizations");
    for file in orgs {
        let record = match &file.parsed {
            Ok(record) => record,
            Err(diagnostic) => {
                report.push(diagnostic.message());
                continue;
            }
        };

        let image = match &record.image {
            Some(image) if !image.is_empty() => image,
            Some(_) => {
                report.push(format!(
                    "\"image\" must not be empty in {}",
                    file.path.display()
                ));
                continue;
            }
            None => {
                report.push(format!(
                    "missing key \"image\" in {}",
                    file.path.display()
                ));
                continue;
            }
        };

        if !probe.is_file(&orgs_root.join(image)) {
            report.push(format!(
                "\"image\" in {} does not resolve to a file (does \"{}\" exist?)",
                file.path.display(),
                image
            ));
        }
    }
    report
}

/// Check every contest row: `sponsor` must name a registered organization
/// and `contestid` must be unseen in this pass.
///
/// The first occurrence of an id registers it; every later occurrence is a
/// duplicate diagnostic. Both sub-checks run for every row, so an
/// unknown-sponsor row still registers its id. Row-level parse diagnostics
/// from the table reader are reported here.
pub fn check_contests(
    contests_path: &Path,
    contests: &[ContestRow],
    parse_errors: &[ParseDiagnostic],
    indexes: &DatasetIndexes,
) -> CheckReport {
    let mut report = CheckReport::new("contests");
    for diagnostic in parse_errors {
        report.push(diagnostic.message());
    }

    let mut seen = BTreeSet::new();
    for contest in contests {
        if !indexes.registered_organizations.contains(&contest.sponsor) {
            report.push(format!(
                "contest row {} in {} uses unknown organization: {}",
                contest.row,
                contests_path.display(),
                contest.sponsor
            ));
        }
        if !seen.insert(contest.contestid) {
            report.push(format!(
                "contest row {} in {} uses duplicate contestid: {}",
                contest.row,
                contests_path.display(),
                contest.contestid
            ));
        }
    }
    report
}

/// Check every finding: `handle` must be a registered handle and `contest`
/// a known contest id.
///
/// Unknown values collect into deduplicated ordered sets, reported as one
/// summary diagnostic per category; findings volume can be large, so there
/// is deliberately no per-finding line. A finding with an unknown handle is
/// not also checked for an unknown contest (at most one violation per
/// finding).
pub fn check_findings(
    findings: &[FindingRecord],
    parse_errors: &[ParseDiagnostic],
    indexes: &DatasetIndexes,
) -> CheckReport {
    let mut report = CheckReport::new("findings");
    for diagnostic in parse_errors {
        report.push(diagnostic.message());
    }

    let mut unknown_handles = BTreeSet::new();
    let mut unknown_contest_ids = BTreeSet::new();
    for finding in findings {
        if !indexes.unique_handles.contains(&finding.handle) {
            unknown_handles.insert(finding.handle.as_str());
            continue;
        }
        if !indexes.unique_contest_ids.contains(&finding.contest) {
            unknown_contest_ids.insert(finding.contest);
        }
    }

    if !unknown_handles.is_empty() {
        report.push(format!(
            "found {} unknown handles: {}",
            unknown_handles.len(),
            unknown_handles.into_iter().collect::<Vec<_>>().join(", ")
        ));
    }
    if !unknown_contest_ids.is_empty() {
        report.push(format!(
            "found {} unknown contestids: {}",
            unknown_contest_ids.len(),
            unknown_contest_ids
                .into_iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::indexes::build_indexes;
    use std::path::PathBuf;

    /// Probe backed by a fixed set of existing paths.
    struct FakeProbe {
        files: BTreeSet<PathBuf>,
    }

    impl FakeProbe {
        fn with(paths: &[&str]) -> Self {
            Self {
                files: paths.iter().map(|path| PathBuf::from(*path)).collect(),
            }
        }
    }

    impl FileProbe for FakeProbe {
        fn is_file(&self, path: &Path) -> bool {
            self.files.contains(path)
        }
    }

    /// Probe for checks that must not touch the filesystem at all.
    struct NoProbe;

    impl FileProbe for NoProbe {
        fn is_file(&self, _path: &Path) -> bool {
            panic!("check consulted the filesystem");
        }
    }

    fn handle_file(name: &str, record: HandleRecord) -> FileRecord<HandleRecord> {
        FileRecord {
            path: PathBuf::from(name),
            parsed: Ok(record),
        }
    }

    fn named_handle(name: &str, handle: &str) -> FileRecord<HandleRecord> {
        handle_file(
            name,
            HandleRecord {
                handle: Some(handle.to_string()),
                ..HandleRecord::default()
            },
        )
    }

    fn org_file(name: &str, record: OrgRecord) -> FileRecord<OrgRecord> {
        FileRecord {
            path: PathBuf::from(name),
            parsed: Ok(record),
        }
    }

    fn contest(row: usize, contestid: i64, sponsor: &str) -> ContestRow {
        ContestRow {
            row,
            contestid,
            sponsor: sponsor.to_string(),
        }
    }

    fn finding(handle: &str, contest: i64) -> FindingRecord {
        FindingRecord {
            handle: handle.to_string(),
            contest,
        }
    }

    #[test]
    fn handle_check_passes_for_well_formed_records() {
        let handles = vec![
            named_handle("alice.json", "alice"),
            handle_file(
                "bob.json",
                HandleRecord {
                    handle: Some("bob".to_string()),
                    image: Some("./avatars/bob.png".to_string()),
                    members: None,
                },
            ),
        ];
        let probe = FakeProbe::with(&["handles/./avatars/bob.png"]);

        let report = check_handles(&handles, Path::new("handles"), "./avatars/", &probe);
        assert!(report.passed(), "{:?}", report.diagnostics);
    }

    #[test]
    fn handle_check_requires_handle_key() {
        let handles = vec![handle_file("team.json", HandleRecord::default())];

        let report = check_handles(&handles, Path::new("handles"), "./avatars/", &NoProbe);
        assert_eq!(report.diagnostics.len(), 1);
        assert!(report.diagnostics[0].contains("missing key \"handle\""));
        assert!(report.diagnostics[0].contains("team.json"));
    }

    #[test]
    fn handle_check_reports_prefix_and_existence_independently() {
        let handles = vec![handle_file(
            "eve.json",
            HandleRecord {
                handle: Some("eve".to_string()),
                image: Some("../escape.png".to_string()),
                members: None,
            },
        )];
        let probe = FakeProbe::with(&[]);

        let report = check_handles(&handles, Path::new("handles"), "./avatars/", &probe);
        assert_eq!(report.diagnostics.len(), 2);
        assert!(report.diagnostics[0].contains("must begin with \"./avatars/\""));
        assert!(report.diagnostics[1].contains("does not resolve to a file"));
    }

    #[test]
    fn handle_check_ignores_empty_image() {
        let handles = vec![handle_file(
            "carol.json",
            HandleRecord {
                handle: Some("carol".to_string()),
                image: Some(String::new()),
                members: None,
            },
        )];

        let report = check_handles(&handles, Path::new("handles"), "./avatars/", &NoProbe);
        assert!(report.passed());
    }

    #[test]
    fn handle_check_reports_parse_failures_in_file_order() {
        let handles = vec![
            FileRecord {
                path: PathBuf::from("bad.json"),
                parsed: Err(ParseDiagnostic::new("bad.json", "expected value")),
            },
            named_handle("good.json", "good"),
        ];

        let report = check_handles(&handles, Path::new("handles"), "./avatars/", &NoProbe);
        assert_eq!(report.diagnostics.len(), 1);
        assert!(report.diagnostics[0].contains("unable to parse bad.json"));
    }

    #[test]
    fn team_check_cites_unregistered_member() {
        let handles = vec![
            named_handle("alice.json", "alice"),
            handle_file(
                "team1.json",
                HandleRecord {
                    handle: Some("team1".to_string()),
                    image: None,
                    members: Some(vec!["alice".to_string(), "ghost".to_string()]),
                },
            ),
        ];
        let indexes = build_indexes(&handles, &[], &[]);

        let report = check_teams(&handles, &indexes);
        assert_eq!(report.diagnostics.len(), 1);
        assert!(report.diagnostics[0].contains("ghost"));
        assert!(report.diagnostics[0].contains("team1.json"));
    }

    #[test]
    fn team_check_does_not_rereport_parse_failures() {
        let handles = vec![FileRecord {
            path: PathBuf::from("bad.json"),
            parsed: Err(ParseDiagnostic::new("bad.json", "expected value")),
        }];
        let indexes = build_indexes(&handles, &[], &[]);

        let report = check_teams(&handles, &indexes);
        assert!(report.passed());
    }

    #[test]
    fn organization_check_missing_image_skips_filesystem() {
        let orgs = vec![org_file(
            "org.json",
            OrgRecord {
                name: Some("Org".to_string()),
                image: None,
            },
        )];

        let report = check_organizations(&orgs, Path::new("orgs"), &NoProbe);
        assert_eq!(report.diagnostics.len(), 1);
        assert!(report.diagnostics[0].contains("missing key \"image\""));
    }

    #[test]
    fn organization_check_empty_image_skips_filesystem() {
        let orgs = vec![org_file(
            "org.json",
            OrgRecord {
                name: Some("Org".to_string()),
                image: Some(String::new()),
            },
        )];

        let report = check_organizations(&orgs, Path::new("orgs"), &NoProbe);
        assert_eq!(report.diagnostics.len(), 1);
        assert!(report.diagnostics[0].contains("must not be empty"));
    }

    #[test]
    fn organization_check_requires_existing_image_file() {
        let orgs = vec![org_file(
            "org.json",
            OrgRecord {
                name: Some("Org".to_string()),
                image: Some("logo.png".to_string()),
            },
        )];
        let present = FakeProbe::with(&["orgs/logo.png"]);
        let absent = FakeProbe::with(&[]);

        assert!(check_organizations(&orgs, Path::new("orgs"), &present).passed());
        let report = check_organizations(&orgs, Path::new("orgs"), &absent);
        assert_eq!(report.diagnostics.len(), 1);
        assert!(report.diagnostics[0].contains("does \"logo.png\" exist?"));
    }

    #[test]
    fn contest_check_reports_duplicate_on_second_occurrence_only() {
        let orgs = vec![org_file(
            "org.json",
            OrgRecord {
                name: Some("Org".to_string()),
                image: Some("logo.png".to_string()),
            },
        )];
        let contests = vec![
            contest(1, 10, "Org"),
            contest(2, 10, "Org"),
            contest(3, 11, "Org"),
        ];
        let indexes = build_indexes(&[], &orgs, &contests);

        let report = check_contests(Path::new("contests.csv"), &contests, &[], &indexes);
        assert_eq!(report.diagnostics.len(), 1);
        assert!(report.diagnostics[0].contains("row 2"));
        assert!(report.diagnostics[0].contains("duplicate contestid: 10"));
    }

    #[test]
    fn contest_check_flags_unknown_sponsor_and_still_registers_id() {
        let contests = vec![contest(1, 10, "Nobody"), contest(2, 10, "Nobody")];
        let indexes = build_indexes(&[], &[], &contests);

        let report = check_contests(Path::new("contests.csv"), &contests, &[], &indexes);
        assert_eq!(report.diagnostics.len(), 3);
        assert!(report.diagnostics[0].contains("unknown organization: Nobody"));
        assert!(report.diagnostics[2].contains("duplicate contestid: 10"));
    }

    #[test]
    fn findings_check_summarizes_unknown_handles() {
        let handles = vec![
            named_handle("alice.json", "alice"),
            named_handle("bob.json", "bob"),
        ];
        let contests = vec![contest(1, 1, "Org")];
        let indexes = build_indexes(&handles, &[], &contests);

        let report = check_findings(&[finding("carol", 1)], &[], &indexes);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0], "found 1 unknown handles: carol");
    }

    #[test]
    fn findings_check_reports_first_violation_per_finding_only() {
        let handles = vec![named_handle("alice.json", "alice")];
        let indexes = build_indexes(&handles, &[], &[]);

        // Unknown handle and unknown contest in the same finding: only the
        // handle is reported.
        let report = check_findings(&[finding("carol", 999)], &[], &indexes);
        assert_eq!(report.diagnostics.len(), 1);
        assert!(report.diagnostics[0].contains("unknown handles"));

        // Known handle, unknown contest: the contest is reported.
        let report = check_findings(&[finding("alice", 999)], &[], &indexes);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0], "found 1 unknown contestids: 999");
    }

    #[test]
    fn findings_check_deduplicates_unknown_values() {
        let indexes = DatasetIndexes::default();
        let findings = vec![
            finding("carol", 1),
            finding("carol", 2),
            finding("dave", 3),
        ];

        let report = check_findings(&findings, &[], &indexes);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0], "found 2 unknown handles: carol, dave");
    }
}
