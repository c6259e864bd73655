//! Read-only lookup sets shared by the cross-reference checks.

use std::collections::BTreeSet;

use crate::core::records::{ContestRow, FileRecord, HandleRecord, OrgRecord, partition};

/// Lookup sets built once per run and treated as immutable inputs to the
/// checks. Ordered sets keep summary diagnostics deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetIndexes {
    /// Every `handle` value among successfully parsed handle records.
    pub unique_handles: BTreeSet<String>,
    /// Every `contestid` among successfully parsed contest rows.
    pub unique_contest_ids: BTreeSet<i64>,
    /// Every organization `name` among successfully parsed org records.
    pub registered_organizations: BTreeSet<String>,
}

/// Build the three lookup sets from successfully parsed records.
///
/// Duplicates collapse silently into the sets; uniqueness is an invariant
/// enforced by the checks, not here. Records that failed to parse (and
/// records missing the indexed key) contribute nothing.
pub fn build_indexes(
    handles: &[FileRecord<HandleRecord>],
    orgs: &[FileRecord<OrgRecord>],
    contests: &[ContestRow],
) -> DatasetIndexes {
    let mut indexes = DatasetIndexes::default();
    for record in partition(handles).0 {
        if let Some(handle) = &record.handle {
            indexes.unique_handles.insert(handle.clone());
        }
    }
    for org in partition(orgs).0 {
        if let Some(name) = &org.name {
            indexes.registered_organizations.insert(name.clone());
        }
    }
    for contest in contests {
        indexes.unique_contest_ids.insert(contest.contestid);
    }
    indexes
}
