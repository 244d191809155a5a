//! Conflict report model, ordering, and display grouping.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::personnel::PersonId;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Conflict type
// ---------------------------------------------------------------------------

/// Why two scenes conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    /// The shoot windows overlap.
    Time,
    /// The shoot windows overlap and at least one person is on both scenes.
    Resource,
}

impl ConflictType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Resource => "resource",
        }
    }

    /// Heading of the display group this type is rendered under.
    pub fn group_label(self) -> &'static str {
        match self {
            Self::Time => "Time Overlaps",
            Self::Resource => "Resource Conflicts",
        }
    }
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// One reason a candidate scene collides with one peer scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictEntry {
    pub scene_id: DbId,
    pub scene_number: String,
    pub scene_title: String,
    pub conflict_type: ConflictType,
    pub conflicting_scene_id: DbId,
    pub conflicting_scene_number: String,
    pub conflicting_scene_title: String,
    /// Present (and non-empty) only for [`ConflictType::Resource`] entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicting_resources: Option<Vec<PersonId>>,
}

impl ConflictEntry {
    /// Number of people shared with the conflicting scene (0 for time entries).
    pub fn shared_count(&self) -> usize {
        self.conflicting_resources.as_ref().map_or(0, Vec::len)
    }
}

/// An entry tagged with the conflicting scene's window start, used only for
/// ordering before the report is assembled.
#[derive(Debug, Clone)]
pub(crate) struct RankedEntry {
    pub(crate) peer_start: Timestamp,
    pub(crate) entry: ConflictEntry,
}

fn rank_order(a: &RankedEntry, b: &RankedEntry) -> Ordering {
    a.peer_start
        .cmp(&b.peer_start)
        .then_with(|| {
            a.entry
                .conflicting_scene_number
                .cmp(&b.entry.conflicting_scene_number)
        })
        .then_with(|| {
            a.entry
                .conflicting_scene_id
                .cmp(&b.entry.conflicting_scene_id)
        })
        .then_with(|| a.entry.conflict_type.cmp(&b.entry.conflict_type))
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Result of checking one scene against its peers. Computed on demand,
/// never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    pub has_conflicts: bool,
    pub conflicts: Vec<ConflictEntry>,
}

impl ConflictReport {
    /// A report with no conflicts.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sort entries by conflicting scene start, then scene number, and
    /// assemble the report.
    pub(crate) fn from_ranked(mut ranked: Vec<RankedEntry>) -> Self {
        ranked.sort_by(rank_order);
        let conflicts: Vec<ConflictEntry> = ranked.into_iter().map(|r| r.entry).collect();
        Self {
            has_conflicts: !conflicts.is_empty(),
            conflicts,
        }
    }

    /// Number of entries of the given type.
    pub fn count_of(&self, conflict_type: ConflictType) -> usize {
        self.conflicts
            .iter()
            .filter(|c| c.conflict_type == conflict_type)
            .count()
    }

    /// Whether any entry names `scene_id` as the conflicting scene.
    pub fn involves(&self, scene_id: DbId) -> bool {
        self.conflicts
            .iter()
            .any(|c| c.conflicting_scene_id == scene_id)
    }

    /// Partition entries into the two display groups, preserving order.
    pub fn grouped(&self) -> ConflictGroups<'_> {
        let (resource_conflicts, time_overlaps) = self
            .conflicts
            .iter()
            .partition(|c| c.conflict_type == ConflictType::Resource);
        ConflictGroups {
            resource_conflicts,
            time_overlaps,
        }
    }

    /// Per-type counts for badges and logging.
    pub fn summary(&self) -> ConflictSummary {
        ConflictSummary {
            total: self.conflicts.len(),
            time_overlaps: self.count_of(ConflictType::Time),
            resource_conflicts: self.count_of(ConflictType::Resource),
        }
    }
}

/// Entries split by type for the "Resource Conflicts" / "Time Overlaps"
/// display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictGroups<'a> {
    pub resource_conflicts: Vec<&'a ConflictEntry>,
    pub time_overlaps: Vec<&'a ConflictEntry>,
}

/// Per-type entry counts of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConflictSummary {
    pub total: usize,
    pub time_overlaps: usize,
    pub resource_conflicts: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn entry(
        conflict_type: ConflictType,
        peer_id: DbId,
        peer_number: &str,
        resources: Option<Vec<DbId>>,
    ) -> ConflictEntry {
        ConflictEntry {
            scene_id: 1,
            scene_number: "1".to_string(),
            scene_title: "Opening".to_string(),
            conflict_type,
            conflicting_scene_id: peer_id,
            conflicting_scene_number: peer_number.to_string(),
            conflicting_scene_title: format!("Scene {peer_number}"),
            conflicting_resources: resources.map(|r| r.into_iter().map(PersonId).collect()),
        }
    }

    fn ranked(hour: u32, e: ConflictEntry) -> RankedEntry {
        RankedEntry {
            peer_start: Utc.with_ymd_and_hms(2026, 5, 2, hour, 0, 0).unwrap(),
            entry: e,
        }
    }

    #[test]
    fn empty_report_has_no_conflicts() {
        let report = ConflictReport::from_ranked(Vec::new());
        assert!(!report.has_conflicts);
        assert_eq!(report, ConflictReport::empty());
    }

    #[test]
    fn orders_by_peer_start_then_scene_number() {
        let report = ConflictReport::from_ranked(vec![
            ranked(11, entry(ConflictType::Time, 4, "2", None)),
            ranked(10, entry(ConflictType::Time, 3, "9", None)),
            ranked(10, entry(ConflictType::Time, 2, "10", None)),
        ]);
        let numbers: Vec<&str> = report
            .conflicts
            .iter()
            .map(|c| c.conflicting_scene_number.as_str())
            .collect();
        // Lexicographic: "10" < "9".
        assert_eq!(numbers, vec!["10", "9", "2"]);
        assert!(report.has_conflicts);
    }

    #[test]
    fn time_entry_precedes_resource_entry_for_same_peer() {
        let report = ConflictReport::from_ranked(vec![
            ranked(9, entry(ConflictType::Resource, 2, "5", Some(vec![8]))),
            ranked(9, entry(ConflictType::Time, 2, "5", None)),
        ]);
        assert_eq!(report.conflicts[0].conflict_type, ConflictType::Time);
        assert_eq!(report.conflicts[1].conflict_type, ConflictType::Resource);
    }

    #[test]
    fn grouped_partitions_and_preserves_order() {
        let report = ConflictReport::from_ranked(vec![
            ranked(9, entry(ConflictType::Time, 2, "5", None)),
            ranked(9, entry(ConflictType::Resource, 2, "5", Some(vec![8, 9]))),
            ranked(12, entry(ConflictType::Time, 3, "6", None)),
        ]);
        let groups = report.grouped();
        assert_eq!(groups.resource_conflicts.len(), 1);
        assert_eq!(groups.resource_conflicts[0].shared_count(), 2);
        let time_ids: Vec<DbId> = groups
            .time_overlaps
            .iter()
            .map(|c| c.conflicting_scene_id)
            .collect();
        assert_eq!(time_ids, vec![2, 3]);
    }

    #[test]
    fn summary_counts_by_type() {
        let report = ConflictReport::from_ranked(vec![
            ranked(9, entry(ConflictType::Time, 2, "5", None)),
            ranked(9, entry(ConflictType::Resource, 2, "5", Some(vec![8]))),
            ranked(12, entry(ConflictType::Time, 3, "6", None)),
        ]);
        let summary = report.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.time_overlaps, 2);
        assert_eq!(summary.resource_conflicts, 1);
        assert!(report.involves(3));
        assert!(!report.involves(99));
    }

    #[test]
    fn serializes_type_lowercase_and_omits_resources_on_time_entries() {
        let time = serde_json::to_value(entry(ConflictType::Time, 2, "5", None)).unwrap();
        assert_eq!(time["conflict_type"], json!("time"));
        assert!(time.get("conflicting_resources").is_none());

        let resource =
            serde_json::to_value(entry(ConflictType::Resource, 2, "5", Some(vec![4, 6]))).unwrap();
        assert_eq!(resource["conflict_type"], json!("resource"));
        assert_eq!(resource["conflicting_resources"], json!([4, 6]));
    }

    #[test]
    fn group_labels() {
        assert_eq!(ConflictType::Resource.group_label(), "Resource Conflicts");
        assert_eq!(ConflictType::Time.group_label(), "Time Overlaps");
        assert_eq!(ConflictType::Time.as_str(), "time");
    }
}
