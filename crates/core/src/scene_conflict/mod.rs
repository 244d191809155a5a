//! Scene scheduling conflict detection.
//!
//! Given one candidate scene and the other live scenes of the same show,
//! reports every peer whose shoot window overlaps the candidate's and, for
//! those peers, the people both scenes need at once. Detection is pure and
//! advisory: callers attach the report to their response and never block a
//! save on it.

pub mod detector;
pub mod report;
pub mod snapshot;

pub use detector::{detect_conflicts, ConflictDetector};
pub use report::{ConflictEntry, ConflictGroups, ConflictReport, ConflictSummary, ConflictType};
pub use snapshot::SceneSnapshot;
