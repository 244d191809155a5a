//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope per project conventions.
//! Scene mutations additionally carry the advisory conflict report next to
//! the persisted row.

use serde::Serialize;
use slate_core::scene_conflict::ConflictReport;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": T, "conflicts": ConflictReport, "conflict_check_failed": bool }`
/// envelope for scene create/update.
///
/// Conflicts never turn a save into an error; they ride along with the
/// successful result for the UI to badge. When detection itself could not
/// run after the row was stored, `conflicts` is empty and
/// `conflict_check_failed` is `true`.
#[derive(Debug, Serialize)]
pub struct ConflictAwareResponse<T: Serialize> {
    pub data: T,
    pub conflicts: ConflictReport,
    pub conflict_check_failed: bool,
}

impl<T: Serialize> ConflictAwareResponse<T> {
    /// Wrap a stored row with the outcome of the post-save conflict check.
    pub fn new(data: T, conflicts: Option<ConflictReport>) -> Self {
        let conflict_check_failed = conflicts.is_none();
        Self {
            data,
            conflicts: conflicts.unwrap_or_else(ConflictReport::empty),
            conflict_check_failed,
        }
    }
}
