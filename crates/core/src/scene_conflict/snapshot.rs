//! Read-only view of a scene's scheduling and personnel fields.

use crate::personnel::{PersonId, ResourceSet};
use crate::shoot_window::{DurationPolicy, ShootWindow};
use crate::types::{DbId, Timestamp};

/// Everything the conflict detector needs to know about one scene.
///
/// Built from a persisted row (or from the effective values of a pending
/// create/update) by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSnapshot {
    pub id: DbId,
    pub show_id: DbId,
    pub company_id: DbId,
    pub scene_number: String,
    pub title: String,
    pub scheduled_time: Option<Timestamp>,
    pub duration_minutes: Option<i32>,
    pub expected_duration_minutes: Option<i32>,
    pub assigned_actors: Vec<PersonId>,
    pub assigned_crew: Vec<PersonId>,
}

impl SceneSnapshot {
    /// Id given to a scene that has not been persisted yet. BIGSERIAL ids
    /// start at 1, so it never matches a peer.
    pub const UNSAVED_ID: DbId = 0;

    /// The scene's shoot window under `policy`, or `None` if unscheduled.
    pub fn shoot_window(&self, policy: &DurationPolicy) -> Option<ShootWindow> {
        ShootWindow::for_schedule(
            self.scheduled_time,
            self.duration_minutes,
            self.expected_duration_minutes,
            policy,
        )
    }

    /// De-duplicated union of actors and crew.
    pub fn resource_set(&self) -> ResourceSet {
        ResourceSet::from_assignments(&self.assigned_actors, &self.assigned_crew)
    }
}
