//! Scene entity model and DTOs.

use serde::Serialize;
use slate_core::personnel::PersonId;
use slate_core::scene_conflict::SceneSnapshot;
use slate_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `scenes` table.
///
/// `assigned_actors` and `assigned_crew` are `BIGINT[]` columns holding
/// person ids that were validated before insert.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Scene {
    pub id: DbId,
    pub show_id: DbId,
    pub company_id: DbId,
    pub scene_number: String,
    pub title: String,
    // -- Schedule --
    pub scheduled_time: Option<Timestamp>,
    pub duration_minutes: Option<i32>,
    pub expected_duration_minutes: Option<i32>,
    // -- Personnel --
    pub assigned_actors: Vec<DbId>,
    pub assigned_crew: Vec<DbId>,
    // -- Timestamps --
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Scene {
    /// The scheduling view of this row, as seen by the conflict detector.
    pub fn to_snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            id: self.id,
            show_id: self.show_id,
            company_id: self.company_id,
            scene_number: self.scene_number.clone(),
            title: self.title.clone(),
            scheduled_time: self.scheduled_time,
            duration_minutes: self.duration_minutes,
            expected_duration_minutes: self.expected_duration_minutes,
            assigned_actors: to_person_ids(&self.assigned_actors),
            assigned_crew: to_person_ids(&self.assigned_crew),
        }
    }

    /// The snapshot this row would have after `update` is applied, without
    /// touching the database. Mirrors the `COALESCE` semantics of
    /// [`SceneRepo::update`](crate::repositories::SceneRepo::update).
    pub fn snapshot_with(&self, update: &UpdateScene) -> SceneSnapshot {
        let mut snapshot = self.to_snapshot();
        if let Some(number) = &update.scene_number {
            snapshot.scene_number = number.clone();
        }
        if let Some(title) = &update.title {
            snapshot.title = title.clone();
        }
        if update.clear_schedule {
            snapshot.scheduled_time = None;
        } else if update.scheduled_time.is_some() {
            snapshot.scheduled_time = update.scheduled_time;
        }
        if update.duration_minutes.is_some() {
            snapshot.duration_minutes = update.duration_minutes;
        }
        if update.expected_duration_minutes.is_some() {
            snapshot.expected_duration_minutes = update.expected_duration_minutes;
        }
        if let Some(actors) = &update.assigned_actors {
            snapshot.assigned_actors = actors.clone();
        }
        if let Some(crew) = &update.assigned_crew {
            snapshot.assigned_crew = crew.clone();
        }
        snapshot
    }
}

/// DTO for creating a new scene.
///
/// Built by the HTTP layer after personnel lists have been parsed into typed
/// ids; `show_id` and `company_id` come from the URL path.
#[derive(Debug, Clone)]
pub struct CreateScene {
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

impl CreateScene {
    /// Snapshot of a scene that has not been inserted yet.
    ///
    /// Uses [`SceneSnapshot::UNSAVED_ID`], which no persisted row can have.
    pub fn to_snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            id: SceneSnapshot::UNSAVED_ID,
            show_id: self.show_id,
            company_id: self.company_id,
            scene_number: self.scene_number.clone(),
            title: self.title.clone(),
            scheduled_time: self.scheduled_time,
            duration_minutes: self.duration_minutes,
            expected_duration_minutes: self.expected_duration_minutes,
            assigned_actors: self.assigned_actors.clone(),
            assigned_crew: self.assigned_crew.clone(),
        }
    }
}

/// DTO for updating an existing scene. All fields are optional.
///
/// `scheduled_time` can only be set through this DTO; to unschedule a scene
/// set `clear_schedule`, which takes precedence.
#[derive(Debug, Clone, Default)]
pub struct UpdateScene {
    pub scene_number: Option<String>,
    pub title: Option<String>,
    pub scheduled_time: Option<Timestamp>,
    pub clear_schedule: bool,
    pub duration_minutes: Option<i32>,
    pub expected_duration_minutes: Option<i32>,
    pub assigned_actors: Option<Vec<PersonId>>,
    pub assigned_crew: Option<Vec<PersonId>>,
}

fn to_person_ids(ids: &[DbId]) -> Vec<PersonId> {
    ids.iter().copied().map(PersonId).collect()
}

/// Convert typed person ids to the raw `BIGINT[]` bind value.
pub(crate) fn to_db_ids(ids: &[PersonId]) -> Vec<DbId> {
    ids.iter().map(|p| p.get()).collect()
}
