//! Handlers for the `/scenes` resource.
//!
//! Scenes are nested under shows:
//! `/companies/{company_id}/shows/{show_id}/scenes[/{id}]`
//!
//! Create and update persist the scene first, then run conflict detection
//! against the show's other live scenes using the stored row as the
//! effective post-change values. The report rides along in the response;
//! a conflicting schedule is still saved, and a failed conflict check after
//! the save is logged and flagged rather than turned into an error.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use slate_core::error::CoreError;
use slate_core::personnel::parse_person_ids;
use slate_core::scene::{validate_duration_minutes, validate_scene_number, validate_title};
use slate_core::scene_conflict::{ConflictReport, SceneSnapshot};
use slate_core::types::{DbId, Timestamp};
use slate_db::models::scene::{CreateScene, Scene, UpdateScene};
use slate_db::repositories::SceneRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::show::ensure_show;
use crate::response::{ConflictAwareResponse, DataResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for creating a scene.
///
/// `assigned_actors` / `assigned_crew` accept person ids as numbers or
/// numeric strings; they are validated into typed ids before anything is
/// stored.
#[derive(Debug, Deserialize)]
pub struct CreateSceneRequest {
    pub scene_number: String,
    pub title: String,
    pub scheduled_time: Option<Timestamp>,
    pub duration_minutes: Option<i32>,
    pub expected_duration_minutes: Option<i32>,
    #[serde(default)]
    pub assigned_actors: Value,
    #[serde(default)]
    pub assigned_crew: Value,
}

/// Request body for updating a scene. Omitted fields keep their value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSceneRequest {
    pub scene_number: Option<String>,
    pub title: Option<String>,
    pub scheduled_time: Option<Timestamp>,
    /// Unschedule the scene. Wins over `scheduled_time`.
    #[serde(default)]
    pub clear_schedule: bool,
    pub duration_minutes: Option<i32>,
    pub expected_duration_minutes: Option<i32>,
    pub assigned_actors: Option<Value>,
    pub assigned_crew: Option<Value>,
}

/// Request body for a dry-run conflict check.
///
/// With `scene_id`, the changes are overlaid on that stored scene. Without
/// it, the body describes a new scene and `scene_number` and `title` are
/// required.
#[derive(Debug, Deserialize)]
pub struct CheckConflictsRequest {
    pub scene_id: Option<DbId>,
    #[serde(flatten)]
    pub changes: UpdateSceneRequest,
}

impl CreateSceneRequest {
    fn into_create(self, company_id: DbId, show_id: DbId) -> AppResult<CreateScene> {
        validate_scene_number(&self.scene_number)?;
        validate_title(&self.title)?;
        validate_duration_minutes("duration_minutes", self.duration_minutes)?;
        validate_duration_minutes("expected_duration_minutes", self.expected_duration_minutes)?;

        Ok(CreateScene {
            show_id,
            company_id,
            scene_number: self.scene_number,
            title: self.title,
            scheduled_time: self.scheduled_time,
            duration_minutes: self.duration_minutes,
            expected_duration_minutes: self.expected_duration_minutes,
            assigned_actors: parse_person_ids("assigned_actors", &self.assigned_actors)?,
            assigned_crew: parse_person_ids("assigned_crew", &self.assigned_crew)?,
        })
    }
}

impl UpdateSceneRequest {
    fn into_update(self) -> AppResult<UpdateScene> {
        if let Some(number) = &self.scene_number {
            validate_scene_number(number)?;
        }
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        validate_duration_minutes("duration_minutes", self.duration_minutes)?;
        validate_duration_minutes("expected_duration_minutes", self.expected_duration_minutes)?;

        let assigned_actors = self
            .assigned_actors
            .as_ref()
            .map(|v| parse_person_ids("assigned_actors", v))
            .transpose()?;
        let assigned_crew = self
            .assigned_crew
            .as_ref()
            .map(|v| parse_person_ids("assigned_crew", v))
            .transpose()?;

        Ok(UpdateScene {
            scene_number: self.scene_number,
            title: self.title,
            scheduled_time: self.scheduled_time,
            clear_schedule: self.clear_schedule,
            duration_minutes: self.duration_minutes,
            expected_duration_minutes: self.expected_duration_minutes,
            assigned_actors,
            assigned_crew,
        })
    }

    /// Interpret the changes as a brand new scene (dry-run without `scene_id`).
    fn into_new_scene(self, company_id: DbId, show_id: DbId) -> AppResult<CreateScene> {
        let (Some(scene_number), Some(title)) = (self.scene_number, self.title) else {
            return Err(AppError::BadRequest(
                "scene_number and title are required when scene_id is omitted".to_string(),
            ));
        };
        let scheduled_time = if self.clear_schedule {
            None
        } else {
            self.scheduled_time
        };
        CreateSceneRequest {
            scene_number,
            title,
            scheduled_time,
            duration_minutes: self.duration_minutes,
            expected_duration_minutes: self.expected_duration_minutes,
            assigned_actors: self.assigned_actors.unwrap_or(Value::Null),
            assigned_crew: self.assigned_crew.unwrap_or(Value::Null),
        }
        .into_create(company_id, show_id)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn scene_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Scene", id })
}

/// Run conflict detection for `candidate` against the current live scenes
/// of its show.
async fn detect_for(state: &AppState, candidate: &SceneSnapshot) -> AppResult<ConflictReport> {
    let exclude = (candidate.id != SceneSnapshot::UNSAVED_ID).then_some(candidate.id);
    let peers =
        SceneRepo::list_peers(&state.pool, candidate.company_id, candidate.show_id, exclude)
            .await?;
    let report = state.conflict_detector().detect(candidate, &peers);

    let summary = report.summary();
    if report.has_conflicts {
        tracing::info!(
            scene_id = candidate.id,
            show_id = candidate.show_id,
            peers = peers.len(),
            time_overlaps = summary.time_overlaps,
            resource_conflicts = summary.resource_conflicts,
            "Scene scheduling conflicts detected"
        );
        for entry in &report.conflicts {
            tracing::debug!(
                scene_id = candidate.id,
                conflicting_scene_id = entry.conflicting_scene_id,
                conflict_type = entry.conflict_type.as_str(),
                group = entry.conflict_type.group_label(),
                shared = entry.shared_count(),
                "Scene conflict"
            );
        }
    } else {
        tracing::debug!(
            scene_id = candidate.id,
            show_id = candidate.show_id,
            peers = peers.len(),
            "No scene scheduling conflicts"
        );
    }

    Ok(report)
}

/// Conflict check for a row that is already stored.
///
/// The save has happened, so a failure here is logged and reported as
/// `None` instead of failing the request; a retrying client would otherwise
/// create the scene twice.
async fn detect_after_save(state: &AppState, scene: &Scene) -> Option<ConflictReport> {
    match detect_for(state, &scene.to_snapshot()).await {
        Ok(report) => Some(report),
        Err(err) => {
            tracing::warn!(
                scene_id = scene.id,
                show_id = scene.show_id,
                error = %err,
                "Conflict check failed after scene was saved"
            );
            None
        }
    }
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/companies/{company_id}/shows/{show_id}/scenes
pub async fn create(
    State(state): State<AppState>,
    Path((company_id, show_id)): Path<(DbId, DbId)>,
    Json(body): Json<CreateSceneRequest>,
) -> AppResult<impl IntoResponse> {
    ensure_show(&state.pool, company_id, show_id).await?;
    let input = body.into_create(company_id, show_id)?;

    let scene = SceneRepo::create(&state.pool, &input).await?;

    tracing::info!(
        scene_id = scene.id,
        show_id,
        scene_number = %scene.scene_number,
        "Scene created"
    );

    let conflicts = detect_after_save(&state, &scene).await;

    Ok((
        StatusCode::CREATED,
        Json(ConflictAwareResponse::new(scene, conflicts)),
    ))
}

/// GET /api/v1/companies/{company_id}/shows/{show_id}/scenes
pub async fn list_by_show(
    State(state): State<AppState>,
    Path((company_id, show_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    ensure_show(&state.pool, company_id, show_id).await?;
    let scenes = SceneRepo::list_by_show(&state.pool, company_id, show_id).await?;
    Ok(Json(DataResponse { data: scenes }))
}

/// GET /api/v1/companies/{company_id}/shows/{show_id}/scenes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((company_id, show_id, id)): Path<(DbId, DbId, DbId)>,
) -> AppResult<Json<DataResponse<Scene>>> {
    let scene = SceneRepo::find_in_show(&state.pool, company_id, show_id, id)
        .await?
        .ok_or_else(|| scene_not_found(id))?;
    Ok(Json(DataResponse { data: scene }))
}

/// PUT /api/v1/companies/{company_id}/shows/{show_id}/scenes/{id}
pub async fn update(
    State(state): State<AppState>,
    Path((company_id, show_id, id)): Path<(DbId, DbId, DbId)>,
    Json(body): Json<UpdateSceneRequest>,
) -> AppResult<impl IntoResponse> {
    let input = body.into_update()?;

    SceneRepo::find_in_show(&state.pool, company_id, show_id, id)
        .await?
        .ok_or_else(|| scene_not_found(id))?;

    let scene = SceneRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| scene_not_found(id))?;

    tracing::info!(scene_id = id, show_id, "Scene updated");

    let conflicts = detect_after_save(&state, &scene).await;

    Ok(Json(ConflictAwareResponse::new(scene, conflicts)))
}

/// DELETE /api/v1/companies/{company_id}/shows/{show_id}/scenes/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path((company_id, show_id, id)): Path<(DbId, DbId, DbId)>,
) -> AppResult<StatusCode> {
    SceneRepo::find_in_show(&state.pool, company_id, show_id, id)
        .await?
        .ok_or_else(|| scene_not_found(id))?;

    if SceneRepo::soft_delete(&state.pool, id).await? {
        tracing::info!(scene_id = id, show_id, "Scene deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(scene_not_found(id))
    }
}

// ---------------------------------------------------------------------------
// Conflict queries
// ---------------------------------------------------------------------------

/// GET /api/v1/companies/{company_id}/shows/{show_id}/scenes/{id}/conflicts
///
/// Current conflicts of a stored scene against the live schedule.
pub async fn get_conflicts(
    State(state): State<AppState>,
    Path((company_id, show_id, id)): Path<(DbId, DbId, DbId)>,
) -> AppResult<Json<DataResponse<ConflictReport>>> {
    let scene = SceneRepo::find_in_show(&state.pool, company_id, show_id, id)
        .await?
        .ok_or_else(|| scene_not_found(id))?;

    let report = detect_for(&state, &scene.to_snapshot()).await?;
    Ok(Json(DataResponse { data: report }))
}

/// POST /api/v1/companies/{company_id}/shows/{show_id}/scenes/check-conflicts
///
/// Dry run: reports the conflicts a create or update would produce without
/// writing anything.
pub async fn check_conflicts(
    State(state): State<AppState>,
    Path((company_id, show_id)): Path<(DbId, DbId)>,
    Json(body): Json<CheckConflictsRequest>,
) -> AppResult<Json<DataResponse<ConflictReport>>> {
    ensure_show(&state.pool, company_id, show_id).await?;

    let candidate = match body.scene_id {
        Some(id) => {
            let existing = SceneRepo::find_in_show(&state.pool, company_id, show_id, id)
                .await?
                .ok_or_else(|| scene_not_found(id))?;
            existing.snapshot_with(&body.changes.into_update()?)
        }
        None => body
            .changes
            .into_new_scene(company_id, show_id)?
            .to_snapshot(),
    };

    let report = detect_for(&state, &candidate).await?;
    Ok(Json(DataResponse { data: report }))
}
