//! Repository for the `scenes` table.

use slate_core::scene_conflict::SceneSnapshot;
use slate_core::types::DbId;
use sqlx::PgPool;

use crate::models::scene::{to_db_ids, CreateScene, Scene, UpdateScene};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, show_id, company_id, scene_number, title, \
    scheduled_time, duration_minutes, expected_duration_minutes, \
    assigned_actors, assigned_crew, deleted_at, created_at, updated_at";

/// Provides CRUD operations for scenes.
pub struct SceneRepo;

impl SceneRepo {
    /// Insert a new scene, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateScene) -> Result<Scene, sqlx::Error> {
        let query = format!(
            "INSERT INTO scenes
                (show_id, company_id, scene_number, title, scheduled_time,
                 duration_minutes, expected_duration_minutes, assigned_actors, assigned_crew)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Scene>(&query)
            .bind(input.show_id)
            .bind(input.company_id)
            .bind(&input.scene_number)
            .bind(&input.title)
            .bind(input.scheduled_time)
            .bind(input.duration_minutes)
            .bind(input.expected_duration_minutes)
            .bind(to_db_ids(&input.assigned_actors))
            .bind(to_db_ids(&input.assigned_crew))
            .fetch_one(pool)
            .await
    }

    /// Find a live scene by ID, but only if it belongs to the given show and
    /// company.
    pub async fn find_in_show(
        pool: &PgPool,
        company_id: DbId,
        show_id: DbId,
        id: DbId,
    ) -> Result<Option<Scene>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scenes
             WHERE id = $1 AND company_id = $2 AND show_id = $3 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, Scene>(&query)
            .bind(id)
            .bind(company_id)
            .bind(show_id)
            .fetch_optional(pool)
            .await
    }

    /// List the live scenes of a show, scheduled scenes first in schedule
    /// order, then by scene number.
    pub async fn list_by_show(
        pool: &PgPool,
        company_id: DbId,
        show_id: DbId,
    ) -> Result<Vec<Scene>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scenes
             WHERE company_id = $1 AND show_id = $2 AND deleted_at IS NULL
             ORDER BY scheduled_time ASC NULLS LAST, scene_number ASC, id ASC"
        );
        sqlx::query_as::<_, Scene>(&query)
            .bind(company_id)
            .bind(show_id)
            .fetch_all(pool)
            .await
    }

    /// Snapshot of every live scene in a show except `exclude_id`, ready to
    /// be handed to the conflict detector as its peer set.
    pub async fn list_peers(
        pool: &PgPool,
        company_id: DbId,
        show_id: DbId,
        exclude_id: Option<DbId>,
    ) -> Result<Vec<SceneSnapshot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scenes
             WHERE company_id = $1 AND show_id = $2 AND deleted_at IS NULL
               AND ($3::BIGINT IS NULL OR id <> $3)
             ORDER BY id ASC"
        );
        let rows = sqlx::query_as::<_, Scene>(&query)
            .bind(company_id)
            .bind(show_id)
            .bind(exclude_id)
            .fetch_all(pool)
            .await?;

        tracing::debug!(
            company_id,
            show_id,
            ?exclude_id,
            peer_count = rows.len(),
            "Loaded peer scene snapshot"
        );

        Ok(rows.iter().map(Scene::to_snapshot).collect())
    }

    /// Update a scene. Only non-`None` fields in `input` are applied;
    /// `clear_schedule` unsets `scheduled_time`.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateScene,
    ) -> Result<Option<Scene>, sqlx::Error> {
        let query = format!(
            "UPDATE scenes SET
                scene_number = COALESCE($2, scene_number),
                title = COALESCE($3, title),
                scheduled_time = CASE WHEN $4::BOOLEAN THEN NULL
                                      ELSE COALESCE($5, scheduled_time) END,
                duration_minutes = COALESCE($6, duration_minutes),
                expected_duration_minutes = COALESCE($7, expected_duration_minutes),
                assigned_actors = COALESCE($8, assigned_actors),
                assigned_crew = COALESCE($9, assigned_crew)
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Scene>(&query)
            .bind(id)
            .bind(&input.scene_number)
            .bind(&input.title)
            .bind(input.clear_schedule)
            .bind(input.scheduled_time)
            .bind(input.duration_minutes)
            .bind(input.expected_duration_minutes)
            .bind(input.assigned_actors.as_deref().map(to_db_ids))
            .bind(input.assigned_crew.as_deref().map(to_db_ids))
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a scene by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE scenes SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
