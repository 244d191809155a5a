//! Repository for the `shows` table.

use slate_core::types::DbId;
use sqlx::PgPool;

use crate::models::show::{CreateShow, Show};

const COLUMNS: &str = "id, company_id, name, deleted_at, created_at, updated_at";

/// Provides CRUD operations for shows.
pub struct ShowRepo;

impl ShowRepo {
    /// Insert a new show, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateShow) -> Result<Show, sqlx::Error> {
        let query = format!(
            "INSERT INTO shows (company_id, name) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Show>(&query)
            .bind(input.company_id)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a live show by ID, only if it belongs to `company_id`.
    pub async fn find_for_company(
        pool: &PgPool,
        company_id: DbId,
        id: DbId,
    ) -> Result<Option<Show>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM shows
             WHERE id = $1 AND company_id = $2 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, Show>(&query)
            .bind(id)
            .bind(company_id)
            .fetch_optional(pool)
            .await
    }

    /// List a company's live shows, oldest first.
    pub async fn list_by_company(pool: &PgPool, company_id: DbId) -> Result<Vec<Show>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM shows
             WHERE company_id = $1 AND deleted_at IS NULL
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Show>(&query)
            .bind(company_id)
            .fetch_all(pool)
            .await
    }
}
