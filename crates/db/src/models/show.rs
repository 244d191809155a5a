//! Show (production) entity model and DTOs.

use serde::{Deserialize, Serialize};
use slate_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `shows` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Show {
    pub id: DbId,
    pub company_id: DbId,
    pub name: String,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new show.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateShow {
    /// Overridden by the handler from the URL path.
    #[serde(default)]
    pub company_id: DbId,
    pub name: String,
}
