pub mod health;
pub mod scene;
pub mod show;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /companies/{company_id}/shows                                  list, create
/// /companies/{company_id}/shows/{show_id}                        get
/// /companies/{company_id}/shows/{show_id}/scenes                 list, create (+conflicts)
/// /companies/{company_id}/shows/{show_id}/scenes/check-conflicts dry-run conflict check (POST)
/// /companies/{company_id}/shows/{show_id}/scenes/{id}            get, update (+conflicts), delete
/// /companies/{company_id}/shows/{show_id}/scenes/{id}/conflicts  current conflicts (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Company-scoped shows (also nests show-scoped scenes).
        .nest("/companies/{company_id}/shows", show::router())
}
