//! Route definitions for company-scoped shows.

use axum::routing::get;
use axum::Router;

use crate::handlers::show;
use crate::routes::scene;
use crate::state::AppState;

/// Routes mounted at `/companies/{company_id}/shows`.
///
/// ```text
/// GET    /                       list_by_company
/// POST   /                       create
/// GET    /{show_id}              get_by_id
///        /{show_id}/scenes/...   see routes::scene
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(show::list_by_company).post(show::create))
        .route("/{show_id}", get(show::get_by_id))
        .nest("/{show_id}/scenes", scene::router())
}
