//! Route definitions for show-scoped scenes.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::scene;
use crate::state::AppState;

/// Routes mounted at `/companies/{company_id}/shows/{show_id}/scenes`.
///
/// ```text
/// GET    /                  list_by_show
/// POST   /                  create            (response carries conflicts)
/// POST   /check-conflicts   check_conflicts   (dry run, no write)
/// GET    /{id}              get_by_id
/// PUT    /{id}              update            (response carries conflicts)
/// DELETE /{id}              delete
/// GET    /{id}/conflicts    get_conflicts
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(scene::list_by_show).post(scene::create))
        .route("/check-conflicts", post(scene::check_conflicts))
        .route(
            "/{id}",
            get(scene::get_by_id)
                .put(scene::update)
                .delete(scene::delete),
        )
        .route("/{id}/conflicts", get(scene::get_conflicts))
}
