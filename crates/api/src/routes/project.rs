//! Route definitions for the `/projects` resource, including the
//! project-scoped screen routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::{project, screen};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                   -> list
/// POST   /                                   -> create
/// GET    /{project_id}                       -> get_by_id
///
/// GET    /{project_id}/screens               -> list_by_project
/// POST   /{project_id}/screens               -> upload
/// GET    /{project_id}/screens/{screen_id}   -> get_for_project
/// ```
pub fn router() -> Router<AppState> {
    let screen_routes = Router::new()
        .route("/", get(screen::list_by_project).post(screen::upload))
        .route("/{screen_id}", get(screen::get_for_project));

    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/{project_id}", get(project::get_by_id))
        .nest("/{project_id}/screens", screen_routes)
}
