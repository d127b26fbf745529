pub mod health;
pub mod project;
pub mod screen;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                                        list, create
/// /projects/{project_id}                           get
/// /projects/{project_id}/screens                   list, upload (multipart)
/// /projects/{project_id}/screens/{screen_id}       get (?role=)
///
/// /screens/{screen_id}/export                      export (?role=)
/// /screens/{screen_id}/feedback/{feedback_id}/comments   add comment
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/screens", screen::router())
}
