//! Route definitions for screen-level operations not scoped by project.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{comment, screen};
use crate::state::AppState;

/// Routes mounted at `/screens`.
///
/// ```text
/// GET    /{screen_id}/export                              -> export
/// POST   /{screen_id}/feedback/{feedback_id}/comments     -> comment::create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{screen_id}/export", get(screen::export))
        .route(
            "/{screen_id}/feedback/{feedback_id}/comments",
            post(comment::create),
        )
}
