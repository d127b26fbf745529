//! Handler for appending comments to feedback items.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use designsight_core::error::CoreError;
use designsight_core::feedback::{build_comment, FeedbackItem};
use designsight_core::types::DbId;
use designsight_db::repositories::{CommentAppend, ScreenRepo};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::state::AppState;

/// Request body for a new comment.
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// POST /api/screens/{screen_id}/feedback/{feedback_id}/comments
///
/// Appends to the matching item in either feedback array and returns the
/// updated item.
pub async fn create(
    State(state): State<AppState>,
    Path((screen_id, feedback_id)): Path<(DbId, Uuid)>,
    Json(input): Json<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<FeedbackItem>)> {
    let comment = build_comment(input.author.as_deref(), &input.message)?;

    match ScreenRepo::append_comment(&state.pool, screen_id, feedback_id, comment).await? {
        CommentAppend::Appended(item) => Ok((StatusCode::CREATED, Json(item))),
        CommentAppend::ScreenNotFound => Err(CoreError::not_found("Screen", screen_id).into()),
        CommentAppend::ItemNotFound => {
            Err(CoreError::not_found("Feedback item", feedback_id).into())
        }
    }
}
