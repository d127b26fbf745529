//! Screen entity model and DTOs.

use designsight_core::feedback::FeedbackItem;
use designsight_core::roles::{filter_for_role, ReviewerRole};
use designsight_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A screen row from the `screens` table.
///
/// The two feedback arrays are JSONB columns; [`Json`] serializes
/// transparently so the wire shape is a plain array.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    pub id: DbId,
    pub project_id: DbId,
    pub image_url: String,
    /// Vision normalizer output.
    pub feedback_items: Json<Vec<FeedbackItem>>,
    /// Suggestion synthesizer output.
    pub gemini_suggestions: Json<Vec<FeedbackItem>>,
    pub uploaded_at: Timestamp,
}

impl Screen {
    /// Copy of this screen with both feedback arrays filtered for `role`.
    pub fn for_role(&self, role: ReviewerRole) -> Self {
        Self {
            id: self.id,
            project_id: self.project_id,
            image_url: self.image_url.clone(),
            feedback_items: Json(filter_for_role(role, &self.feedback_items)),
            gemini_suggestions: Json(filter_for_role(role, &self.gemini_suggestions)),
            uploaded_at: self.uploaded_at,
        }
    }
}

/// DTO for inserting a screen with its analysis results.
#[derive(Debug, Clone)]
pub struct CreateScreen {
    pub project_id: DbId,
    pub image_url: String,
    pub feedback_items: Vec<FeedbackItem>,
    pub gemini_suggestions: Vec<FeedbackItem>,
}
