//! Response envelope types for API handlers.
//!
//! Screen endpoints wrap their payload in a named key (`{ "screen": ... }`,
//! `{ "screens": [...] }`) rather than returning the bare entity.

use designsight_core::feedback::FeedbackItem;
use designsight_core::roles::ReviewerRole;
use designsight_core::types::{DbId, Timestamp};
use designsight_db::models::screen::Screen;
use serde::Serialize;

/// `{ "screens": [...] }`
#[derive(Debug, Serialize)]
pub struct ScreenListResponse {
    pub screens: Vec<Screen>,
}

/// `{ "screen": {...} }`
#[derive(Debug, Serialize)]
pub struct ScreenResponse {
    pub screen: Screen,
}

/// Body returned after a successful upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: &'static str,
    pub screen: Screen,
    /// Same as `screen.feedbackItems`.
    pub feedback: Vec<FeedbackItem>,
    /// Same as `screen.geminiSuggestions`.
    pub gemini_suggestions: Vec<FeedbackItem>,
}

/// Flattened, optionally role-filtered snapshot of a screen for download.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenExport {
    pub screen_id: DbId,
    pub project_id: DbId,
    pub image_url: String,
    pub uploaded_at: Timestamp,
    /// The role the arrays were filtered for, or `null` when unfiltered.
    pub role: Option<ReviewerRole>,
    pub feedback_items: Vec<FeedbackItem>,
    pub gemini_suggestions: Vec<FeedbackItem>,
    pub exported_at: Timestamp,
}

impl ScreenExport {
    /// Build an export from an (already filtered) screen.
    pub fn new(screen: Screen, role: Option<ReviewerRole>, exported_at: Timestamp) -> Self {
        Self {
            screen_id: screen.id,
            project_id: screen.project_id,
            image_url: screen.image_url,
            uploaded_at: screen.uploaded_at,
            role,
            feedback_items: screen.feedback_items.0,
            gemini_suggestions: screen.gemini_suggestions.0,
            exported_at,
        }
    }
}
