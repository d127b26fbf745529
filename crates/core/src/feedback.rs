//! The unified feedback shape shared by vision detections and AI suggestions.
//!
//! Both sources produce [`FeedbackItem`] values; the role filter, the
//! persistence layer and the export endpoint only ever see this type.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Author recorded on comments submitted without one.
pub const DEFAULT_COMMENT_AUTHOR: &str = "Anonymous";

/// Maximum length of a comment body, in characters.
pub const MAX_COMMENT_LENGTH: usize = 2000;

/// Maximum length of a comment author name, in characters.
pub const MAX_AUTHOR_LENGTH: usize = 100;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Feedback category.
///
/// The four named variants form the closed set the role filter knows about.
/// Model output can carry any string, so anything else is kept verbatim in
/// [`FeedbackCategory::Unrecognized`]; such items are stored and exported
/// but never pass the role filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FeedbackCategory {
    Accessibility,
    VisualHierarchy,
    Content,
    UiUx,
    Unrecognized(String),
}

impl FeedbackCategory {
    /// The four recognised categories, in prompt order.
    pub const KNOWN: [FeedbackCategory; 4] = [
        Self::Accessibility,
        Self::VisualHierarchy,
        Self::Content,
        Self::UiUx,
    ];

    /// Wire name of the category.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Accessibility => "accessibility",
            Self::VisualHierarchy => "visual-hierarchy",
            Self::Content => "content",
            Self::UiUx => "ui-ux",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Whether this is one of the four recognised categories.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<String> for FeedbackCategory {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "accessibility" => Self::Accessibility,
            "visual-hierarchy" => Self::VisualHierarchy,
            "content" => Self::Content,
            "ui-ux" => Self::UiUx,
            _ => Self::Unrecognized(raw),
        }
    }
}

impl From<FeedbackCategory> for String {
    fn from(category: FeedbackCategory) -> Self {
        match category {
            FeedbackCategory::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for FeedbackCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Item types
// ---------------------------------------------------------------------------

/// Bounding box `{x, y, w, h}`.
///
/// Units depend on the source: object detections are normalized to [0, 1],
/// text detections are in pixels, model suggestions are whatever the model
/// returned. Width and height may be negative when the source vertices are
/// ordered unexpectedly.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub w: f64,
    #[serde(default)]
    pub h: f64,
}

/// A single comment on a feedback item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default = "default_author")]
    pub author: String,
    pub message: String,
    #[serde(default = "Utc::now")]
    pub created_at: Timestamp,
}

fn default_author() -> String {
    DEFAULT_COMMENT_AUTHOR.to_string()
}

/// Normalized unit of review feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackItem {
    /// Assigned server-side; model output never carries one.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(rename = "type")]
    pub category: FeedbackCategory,
    pub message: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl FeedbackItem {
    /// Create an item with a fresh id and an empty comment thread.
    pub fn new(
        category: FeedbackCategory,
        message: impl Into<String>,
        coordinates: Option<Coordinates>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            message: message.into(),
            coordinates,
            comments: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// Validate and build a new comment.
///
/// A blank or missing author falls back to [`DEFAULT_COMMENT_AUTHOR`]. The
/// message is trimmed and must be non-empty.
pub fn build_comment(author: Option<&str>, message: &str) -> Result<Comment, CoreError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(CoreError::Validation("Comment message is required".into()));
    }
    if message.chars().count() > MAX_COMMENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Comment message must be at most {MAX_COMMENT_LENGTH} characters"
        )));
    }

    let author = author.map(str::trim).filter(|a| !a.is_empty());
    if let Some(a) = author {
        if a.chars().count() > MAX_AUTHOR_LENGTH {
            return Err(CoreError::Validation(format!(
                "Comment author must be at most {MAX_AUTHOR_LENGTH} characters"
            )));
        }
    }

    Ok(Comment {
        id: Uuid::new_v4(),
        author: author.unwrap_or(DEFAULT_COMMENT_AUTHOR).to_string(),
        message: message.to_string(),
        created_at: Utc::now(),
    })
}

/// Append `comment` to the item with `item_id`, searching `lists` in order.
///
/// Returns a copy of the updated item, or `None` when no list contains it.
pub fn append_comment(
    lists: &mut [&mut Vec<FeedbackItem>],
    item_id: Uuid,
    comment: Comment,
) -> Option<FeedbackItem> {
    let item = lists
        .iter_mut()
        .flat_map(|list| list.iter_mut())
        .find(|item| item.id == item_id)?;
    item.comments.push(comment);
    Some(item.clone())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
