//! Prompt contract and response parser for AI-generated UX suggestions.
//!
//! The model is asked for a bare JSON array of feedback objects, but real
//! responses arrive wrapped in code fences or surrounded by prose. Parsing is
//! therefore two-staged (fence strip, then bracket extraction) and returns a
//! [`SuggestionParse`] instead of an error so callers can degrade to "no
//! suggestions" without special-casing.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::feedback::{Coordinates, FeedbackCategory, FeedbackItem};
use crate::roles::ReviewerRole;

/// Greedy match from the first `[` to the last `]`, across newlines.
static JSON_ARRAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[\s\S]*\]").expect("valid regex"));

// ---------------------------------------------------------------------------
// Prompt
// ---------------------------------------------------------------------------

/// The subset of a feedback item shown to the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionDraft {
    #[serde(rename = "type")]
    pub category: FeedbackCategory,
    pub message: String,
    pub coordinates: Option<Coordinates>,
}

impl From<&FeedbackItem> for SuggestionDraft {
    fn from(item: &FeedbackItem) -> Self {
        Self {
            category: item.category.clone(),
            message: item.message.clone(),
            coordinates: item.coordinates,
        }
    }
}

const PROMPT_HEADER: &str = "\
You are a UX/UI expert tasked with analyzing a screen design.
You will be provided with:
1. Vision feedback (objects, text, and detected regions)
2. A screenshot of the screen itself

Your job is to generate structured feedback covering these categories:
- Accessibility issues (contrast, text size, missing alt text, keyboard navigation, color blindness)
- Visual hierarchy problems (spacing, alignment, typography, inconsistent sizing)
- Content/copy suggestions (tone, clarity, conciseness, readability)
- UI/UX recommendations (button placement, information architecture, interaction affordances)

### Rules:
- Each feedback item must include:
  - type: one of [accessibility | visual-hierarchy | content | ui-ux]
  - message: a clear, actionable suggestion
  - coordinates: {x,y,w,h} using bounding boxes/text regions from the vision data.
    If no coordinates are available, return null.
- Output must be valid JSON only, no plain text or explanations.
- Provide multiple feedback items in a JSON array.
";

const PROMPT_EXAMPLE: &str = r#"[
  {
    "type": "accessibility",
    "message": "Increase color contrast between text and background for better readability.",
    "coordinates": { "x": 120, "y": 200, "w": 300, "h": 50 }
  },
  {
    "type": "visual-hierarchy",
    "message": "Reduce spacing between heading and subheading for better grouping.",
    "coordinates": null
  }
]"#;

/// Build the suggestion prompt around the normalized vision feedback.
pub fn build_suggestion_prompt(feedback: &[FeedbackItem]) -> String {
    let drafts: Vec<SuggestionDraft> = feedback.iter().map(SuggestionDraft::from).collect();
    let input = serde_json::to_string_pretty(&drafts).unwrap_or_else(|_| "[]".to_string());

    let relevance: Vec<String> = ReviewerRole::ALL
        .iter()
        .map(|role| {
            let categories: Vec<String> = role
                .categories()
                .iter()
                .map(|c| c.as_str().to_string())
                .collect();
            format!("- {} -> {}", role.as_str(), categories.join(", "))
        })
        .collect();

    format!(
        "{PROMPT_HEADER}\n### Role-based relevance (for later filtering):\n{}\n\n\
         ### Input data:\n{input}\n\n### Expected Output (JSON only):\n{PROMPT_EXAMPLE}\n",
        relevance.join("\n")
    )
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Outcome of parsing a model response.
#[derive(Debug, Clone, PartialEq)]
pub enum SuggestionParse {
    /// The response contained a JSON array. `skipped` counts array entries
    /// that were not usable suggestions.
    Items {
        items: Vec<FeedbackItem>,
        skipped: usize,
    },
    /// Nothing parseable was found. `cleaned` is the text that was tried.
    Unparsable { cleaned: String, error: String },
}

impl SuggestionParse {
    /// Collapse to the item list, treating an unparsable response as empty.
    pub fn into_items(self) -> Vec<FeedbackItem> {
        match self {
            Self::Items { items, .. } => items,
            Self::Unparsable { .. } => Vec::new(),
        }
    }
}

/// One array entry as the model wrote it, before validation.
#[derive(Deserialize)]
struct RawSuggestion {
    #[serde(rename = "type", default)]
    category: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    coordinates: serde_json::Value,
}

/// Stage one: remove every opening and closing code fence marker.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Stage two: the bracketed span if one exists, else the whole text.
pub fn extract_json_array(cleaned: &str) -> &str {
    JSON_ARRAY_RE
        .find(cleaned)
        .map(|m| m.as_str())
        .unwrap_or(cleaned)
}

/// Convert one array entry into a feedback item.
///
/// Entries that are not objects, have no string `type` or have a blank
/// message are rejected. A box with a null or non-numeric component becomes
/// `None` rather than rejecting the entry.
fn suggestion_from_value(value: serde_json::Value) -> Option<FeedbackItem> {
    let raw: RawSuggestion = serde_json::from_value(value).ok()?;
    let category = FeedbackCategory::from(raw.category?);
    let message = raw.message.filter(|m| !m.trim().is_empty())?;
    let coordinates = serde_json::from_value::<Coordinates>(raw.coordinates).ok();
    Some(FeedbackItem::new(category, message, coordinates))
}

/// Parse a raw model response into feedback items.
///
/// Only a response with no JSON array at all is [`SuggestionParse::Unparsable`].
/// Inside the array each entry is validated on its own, so one malformed
/// entry does not discard the rest. Every kept item gets a fresh id and an
/// empty comment thread.
pub fn parse_suggestions(raw: &str) -> SuggestionParse {
    let cleaned = strip_code_fences(raw);
    let candidate = extract_json_array(&cleaned);

    match serde_json::from_str::<Vec<serde_json::Value>>(candidate) {
        Ok(values) => {
            let total = values.len();
            let items: Vec<FeedbackItem> =
                values.into_iter().filter_map(suggestion_from_value).collect();
            SuggestionParse::Items {
                skipped: total - items.len(),
                items,
            }
        }
        Err(e) => SuggestionParse::Unparsable {
            cleaned: candidate.to_string(),
            error: e.to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
