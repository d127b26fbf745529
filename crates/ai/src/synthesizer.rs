//! Suggestion synthesizer.
//!
//! Sends the normalized vision feedback and the screenshot to the
//! generative model and parses its answer. Upstream and parse failures both
//! degrade to an empty list; this function never returns an error.

use designsight_core::feedback::FeedbackItem;
use designsight_core::suggestions::{build_suggestion_prompt, parse_suggestions, SuggestionParse};
use designsight_core::upload::sniff_mime_type;

use crate::gemini::{ContentGenerator, InlineImage};

/// Generate UX suggestions for `image`, informed by `feedback`.
pub async fn synthesize_suggestions(
    generator: &dyn ContentGenerator,
    feedback: &[FeedbackItem],
    image: &[u8],
) -> Vec<FeedbackItem> {
    let prompt = build_suggestion_prompt(feedback);
    let inline = InlineImage {
        mime_type: sniff_mime_type(image),
        bytes: image,
    };

    let raw = match generator.generate(&prompt, inline).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!(error = %e, "Error generating UX suggestions");
            return Vec::new();
        }
    };

    match parse_suggestions(&raw) {
        SuggestionParse::Items { items, skipped } => {
            if skipped > 0 {
                tracing::warn!(skipped, "Skipped malformed UX suggestions");
            }
            tracing::debug!(count = items.len(), "Parsed UX suggestions");
            items
        }
        SuggestionParse::Unparsable { cleaned, error } => {
            tracing::warn!(%error, cleaned = %cleaned, "Suggestion JSON parse failed");
            Vec::new()
        }
    }
}
