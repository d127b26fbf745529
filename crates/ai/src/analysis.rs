//! The upload-time analysis pass: normalize, then synthesize.

use std::sync::Arc;

use designsight_core::feedback::FeedbackItem;

use crate::gemini::ContentGenerator;
use crate::normalizer::normalize_image;
use crate::synthesizer::synthesize_suggestions;
use crate::vision::ImageAnnotator;

/// Feedback produced for one uploaded screen.
#[derive(Debug, Clone, Default)]
pub struct ScreenAnalysis {
    /// Normalized vision feedback (objects, labels, text; or a fallback item).
    pub feedback: Vec<FeedbackItem>,
    /// Model suggestions; empty when the model failed or answered garbage.
    pub suggestions: Vec<FeedbackItem>,
}

/// Runs both feedback sources for an image.
///
/// Cheaply cloneable; the providers sit behind `Arc`s so tests can swap in
/// fakes.
#[derive(Clone)]
pub struct ScreenAnalyzer {
    annotator: Arc<dyn ImageAnnotator>,
    generator: Arc<dyn ContentGenerator>,
}

impl ScreenAnalyzer {
    pub fn new(annotator: Arc<dyn ImageAnnotator>, generator: Arc<dyn ContentGenerator>) -> Self {
        Self {
            annotator,
            generator,
        }
    }

    /// Analyze `image`. Never fails: each stage degrades on its own.
    ///
    /// The synthesizer runs strictly after the normalizer because its
    /// prompt embeds the normalized feedback.
    pub async fn analyze(&self, image: &[u8]) -> ScreenAnalysis {
        let feedback = normalize_image(self.annotator.as_ref(), image).await;
        let suggestions = synthesize_suggestions(self.generator.as_ref(), &feedback, image).await;
        tracing::info!(
            feedback = feedback.len(),
            suggestions = suggestions.len(),
            "Screen analysis complete"
        );
        ScreenAnalysis {
            feedback,
            suggestions,
        }
    }
}
