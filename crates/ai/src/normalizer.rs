//! Vision feedback normalizer.
//!
//! Issues the three detections concurrently and maps the joined result to
//! feedback. Any detection failure collapses the whole result to the single
//! failure item; this function never returns an error.

use designsight_core::feedback::FeedbackItem;
use designsight_core::vision::{
    detection_failed_feedback, feedback_from_detections, VisionDetections,
};

use crate::error::AiError;
use crate::vision::ImageAnnotator;

/// Run object, label and text detection concurrently.
///
/// Fails as soon as any of the three fails.
pub async fn detect_all(
    annotator: &dyn ImageAnnotator,
    image: &[u8],
) -> Result<VisionDetections, AiError> {
    let (objects, labels, texts) = tokio::try_join!(
        annotator.detect_objects(image),
        annotator.detect_labels(image),
        annotator.detect_text(image),
    )?;
    Ok(VisionDetections {
        objects,
        labels,
        texts,
    })
}

/// Produce normalized vision feedback for `image`.
pub async fn normalize_image(annotator: &dyn ImageAnnotator, image: &[u8]) -> Vec<FeedbackItem> {
    match detect_all(annotator, image).await {
        Ok(detections) => {
            tracing::debug!(
                objects = detections.objects.len(),
                labels = detections.labels.len(),
                texts = detections.texts.len(),
                "Vision detections received"
            );
            feedback_from_detections(&detections)
        }
        Err(e) => {
            tracing::error!(error = %e, "Vision analysis failed");
            detection_failed_feedback()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use designsight_core::feedback::FeedbackCategory;
    use designsight_core::vision::{
        EntityAnnotation, LocalizedObjectAnnotation, DETECTION_FAILED_MESSAGE,
        NO_DETECTIONS_MESSAGE,
    };

    use super::*;

    /// Fake annotator; the object call is the slowest so completion order
    /// differs from output order.
    #[derive(Default)]
    struct FakeAnnotator {
        objects: Vec<LocalizedObjectAnnotation>,
        labels: Vec<EntityAnnotation>,
        texts: Vec<EntityAnnotation>,
        fail_labels: bool,
    }

    #[async_trait]
    impl ImageAnnotator for FakeAnnotator {
        async fn detect_objects(
            &self,
            _image: &[u8],
        ) -> Result<Vec<LocalizedObjectAnnotation>, AiError> {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(self.objects.clone())
        }

        async fn detect_labels(&self, _image: &[u8]) -> Result<Vec<EntityAnnotation>, AiError> {
            if self.fail_labels {
                return Err(AiError::Api {
                    status: 403,
                    body: "PERMISSION_DENIED".into(),
                });
            }
            Ok(self.labels.clone())
        }

        async fn detect_text(&self, _image: &[u8]) -> Result<Vec<EntityAnnotation>, AiError> {
            Ok(self.texts.clone())
        }
    }

    fn label(description: &str) -> EntityAnnotation {
        EntityAnnotation {
            description: description.into(),
            score: 0.5,
            bounding_poly: None,
        }
    }

    #[tokio::test]
    async fn no_detections_yield_fallback() {
        let out = normalize_image(&FakeAnnotator::default(), b"img").await;
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].category, FeedbackCategory::UiUx);
        assert_eq!(out[0].message, NO_DETECTIONS_MESSAGE);
    }

    #[tokio::test]
    async fn any_failure_yields_single_failure_item() {
        let annotator = FakeAnnotator {
            objects: vec![LocalizedObjectAnnotation {
                name: "Button".into(),
                score: 0.9,
                bounding_poly: None,
            }],
            texts: vec![label("Hello")],
            fail_labels: true,
            ..Default::default()
        };
        let out = normalize_image(&annotator, b"img").await;
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].category, FeedbackCategory::UiUx);
        assert_eq!(out[0].message, DETECTION_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn order_is_fixed_regardless_of_completion() {
        let annotator = FakeAnnotator {
            objects: vec![LocalizedObjectAnnotation {
                name: "Card".into(),
                score: 0.9,
                bounding_poly: None,
            }],
            labels: vec![label("Screenshot")],
            texts: vec![label("Welcome back"), label("Welcome")],
            ..Default::default()
        };
        let out = normalize_image(&annotator, b"img").await;
        let categories: Vec<_> = out.iter().map(|i| i.category.clone()).collect();
        assert_eq!(
            categories,
            vec![
                FeedbackCategory::VisualHierarchy,
                FeedbackCategory::Content,
                FeedbackCategory::Accessibility,
            ]
        );
    }

    #[tokio::test]
    async fn detect_all_propagates_error() {
        let annotator = FakeAnnotator {
            fail_labels: true,
            ..Default::default()
        };
        assert!(detect_all(&annotator, b"img").await.is_err());
    }
}
