//! Mapping from cloud vision detections to [`FeedbackItem`]s.
//!
//! The annotation structs mirror the subset of the vision API response that
//! the mapping reads. Vertex components the API omits (it drops zero values)
//! deserialize as `None` and are read as `0`.

use serde::{Deserialize, Serialize};

use crate::feedback::{Coordinates, FeedbackCategory, FeedbackItem};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Message of the single item emitted when nothing was detected.
pub const NO_DETECTIONS_MESSAGE: &str =
    "No objects, labels, or text detected. Check if the image is clear and well-lit.";

/// Message of the single item emitted when any detection call failed.
pub const DETECTION_FAILED_MESSAGE: &str = "Failed to generate feedback";

// ---------------------------------------------------------------------------
// Annotation types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingPoly {
    /// Pixel-space vertices (text detection).
    #[serde(default)]
    pub vertices: Vec<Vertex>,
    /// Vertices normalized to [0, 1] (object localization).
    #[serde(default)]
    pub normalized_vertices: Vec<Vertex>,
}

/// One localized object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedObjectAnnotation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub bounding_poly: Option<BoundingPoly>,
}

/// A label or text annotation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityAnnotation {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub bounding_poly: Option<BoundingPoly>,
}

/// Results of the three detections for one image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisionDetections {
    pub objects: Vec<LocalizedObjectAnnotation>,
    pub labels: Vec<EntityAnnotation>,
    /// Text annotations; the first one spans the full text block.
    pub texts: Vec<EntityAnnotation>,
}

impl VisionDetections {
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty() && self.labels.is_empty() && self.texts.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Mapping
// ---------------------------------------------------------------------------

/// Box from the first and third vertex: `{x0, y0, x2 - x0, y2 - y0}`.
///
/// Returns `None` when fewer than three vertices are present. The width and
/// height are not validated and can be negative.
pub fn vertex_delta(vertices: &[Vertex]) -> Option<Coordinates> {
    let (first, third) = (vertices.first()?, vertices.get(2)?);
    let x0 = first.x.unwrap_or(0.0);
    let y0 = first.y.unwrap_or(0.0);
    Some(Coordinates {
        x: x0,
        y: y0,
        w: third.x.unwrap_or(0.0) - x0,
        h: third.y.unwrap_or(0.0) - y0,
    })
}

/// Format a [0, 1] confidence as a percentage with one decimal place.
///
/// Ties round away from zero (`0.8125` gives `81.3`); plain `{:.1}` would
/// round them to even.
fn percent(score: f64) -> String {
    format!("{:.1}", (score * 1000.0).round() / 10.0)
}

/// Object → `visual-hierarchy`, boxed in normalized units.
pub fn object_feedback(object: &LocalizedObjectAnnotation) -> FeedbackItem {
    let coordinates = object
        .bounding_poly
        .as_ref()
        .and_then(|poly| vertex_delta(&poly.normalized_vertices));
    FeedbackItem::new(
        FeedbackCategory::VisualHierarchy,
        format!(
            "Detected object: {} with confidence {}%",
            object.name,
            percent(object.score)
        ),
        coordinates,
    )
}

/// Label → `content`, never boxed.
pub fn label_feedback(label: &EntityAnnotation) -> FeedbackItem {
    FeedbackItem::new(
        FeedbackCategory::Content,
        format!(
            "Detected label: {} ({}%)",
            label.description,
            percent(label.score)
        ),
        None,
    )
}

/// Full-text annotation → `accessibility`, boxed in pixels.
pub fn text_feedback(text: &EntityAnnotation) -> FeedbackItem {
    let coordinates = text
        .bounding_poly
        .as_ref()
        .and_then(|poly| vertex_delta(&poly.vertices));
    FeedbackItem::new(
        FeedbackCategory::Accessibility,
        format!("Detected text: \"{}\"", text.description),
        coordinates,
    )
}

/// Map a full set of detections to feedback.
///
/// Order is objects, then labels, then at most one text item. An empty
/// detection set yields exactly one `ui-ux` fallback item.
pub fn feedback_from_detections(detections: &VisionDetections) -> Vec<FeedbackItem> {
    let mut feedback: Vec<FeedbackItem> = detections
        .objects
        .iter()
        .map(object_feedback)
        .chain(detections.labels.iter().map(label_feedback))
        .chain(detections.texts.first().map(text_feedback))
        .collect();

    if feedback.is_empty() {
        feedback.push(FeedbackItem::new(
            FeedbackCategory::UiUx,
            NO_DETECTIONS_MESSAGE,
            None,
        ));
    }

    feedback
}

/// The single item returned when detection failed.
pub fn detection_failed_feedback() -> Vec<FeedbackItem> {
    vec![FeedbackItem::new(
        FeedbackCategory::UiUx,
        DETECTION_FAILED_MESSAGE,
        None,
    )]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
