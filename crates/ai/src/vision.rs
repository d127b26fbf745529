//! REST client for the cloud vision `images:annotate` endpoint.
//!
//! Each detection is a separate annotate request carrying a single feature,
//! so the normalizer can issue all three concurrently.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use designsight_core::vision::{EntityAnnotation, LocalizedObjectAnnotation};
use serde::{Deserialize, Serialize};

use crate::config::VisionConfig;
use crate::error::AiError;

/// Header carrying the API key on every provider request.
pub(crate) const API_KEY_HEADER: &str = "x-goog-api-key";

/// Source of the three detections the normalizer needs.
#[async_trait]
pub trait ImageAnnotator: Send + Sync {
    async fn detect_objects(&self, image: &[u8]) -> Result<Vec<LocalizedObjectAnnotation>, AiError>;
    async fn detect_labels(&self, image: &[u8]) -> Result<Vec<EntityAnnotation>, AiError>;
    async fn detect_text(&self, image: &[u8]) -> Result<Vec<EntityAnnotation>, AiError>;
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Detection feature requested from the annotate endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    ObjectLocalization,
    LabelDetection,
    TextDetection,
}

impl Feature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ObjectLocalization => "OBJECT_LOCALIZATION",
            Self::LabelDetection => "LABEL_DETECTION",
            Self::TextDetection => "TEXT_DETECTION",
        }
    }
}

#[derive(Serialize)]
struct AnnotateRequest<'a> {
    requests: [AnnotateImageRequest<'a>; 1],
}

#[derive(Serialize)]
struct AnnotateImageRequest<'a> {
    image: ImageContent,
    features: [FeatureRequest<'a>; 1],
}

#[derive(Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Serialize)]
struct FeatureRequest<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

/// One per-image response; only the fields the normalizer reads.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateImageResponse {
    #[serde(default)]
    pub localized_object_annotations: Vec<LocalizedObjectAnnotation>,
    #[serde(default)]
    pub label_annotations: Vec<EntityAnnotation>,
    #[serde(default)]
    pub text_annotations: Vec<EntityAnnotation>,
    #[serde(default)]
    pub error: Option<Status>,
}

/// Per-request error status embedded in a 200 response.
#[derive(Debug, Default, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for the cloud vision API.
pub struct VisionClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl VisionClient {
    /// Create a client from startup configuration.
    pub fn new(config: &VisionConfig) -> Result<Self, AiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(
            client,
            config.base_url.clone(),
            config.api_key.clone(),
        ))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Run a single-feature annotate request for `image`.
    pub async fn annotate(
        &self,
        image: &[u8],
        feature: Feature,
    ) -> Result<AnnotateImageResponse, AiError> {
        let body = AnnotateRequest {
            requests: [AnnotateImageRequest {
                image: ImageContent {
                    content: BASE64.encode(image),
                },
                features: [FeatureRequest {
                    kind: feature.as_str(),
                }],
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/images:annotate", self.base_url))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let parsed: AnnotateResponse = AiError::ensure_success(response).await?.json().await?;
        let image_response = parsed.responses.into_iter().next().unwrap_or_default();

        if let Some(status) = &image_response.error {
            if status.code != 0 {
                return Err(AiError::Rejected {
                    code: status.code,
                    message: status.message.clone(),
                });
            }
        }

        tracing::debug!(feature = feature.as_str(), "Vision annotate request completed");
        Ok(image_response)
    }
}

#[async_trait]
impl ImageAnnotator for VisionClient {
    async fn detect_objects(
        &self,
        image: &[u8],
    ) -> Result<Vec<LocalizedObjectAnnotation>, AiError> {
        Ok(self
            .annotate(image, Feature::ObjectLocalization)
            .await?
            .localized_object_annotations)
    }

    async fn detect_labels(&self, image: &[u8]) -> Result<Vec<EntityAnnotation>, AiError> {
        Ok(self
            .annotate(image, Feature::LabelDetection)
            .await?
            .label_annotations)
    }

    async fn detect_text(&self, image: &[u8]) -> Result<Vec<EntityAnnotation>, AiError> {
        Ok(self
            .annotate(image, Feature::TextDetection)
            .await?
            .text_annotations)
    }
}
