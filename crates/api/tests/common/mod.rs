#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::{Extension, Router};
use designsight_ai::{AiError, ContentGenerator, ImageAnnotator, InlineImage, ScreenAnalyzer};
use designsight_core::vision::{EntityAnnotation, LocalizedObjectAnnotation};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use designsight_api::config::ServerConfig;
use designsight_api::router::build_app_router;
use designsight_api::state::AppState;

pub const MULTIPART_BOUNDARY: &str = "designsight-test-boundary";

/// First bytes of a PNG file; enough for format sniffing.
pub const PNG_BYTES: &[u8] = &[
    0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n', 0, 0, 0, 13, b'I', b'H', b'D', b'R',
];

/// Suggestion answer returned by [`FakeGenerator::default`]: fenced, with
/// one item per category plus one outside the known set.
pub const DEFAULT_SUGGESTIONS: &str = "```json\n[\
    {\"type\": \"accessibility\", \"message\": \"Increase contrast on the secondary button\", \"coordinates\": {\"x\": 10, \"y\": 20, \"w\": 100, \"h\": 40}},\
    {\"type\": \"visual-hierarchy\", \"message\": \"Align the card titles\", \"coordinates\": null},\
    {\"type\": \"content\", \"message\": \"Shorten the hero headline\", \"coordinates\": null},\
    {\"type\": \"ui-ux\", \"message\": \"Move the primary CTA above the fold\", \"coordinates\": null},\
    {\"type\": \"performance\", \"message\": \"Lazy-load below-the-fold images\", \"coordinates\": null}\
]\n```";

// ---------------------------------------------------------------------------
// Fake AI providers
// ---------------------------------------------------------------------------

/// Annotator returning canned detections, or failing every call.
#[derive(Default, Clone)]
pub struct FakeAnnotator {
    pub objects: Vec<LocalizedObjectAnnotation>,
    pub labels: Vec<EntityAnnotation>,
    pub texts: Vec<EntityAnnotation>,
    pub fail: bool,
}

impl FakeAnnotator {
    fn check(&self) -> Result<(), AiError> {
        if self.fail {
            return Err(AiError::Api {
                status: 503,
                body: "secret upstream detail".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ImageAnnotator for FakeAnnotator {
    async fn detect_objects(
        &self,
        _image: &[u8],
    ) -> Result<Vec<LocalizedObjectAnnotation>, AiError> {
        self.check()?;
        Ok(self.objects.clone())
    }

    async fn detect_labels(&self, _image: &[u8]) -> Result<Vec<EntityAnnotation>, AiError> {
        self.check()?;
        Ok(self.labels.clone())
    }

    async fn detect_text(&self, _image: &[u8]) -> Result<Vec<EntityAnnotation>, AiError> {
        self.check()?;
        Ok(self.texts.clone())
    }
}

/// Generator returning a canned answer, or failing.
#[derive(Clone)]
pub struct FakeGenerator {
    pub answer: Option<String>,
}

impl Default for FakeGenerator {
    fn default() -> Self {
        Self {
            answer: Some(DEFAULT_SUGGESTIONS.to_string()),
        }
    }
}

#[async_trait]
impl ContentGenerator for FakeGenerator {
    async fn generate(&self, _prompt: &str, _image: InlineImage<'_>) -> Result<String, AiError> {
        self.answer.clone().ok_or(AiError::EmptyResponse)
    }
}

// ---------------------------------------------------------------------------
// App builders
// ---------------------------------------------------------------------------

/// Upload limit used by every test app.
pub const TEST_MAX_UPLOAD_BYTES: usize = 1024;

/// Build a test `ServerConfig` with safe defaults storing uploads in `upload_dir`.
pub fn test_config(upload_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        upload_dir: upload_dir.to_path_buf(),
        max_upload_bytes: TEST_MAX_UPLOAD_BYTES,
    }
}

/// Build the full application router with the default fakes: no vision
/// detections and [`DEFAULT_SUGGESTIONS`] from the generator.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, FakeAnnotator::default(), FakeGenerator::default())
}

/// Build the full application router with the given fake providers and a
/// fresh temporary upload directory.
pub fn build_test_app_with(
    pool: PgPool,
    annotator: FakeAnnotator,
    generator: FakeGenerator,
) -> Router {
    let upload_dir = tempfile::tempdir().expect("create temp upload dir");
    build_test_app_in(pool, annotator, generator, upload_dir)
}

/// Build the full application router storing uploads in `upload_dir`.
///
/// Uses [`build_app_router`] so tests exercise the production middleware
/// stack. The router carries the directory guard, so the directory is
/// removed once the last clone of the router is dropped.
pub fn build_test_app_in(
    pool: PgPool,
    annotator: FakeAnnotator,
    generator: FakeGenerator,
    upload_dir: TempDir,
) -> Router {
    let config = test_config(upload_dir.path());
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        analyzer: Arc::new(ScreenAnalyzer::new(Arc::new(annotator), Arc::new(generator))),
    };
    build_app_router(state, &config).layer(Extension(Arc::new(upload_dir)))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(
        app,
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_text(app: Router, uri: &str, body: &str) -> Response<Body> {
    send(
        app,
        Request::post(uri)
            .header("content-type", "text/plain")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

/// Build a multipart body with a single file field.
pub fn multipart_body(field: &str, file_name: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{MULTIPART_BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
         Content-Type: image/png\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart(app: Router, uri: &str, body: Vec<u8>) -> Response<Body> {
    send(
        app,
        Request::post(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap(),
    )
    .await
}

/// Upload [`PNG_BYTES`] as `home.png` to `project_id`.
pub async fn upload_png(app: Router, project_id: i64) -> Response<Body> {
    post_multipart(
        app,
        &format!("/api/projects/{project_id}/screens"),
        multipart_body("image", "home.png", PNG_BYTES),
    )
    .await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Create a project through the API and return its id.
pub async fn create_project(pool: &PgPool, name: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/projects",
        serde_json::json!({ "name": name }),
    )
    .await;
    body_json(response).await["id"].as_i64().unwrap()
}
