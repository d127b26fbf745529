use assert_matches::assert_matches;
use designsight_ai::{AiError, ContentGenerator, GeminiClient, InlineImage};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-gemini-key";
const MODEL: &str = "gemini-1.5-pro";
const GENERATE_PATH: &str = "/v1beta/models/gemini-1.5-pro:generateContent";

fn client(server: &MockServer) -> GeminiClient {
    GeminiClient::with_client(
        reqwest::Client::new(),
        server.uri(),
        API_KEY.to_string(),
        MODEL.to_string(),
    )
}

fn image() -> InlineImage<'static> {
    InlineImage {
        mime_type: "image/jpeg",
        bytes: b"abc",
    }
}

#[tokio::test]
async fn generate_posts_prompt_and_inline_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", API_KEY))
        .and(body_partial_json(json!({
            "contents": [{"parts": [
                {"text": "Review this"},
                {"inline_data": {"mime_type": "image/jpeg", "data": "YWJj"}}
            ]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"role": "model", "parts": [
                {"text": "```json\n[{\"type\": \"ui-ux\", \"message\": \"Group the actions\", \"coordinates\": null}]\n```"}
            ]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = client(&server).generate("Review this", image()).await.unwrap();
    assert!(text.starts_with("```json"));
    assert!(text.contains("Group the actions"));
}

#[tokio::test]
async fn no_candidates_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        })))
        .mount(&server)
        .await;

    let err = client(&server).generate("p", image()).await.unwrap_err();
    assert_matches!(err, AiError::EmptyResponse);
}

#[tokio::test]
async fn server_error_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let err = client(&server).generate("p", image()).await.unwrap_err();
    assert_matches!(err, AiError::Api { status: 500, .. });
}

#[tokio::test]
async fn model_name_selects_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "[]"}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::with_client(
        reqwest::Client::new(),
        format!("{}/", server.uri()),
        API_KEY.to_string(),
        "gemini-2.0-flash".to_string(),
    );
    assert_eq!(client.model(), "gemini-2.0-flash");
    assert_eq!(client.generate("p", image()).await.unwrap(), "[]");
}
