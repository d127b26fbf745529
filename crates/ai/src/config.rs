//! Startup-time configuration for the AI provider clients.
//!
//! Credentials are read once at startup and handed to the client
//! constructors; nothing here is mutated while serving requests.

/// Default timeout for a single provider call, in seconds.
const DEFAULT_AI_TIMEOUT_SECS: u64 = 60;

const DEFAULT_VISION_BASE_URL: &str = "https://vision.googleapis.com";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro";

fn ai_timeout_secs() -> u64 {
    std::env::var("AI_TIMEOUT_SECS")
        .unwrap_or_else(|_| DEFAULT_AI_TIMEOUT_SECS.to_string())
        .parse()
        .expect("AI_TIMEOUT_SECS must be a valid u64")
}

fn required(name: &str) -> String {
    let value =
        std::env::var(name).unwrap_or_else(|_| panic!("{name} must be set in the environment"));
    assert!(!value.is_empty(), "{name} must not be empty");
    value
}

/// Configuration for the cloud vision client.
#[derive(Debug, Clone)]
pub struct VisionConfig {
    pub api_key: String,
    /// Base URL without trailing slash (overridable for tests and proxies).
    pub base_url: String,
    pub timeout_secs: u64,
}

impl VisionConfig {
    /// Load vision configuration from environment variables.
    ///
    /// | Env Var                  | Required | Default                          |
    /// |--------------------------|----------|----------------------------------|
    /// | `GOOGLE_VISION_API_KEY`  | **yes**  | --                               |
    /// | `GOOGLE_VISION_BASE_URL` | no       | `https://vision.googleapis.com`  |
    /// | `AI_TIMEOUT_SECS`        | no       | `60`                             |
    ///
    /// # Panics
    ///
    /// Panics if the API key is missing or empty, or the timeout is not a number.
    pub fn from_env() -> Self {
        Self {
            api_key: required("GOOGLE_VISION_API_KEY"),
            base_url: std::env::var("GOOGLE_VISION_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_VISION_BASE_URL.into()),
            timeout_secs: ai_timeout_secs(),
        }
    }
}

/// Configuration for the generative-language client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Load generative-language configuration from environment variables.
    ///
    /// | Env Var           | Required | Default                                      |
    /// |-------------------|----------|----------------------------------------------|
    /// | `GEMINI_API_KEY`  | **yes**  | --                                           |
    /// | `GEMINI_MODEL`    | no       | `gemini-1.5-pro`                             |
    /// | `GEMINI_BASE_URL` | no       | `https://generativelanguage.googleapis.com`  |
    /// | `AI_TIMEOUT_SECS` | no       | `60`                                         |
    ///
    /// # Panics
    ///
    /// Panics if the API key is missing or empty, or the timeout is not a number.
    pub fn from_env() -> Self {
        Self {
            api_key: required("GEMINI_API_KEY"),
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.into()),
            base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.into()),
            timeout_secs: ai_timeout_secs(),
        }
    }
}
