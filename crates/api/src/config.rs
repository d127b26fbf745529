use std::path::PathBuf;

use designsight_core::upload::DEFAULT_MAX_UPLOAD_BYTES;

/// Time reserved for disk and database work on top of an upload's AI calls.
pub const UPLOAD_TIMEOUT_MARGIN_SECS: u64 = 30;

/// Sequential provider calls made while analyzing one upload
/// (the vision fan-out, then the generator).
const SEQUENTIAL_AI_CALLS: u64 = 2;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `150`). Must cover the AI
    /// round trips made during an upload; see [`ServerConfig::covers_ai_timeout`].
    pub request_timeout_secs: u64,
    /// Directory uploaded screenshots are written to and served from.
    pub upload_dir: PathBuf,
    /// Largest accepted screenshot, in bytes (default: 5 MiB).
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `5000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `150`                      |
    /// | `UPLOAD_DIR`           | `uploads`                  |
    /// | `MAX_UPLOAD_BYTES`     | `5242880`                  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "150".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let upload_dir = PathBuf::from(
            std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()),
        );

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            upload_dir,
            max_upload_bytes,
        }
    }

    /// Whether the request timeout outlasts an upload whose AI calls each
    /// run for the full `ai_timeout_secs`, plus [`UPLOAD_TIMEOUT_MARGIN_SECS`].
    ///
    /// When this is false the timeout layer can answer 408 before a hung
    /// provider call has degraded to its fallback result.
    pub fn covers_ai_timeout(&self, ai_timeout_secs: u64) -> bool {
        let needed = ai_timeout_secs
            .saturating_mul(SEQUENTIAL_AI_CALLS)
            .saturating_add(UPLOAD_TIMEOUT_MARGIN_SECS);
        self.request_timeout_secs >= needed
    }
}
