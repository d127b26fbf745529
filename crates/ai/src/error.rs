/// Errors from the AI provider clients.
///
/// These never reach HTTP callers: the normalizer and synthesizer absorb
/// them into fallback feedback. They exist so failures can be logged with
/// their cause.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("AI provider error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The provider answered 2xx but reported a per-request error.
    #[error("AI provider rejected the request ({code}): {message}")]
    Rejected { code: i32, message: String },

    /// The response carried no usable content.
    #[error("AI provider returned an empty response")]
    EmptyResponse,
}

impl AiError {
    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or [`AiError::Api`] with the status and body
    /// text on failure.
    pub(crate) async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, AiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
