//! `ContentGenerator` trait and the reqwest-based [`GeminiClient`].
//!
//! The client speaks the Generative Language REST API directly:
//! `POST {endpoint}/{model}:generateContent` with an `x-goog-api-key` header
//! and a JSON body of one user turn holding the prompt text plus the audio
//! file as an `inlineData` part.  Generation parameters (temperature, topK,
//! topP, maxOutputTokens) ride along in `generationConfig`.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::json;
use thiserror::Error;

use crate::config::GeminiConfig;
use crate::gemini::models::{ApiErrorResponse, GenerateContentResponse};
use crate::media::AudioPayload;

// ---------------------------------------------------------------------------
// GeminiError
// ---------------------------------------------------------------------------

/// Errors that can occur during a generation call.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("Gemini request timed out")]
    Timeout,

    /// The API answered with a non-success status.
    #[error("Gemini API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The HTTP response could not be parsed as expected JSON.
    #[error("failed to parse Gemini response: {0}")]
    Parse(String),

    /// The API returned a response with no usable text content.
    #[error("Gemini returned an empty response")]
    EmptyResponse,
}

impl From<reqwest::Error> for GeminiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GeminiError::Timeout
        } else {
            GeminiError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// ContentGenerator trait
// ---------------------------------------------------------------------------

/// Async trait for the external generation call.
///
/// Implementors must be `Send + Sync` so they can be shared as
/// `&dyn ContentGenerator` across the retry loop and tests.
///
/// # Arguments
/// * `prompt`  – Rendered prompt text (template with `{fileName}` filled in).
/// * `payload` – Audio file bytes plus MIME type.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, payload: &AudioPayload)
        -> Result<String, GeminiError>;
}

// ---------------------------------------------------------------------------
// GeminiClient
// ---------------------------------------------------------------------------

/// Calls the Gemini `generateContent` endpoint.
///
/// Constructed once from [`GeminiConfig`] and passed by reference into the
/// generation flow; there is no global client handle.  The inner
/// `reqwest::Client` is pre-configured with the per-attempt timeout from
/// `config.timeout_secs`.
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
    api_key: String,
}

impl GeminiClient {
    /// Build a client from application config and the resolved API key.
    ///
    /// A default (no-timeout) client is used as a last-resort fallback if
    /// the builder fails (should never happen in practice).
    pub fn new(config: &GeminiConfig, api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
            api_key: api_key.into(),
        }
    }

    fn request_url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }

    fn request_body(&self, prompt: &str, payload: &AudioPayload) -> serde_json::Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [
                    { "text": prompt },
                    {
                        "inlineData": {
                            "mimeType": payload.mime_type,
                            "data": BASE64.encode(&payload.data)
                        }
                    }
                ]
            }],
            "generationConfig": {
                "temperature": self.config.temperature,
                "topK": self.config.top_k,
                "topP": self.config.top_p,
                "maxOutputTokens": self.config.max_output_tokens
            }
        })
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        payload: &AudioPayload,
    ) -> Result<String, GeminiError> {
        let url = self.request_url();
        let body = self.request_body(prompt, payload);

        log::debug!(
            "POST {} ({} audio bytes, mime {})",
            url,
            payload.data.len(),
            payload.mime_type
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;

        if !status.is_success() {
            // Prefer the message from the API's error envelope; fall back to
            // the raw body when it is not JSON.
            let message = serde_json::from_str::<ApiErrorResponse>(&raw)
                .map(|e| match e.error.status {
                    Some(code) => format!("{} ({})", e.error.message, code),
                    None => e.error.message,
                })
                .unwrap_or(raw);
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&raw).map_err(|e| GeminiError::Parse(e.to_string()))?;

        parsed.text().ok_or(GeminiError::EmptyResponse)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
