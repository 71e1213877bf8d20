//! Feedback-fetch collaborator.
//!
//! Wraps the single outbound call to the multimodal critique endpoint.
//! The client validates its input before any network traffic, retries only
//! rate-limit and server-error responses with exponential backoff, enforces
//! a request timeout, and always resolves to a tagged [`Feedback`] outcome;
//! callers never see a transport error.

use std::time::Duration;

use base64::Engine;
use regex::Regex;
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::model::Feedback;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const MAX_ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(1);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const CRITIQUE_PROMPT: &str = "\
You are a professional art tutor.

1. Analyze the uploaded drawing and identify the art style (e.g., realism, anime, abstract, sketch, cartoon, impressionism, etc.).

2. Based on the identified art style, provide constructive and actionable suggestions to improve the artwork.

3. Structure your feedback using the following format:

# Art Style
[Detected art style with a short explanation]

# Overall Feedback
[A high-level summary of strengths and areas to improve]

## Composition
- [Point 1]
- [Point 2]

## Anatomy / Proportion / Perspective (only if relevant)
- [Point 1]
- [Point 2]

## Line Work / Detailing
- [Point 1]
- [Point 2]

## Coloring / Shading / Lighting
- [Point 1]
- [Point 2]

## Creativity & Expression
- [Point 1]
- [Point 2]

# Suggested Next Steps
[A concise checklist or guidance for improving the drawing]

Make sure your feedback is relevant to the detected art style and written in a supportive, mentor-like tone.";

/// Fetch configuration.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// API key for the critique endpoint.
    pub api_key: String,

    /// Endpoint base URL.
    pub base_url: String,

    /// Model identifier.
    pub model: String,
}

impl FetchConfig {
    /// Resolve configuration from the environment.
    ///
    /// Reads `CRITIQ_API_KEY` (required) and `CRITIQ_BASE_URL` /
    /// `CRITIQ_MODEL` (optional overrides).
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("CRITIQ_API_KEY")
            .map_err(|_| Error::Config("CRITIQ_API_KEY is not set".to_string()))?;
        let base_url =
            std::env::var("CRITIQ_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("CRITIQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            api_key,
            base_url,
            model,
        })
    }

    /// Create a configuration with an explicit key and defaults elsewhere.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

/// Critique-fetch client.
pub struct FeedbackClient {
    config: FetchConfig,
    http: reqwest::Client,
}

impl FeedbackClient {
    /// Create a client; the request timeout is baked into the HTTP client.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;
        Ok(Self { config, http })
    }

    /// Request a critique for base64-encoded artwork.
    ///
    /// A `data:image/...;base64,` prefix is tolerated and stripped. The
    /// returned outcome is the only signal: validation problems, exhausted
    /// retries, and timeouts all surface as [`Feedback::Failure`] with a
    /// user-facing message.
    pub async fn fetch(&self, image_base64: &str) -> Feedback {
        if image_base64.is_empty() {
            return Feedback::failure("No image provided. Please upload a valid image.");
        }

        let data = strip_data_uri(image_base64);
        if !is_plausible_base64(data) {
            return Feedback::failure(
                "Invalid image format. Please ensure the image is base64-encoded.",
            );
        }

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        );
        let body = request_body(data);

        for attempt in 1..=MAX_ATTEMPTS {
            let response = match self.http.post(&url).json(&body).send().await {
                Ok(response) => response,
                Err(err) if err.is_timeout() => {
                    log::warn!("critique request timed out (attempt {attempt}/{MAX_ATTEMPTS})");
                    if attempt == MAX_ATTEMPTS {
                        return Feedback::failure("Request timed out. Please try again.");
                    }
                    tokio::time::sleep(retry_delay(attempt)).await;
                    continue;
                }
                Err(err) => {
                    log::warn!("critique request failed: {err}");
                    if attempt == MAX_ATTEMPTS {
                        return Feedback::failure(
                            "Unable to reach the critique service. Please try again later.",
                        );
                    }
                    tokio::time::sleep(retry_delay(attempt)).await;
                    continue;
                }
            };

            let status = response.status();
            if status.as_u16() == 429 {
                if attempt < MAX_ATTEMPTS {
                    tokio::time::sleep(retry_delay(attempt)).await;
                    continue;
                }
                return Feedback::failure("Too many requests. Please try again later.");
            }
            if status.is_server_error() {
                if attempt < MAX_ATTEMPTS {
                    tokio::time::sleep(retry_delay(attempt)).await;
                    continue;
                }
                return Feedback::failure("Server error occurred. Please try again later.");
            }
            if !status.is_success() {
                // Client-class errors are terminal; never retried.
                let message = response
                    .json::<Value>()
                    .await
                    .ok()
                    .and_then(|v| {
                        v.pointer("/error/message")
                            .and_then(Value::as_str)
                            .map(str::to_string)
                    })
                    .unwrap_or_else(|| format!("API error: {}", status.as_u16()));
                return Feedback::failure(message);
            }

            let payload: Value = match response.json().await {
                Ok(payload) => payload,
                Err(err) => {
                    log::warn!("critique response was not valid JSON: {err}");
                    return Feedback::failure(
                        "No valid feedback received from the service. Please try again.",
                    );
                }
            };

            return match extract_text(&payload) {
                Some(text) => Feedback::success(text),
                None => Feedback::failure(
                    "No valid feedback received from the service. Please try again.",
                ),
            };
        }

        Feedback::failure("Unable to process the request. Please try again later.")
    }
}

/// Encode raw image bytes for [`FeedbackClient::fetch`].
pub fn encode_image(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

fn request_body(image_base64: &str) -> Value {
    json!({
        "contents": [{
            "parts": [
                {
                    "inlineData": {
                        "mimeType": "image/jpeg",
                        "data": image_base64,
                    }
                },
                { "text": CRITIQUE_PROMPT },
            ]
        }]
    })
}

fn extract_text(payload: &Value) -> Option<String> {
    let text = payload
        .pointer("/candidates/0/content/parts/0/text")?
        .as_str()?;
    if text.trim().is_empty() {
        return None;
    }
    Some(text.to_string())
}

fn strip_data_uri(data: &str) -> &str {
    let prefix = Regex::new(r"^data:image/[a-zA-Z]+;base64,").unwrap();
    match prefix.find(data) {
        Some(m) => &data[m.end()..],
        None => data,
    }
}

fn is_plausible_base64(data: &str) -> bool {
    !data.is_empty()
        && data
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '=' | '\r' | '\n'))
}

fn retry_delay(attempt: u32) -> Duration {
    RETRY_DELAY * 2u32.pow(attempt.saturating_sub(1))
}
