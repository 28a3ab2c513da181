//! Blocking client for the Gemini `generateContent` endpoint.

use base64::Engine;
use letmecook_core::analysis::{GenerateRequest, ModelError, VisionModel};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::ModelConfig;

/// A `VisionModel` backed by the Gemini REST API
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &ModelConfig, api_key: String) -> Result<Self, ModelError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ModelError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            url: generate_url(config),
            api_key,
        })
    }
}

impl VisionModel for GeminiClient {
    fn generate(&self, request: &GenerateRequest<'_>) -> Result<String, ModelError> {
        tracing::debug!(
            url = %self.url,
            prompt_bytes = request.prompt.len(),
            image_bytes = request.image.map(|img| img.data.len()).unwrap_or(0),
            "Calling vision model"
        );

        // The key travels in the query string; strip URLs from transport errors.
        let response = self
            .http
            .post(&self.url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body(request))
            .send()
            .map_err(|e| ModelError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| ModelError::Transport(e.without_url().to_string()))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Vision model request failed");
            return Err(ModelError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response_text(&body)
    }
}

fn generate_url(config: &ModelConfig) -> String {
    format!(
        "{}/models/{}:generateContent",
        config.endpoint.trim_end_matches('/'),
        config.model
    )
}

/// JSON body with the prompt first and the image, if any, inline after it
fn request_body(request: &GenerateRequest<'_>) -> Value {
    let mut parts = vec![json!({ "text": request.prompt })];
    if let Some(image) = request.image {
        parts.push(json!({
            "inline_data": {
                "mime_type": image.mime_type,
                "data": base64::engine::general_purpose::STANDARD.encode(image.data),
            }
        }));
    }
    json!({ "contents": [{ "parts": parts }] })
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Concatenated text of the first candidate
fn response_text(body: &str) -> Result<String, ModelError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| ModelError::InvalidResponse(e.to_string()))?;

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ModelError::InvalidResponse("response has no candidates".to_string()))?;

    Ok(candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default())
}
