//! The language-model capability and its Gemini implementation.

use crate::api::{
    endpoint_url, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
};
use async_trait::async_trait;
use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub prompt: String,
    pub system_instruction: Option<String>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug)]
pub enum ModelError {
    /// The request never produced an HTTP response.
    Transport(reqwest::Error),
    /// The API answered with a non-success status.
    Status { status: u16, summary: String },
    /// The body could not be decoded or held no text.
    Malformed(String),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::Transport(source) => write!(f, "request failed: {source}"),
            ModelError::Status { status, summary } if summary.is_empty() => {
                write!(f, "HTTP {status}")
            }
            ModelError::Status { status, summary } => write!(f, "HTTP {status}: {summary}"),
            ModelError::Malformed(detail) => write!(f, "malformed response: {detail}"),
        }
    }
}

impl StdError for ModelError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ModelError::Transport(source) => Some(source),
            _ => None,
        }
    }
}

#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> Result<String, ModelError>;
}

/// Pull a one-line summary out of an API error body.
pub fn summarize_error_body(body: &str) -> String {
    let trimmed = body.trim();
    let summary = serde_json::from_str::<serde_json::Value>(trimmed)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(|v| v.as_str())
                .or_else(|| value.get("error").and_then(|v| v.as_str()))
                .or_else(|| value.get("message").and_then(|v| v.as_str()))
                .map(str::to_owned)
        })
        .unwrap_or_else(|| trimmed.to_string());

    summary.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ModelError::Transport)?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    /// Build a client from `GEMINI_API_KEY`, or `None` when it is unset.
    pub fn from_env(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Option<Result<Self, ModelError>> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())?;
        Some(Self::new(base_url, model, api_key, timeout))
    }

    fn generate_url(&self) -> String {
        endpoint_url(
            &self.base_url,
            &format!("models/{}:generateContent", self.model),
        )
    }
}

#[async_trait]
impl ModelBackend for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<String, ModelError> {
        let body = GenerateContentRequest {
            contents: vec![Content::text(Some("user"), request.prompt)],
            system_instruction: request
                .system_instruction
                .map(|instruction| Content::text(None, instruction)),
            generation_config: request.max_tokens.map(|max| GenerationConfig {
                max_output_tokens: Some(max),
            }),
        };

        debug!(model = %self.model, "Sending generateContent request");
        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(ModelError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(ModelError::Status {
                status: status.as_u16(),
                summary: summarize_error_body(&error_text),
            });
        }

        let text = response.text().await.map_err(ModelError::Transport)?;
        let parsed: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|err| ModelError::Malformed(err.to_string()))?;
        parsed
            .first_text()
            .ok_or_else(|| ModelError::Malformed("no text in response".to_string()))
    }
}
