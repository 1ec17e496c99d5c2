//! Anthropic Messages API implementation of the completion trait.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{AdvisorError, Result};
use crate::traits::completion::CompletionService;
use crate::types::config::{BackendKind, CompletionOptions};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";

/// Anthropic Messages API backend.
#[derive(Clone)]
pub struct Anthropic {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<RequestMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl Anthropic {
    /// Create a new backend with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: BackendKind::Anthropic
                .default_model()
                .unwrap_or("claude-3-haiku-20240307")
                .to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set the model (default: claude-3-haiku-20240307).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for proxies, gateways).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn api_error(&self, status: u16, body: &str) -> AdvisorError {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| body.trim().to_string());
        AdvisorError::Api {
            backend: self.name().to_string(),
            message: format!("{} ({})", message, status),
        }
    }
}

/// Concatenated text blocks of a Messages API reply.
fn response_text(response: MessagesResponse) -> Option<String> {
    let text: String = response
        .content
        .into_iter()
        .filter(|block| block.block_type == "text")
        .filter_map(|block| block.text)
        .collect::<Vec<_>>()
        .join("");
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[async_trait]
impl CompletionService for Anthropic {
    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: options.max_output_tokens,
            temperature: options.temperature,
            messages: vec![RequestMessage {
                role: "user",
                content: prompt,
            }],
        };

        let start = std::time::Instant::now();
        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Anthropic request failed");
                AdvisorError::Completion(Box::new(e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Anthropic API error");
            return Err(self.api_error(status.as_u16(), &error_text));
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| AdvisorError::Completion(Box::new(e)))?;

        debug!(
            model = %self.model,
            duration_ms = start.elapsed().as_millis() as u64,
            stop_reason = body.stop_reason.as_deref().unwrap_or("unknown"),
            "Anthropic completion"
        );

        response_text(body).ok_or_else(|| AdvisorError::EmptyResponse {
            backend: self.name().to_string(),
        })
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let service = Anthropic::new("key")
            .with_model("claude-3-5-haiku-latest")
            .with_base_url("https://proxy.local/v1/");
        assert_eq!(service.model(), "claude-3-5-haiku-latest");
        assert_eq!(service.base_url, "https://proxy.local/v1");
    }

    #[test]
    fn test_default_model() {
        assert_eq!(Anthropic::new("key").model(), "claude-3-haiku-20240307");
    }

    #[test]
    fn test_request_body() {
        let request = MessagesRequest {
            model: "claude-3-haiku-20240307",
            max_tokens: 50,
            temperature: 0.3,
            messages: vec![RequestMessage {
                role: "user",
                content: "Classify this",
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["max_tokens"], 50);
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn test_response_text() {
        let response: MessagesResponse = serde_json::from_str(
            r#"{"content":[{"type":"text","text":" Comparison "},{"type":"tool_use","id":"x"}],"stop_reason":"end_turn"}"#,
        )
        .unwrap();
        assert_eq!(response_text(response), Some("Comparison".to_string()));

        let empty: MessagesResponse = serde_json::from_str(r#"{"content":[]}"#).unwrap();
        assert_eq!(response_text(empty), None);
    }

    #[test]
    fn test_api_error_message() {
        let err = Anthropic::new("key").api_error(
            401,
            r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#,
        );
        assert_eq!(err.to_string(), "anthropic API error: invalid x-api-key (401)");
    }
}
