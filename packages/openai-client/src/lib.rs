//! Minimal OpenAI chat-completions client
//!
//! A small REST client with no domain-specific logic. Only the
//! `/chat/completions` endpoint is covered.
//!
//! # Example
//!
//! ```rust,ignore
//! use openai_client::{ChatRequest, Message, OpenAIClient};
//!
//! let client = OpenAIClient::new("sk-...");
//!
//! let response = client
//!     .chat_completion(
//!         ChatRequest::new("gpt-3.5-turbo")
//!             .message(Message::user("Hello!"))
//!             .temperature(0.3),
//!     )
//!     .await?;
//! println!("{}", response.content);
//! ```

pub mod error;
pub mod types;

pub use error::{OpenAIError, Result};
pub use types::*;

use reqwest::Client;
use tracing::{debug, warn};

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI chat-completions client.
#[derive(Clone)]
pub struct OpenAIClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIClient {
    /// Create a new OpenAI client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (for Azure, proxies, compatible gateways).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Chat completion.
    ///
    /// Send messages to the chat completion API and get the first choice back.
    pub async fn chat_completion(&self, request: ChatRequest) -> Result<ChatResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "OpenAI request failed");
                OpenAIError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "OpenAI API error");
            return Err(api_error(status.as_u16(), &error_text));
        }

        let raw: types::ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| OpenAIError::Parse(e.to_string()))?;

        let chat_response = parse_chat_response(raw)?;

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis() as u64,
            finish_reason = chat_response.finish_reason.as_deref().unwrap_or("unknown"),
            "OpenAI chat completion"
        );

        Ok(chat_response)
    }
}

/// Build an API error, preferring the message from the JSON error body.
fn api_error(status: u16, body: &str) -> OpenAIError {
    let message = serde_json::from_str::<types::ApiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.trim().to_string());
    OpenAIError::Api { status, message }
}

/// First non-empty choice of a raw response.
fn parse_chat_response(raw: types::ChatResponseRaw) -> Result<ChatResponse> {
    let choice = raw
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| OpenAIError::Empty("no choices returned".into()))?;

    let content = choice
        .message
        .content
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or_else(|| OpenAIError::Empty("choice has no content".into()))?;

    Ok(ChatResponse {
        content,
        finish_reason: choice.finish_reason,
        usage: raw.usage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> types::ChatResponseRaw {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_client_builder() {
        let client = OpenAIClient::new("sk-test").with_base_url("https://custom.api.com/v1/");

        assert_eq!(client.api_key, "sk-test");
        assert_eq!(client.base_url, "https://custom.api.com/v1");
    }

    #[test]
    fn test_default_base_url() {
        assert_eq!(OpenAIClient::new("sk-test").base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_parse_chat_response() {
        let response = parse_chat_response(raw(
            r#"{"choices":[{"message":{"content":"  Yes \n"},"finish_reason":"stop"}],
                "usage":{"prompt_tokens":10,"completion_tokens":2,"total_tokens":12}}"#,
        ))
        .unwrap();

        assert_eq!(response.content, "Yes");
        assert_eq!(response.finish_reason.as_deref(), Some("stop"));
        assert_eq!(response.usage.map(|u| u.total_tokens), Some(12));
    }

    #[test]
    fn test_parse_empty_choices() {
        let err = parse_chat_response(raw(r#"{"choices":[]}"#)).unwrap_err();
        assert!(matches!(err, OpenAIError::Empty(_)));

        let err = parse_chat_response(raw(r#"{"choices":[{"message":{"content":"   "}}]}"#))
            .unwrap_err();
        assert!(matches!(err, OpenAIError::Empty(_)));
    }

    #[test]
    fn test_api_error_message() {
        let err = api_error(401, r#"{"error":{"message":"Incorrect API key provided"}}"#);
        assert_eq!(err.to_string(), "API error (401): Incorrect API key provided");

        let err = api_error(502, "Bad Gateway\n");
        assert_eq!(err.to_string(), "API error (502): Bad Gateway");
    }
}
