//! OpenAI implementation of the completion trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use cite_advisor::ai::OpenAI;
//!
//! let service = OpenAI::new("sk-...").with_model("gpt-4o-mini");
//! let advisor = CitationAdvisor::new(config, Some(Arc::new(service)));
//! ```

use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient, OpenAIError};

use crate::error::{AdvisorError, Result};
use crate::traits::completion::CompletionService;
use crate::types::config::{BackendKind, CompletionOptions};

/// System message sent with every prompt.
pub const SYSTEM_PROMPT: &str = "You are a helpful research assistant.";

/// OpenAI chat-completions backend.
#[derive(Clone)]
pub struct OpenAI {
    client: OpenAIClient,
    model: String,
}

impl OpenAI {
    /// Create a new backend with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: OpenAIClient::new(api_key),
            model: BackendKind::OpenAI
                .default_model()
                .unwrap_or("gpt-3.5-turbo")
                .to_string(),
        }
    }

    /// Set the chat model (default: gpt-3.5-turbo).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.client = self.client.with_base_url(url);
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

impl From<OpenAIError> for AdvisorError {
    fn from(e: OpenAIError) -> Self {
        match e {
            OpenAIError::Api { status, message } => AdvisorError::Api {
                backend: "openai".to_string(),
                message: format!("{} ({})", message, status),
            },
            OpenAIError::Empty(_) => AdvisorError::EmptyResponse {
                backend: "openai".to_string(),
            },
            other => AdvisorError::Completion(Box::new(other)),
        }
    }
}

#[async_trait]
impl CompletionService for OpenAI {
    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String> {
        let request = ChatRequest::new(&self.model)
            .message(Message::system(SYSTEM_PROMPT))
            .message(Message::user(prompt))
            .temperature(options.temperature)
            .token_limit(options.max_output_tokens);

        let response = self.client.chat_completion(request).await?;
        Ok(response.content)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let service = OpenAI::new("sk-test").with_model("gpt-4o-mini");
        assert_eq!(service.model(), "gpt-4o-mini");
        assert_eq!(service.name(), "openai");
    }

    #[test]
    fn test_default_model() {
        assert_eq!(OpenAI::new("sk-test").model(), "gpt-3.5-turbo");
    }

    #[test]
    fn test_error_mapping() {
        let err: AdvisorError = OpenAIError::Api {
            status: 429,
            message: "rate limited".into(),
        }
        .into();
        assert_eq!(err.to_string(), "openai API error: rate limited (429)");

        let err: AdvisorError = OpenAIError::Network("timeout".into()).into();
        assert!(matches!(err, AdvisorError::Completion(_)));
    }
}
