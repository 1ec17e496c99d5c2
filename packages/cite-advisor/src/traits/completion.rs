//! Completion trait for generative text backends.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::config::CompletionOptions;

/// A generative text backend: prompt in, completion out.
///
/// Implementations wrap specific providers (OpenAI, Anthropic, etc.).
/// Options are advisory; a backend may ignore what it does not support.
/// Transport and auth failures are returned as errors; callers inside the
/// pipeline catch them and fall back to rules.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Complete a single prompt.
    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String>;

    /// Short backend name for logs.
    fn name(&self) -> &str {
        "completion"
    }
}
