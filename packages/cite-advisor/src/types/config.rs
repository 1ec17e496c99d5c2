//! Configuration types for the advisor and its completion backends.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AdvisorError;

/// Which classification path the advisor takes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Deterministic rules only, even if a backend is configured.
    #[default]
    Rules,

    /// Completion backend first, rules on failure.
    Llm,

    /// Rules first; escalate to the backend only for `Optional` verdicts.
    Hybrid,
}

impl AnalysisMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisMode::Rules => "rules",
            AnalysisMode::Llm => "llm",
            AnalysisMode::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisMode {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rules" | "rule" => Ok(AnalysisMode::Rules),
            "llm" => Ok(AnalysisMode::Llm),
            "hybrid" => Ok(AnalysisMode::Hybrid),
            other => Err(AdvisorError::config(format!(
                "unknown analysis mode '{}' (expected rules, llm or hybrid)",
                other
            ))),
        }
    }
}

/// How the generative engine uses the completion backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStrategy {
    /// One full-analysis prompt; any failure falls back to the rule pipeline.
    #[default]
    Combined,

    /// One prompt per stage, each stage falling back to its rule counterpart.
    Staged,
}

impl FromStr for GenerationStrategy {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "combined" => Ok(GenerationStrategy::Combined),
            "staged" => Ok(GenerationStrategy::Staged),
            other => Err(AdvisorError::config(format!(
                "unknown generation strategy '{}' (expected combined or staged)",
                other
            ))),
        }
    }
}

/// Completion backend selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    None,
    OpenAI,
    Anthropic,
}

impl BackendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BackendKind::None => "none",
            BackendKind::OpenAI => "openai",
            BackendKind::Anthropic => "anthropic",
        }
    }

    /// Environment variable holding this backend's credential.
    pub fn api_key_env(self) -> Option<&'static str> {
        match self {
            BackendKind::None => None,
            BackendKind::OpenAI => Some("OPENAI_API_KEY"),
            BackendKind::Anthropic => Some("ANTHROPIC_API_KEY"),
        }
    }

    /// Model used when none is configured.
    pub fn default_model(self) -> Option<&'static str> {
        match self {
            BackendKind::None => None,
            BackendKind::OpenAI => Some("gpt-3.5-turbo"),
            BackendKind::Anthropic => Some("claude-3-haiku-20240307"),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(BackendKind::None),
            "openai" => Ok(BackendKind::OpenAI),
            "anthropic" | "claude" => Ok(BackendKind::Anthropic),
            other => Err(AdvisorError::config(format!(
                "unknown backend '{}' (expected none, openai or anthropic)",
                other
            ))),
        }
    }
}

/// Settings for building a completion backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    pub kind: BackendKind,

    /// Credential; required for every backend except `None`.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Model identifier (backend default when unset)
    #[serde(default)]
    pub model: Option<String>,

    /// Custom base URL (proxies, compatible gateways)
    #[serde(default)]
    pub base_url: Option<String>,
}

impl BackendConfig {
    pub fn new(kind: BackendKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Configured model, or the backend default.
    pub fn model_or_default(&self) -> Option<String> {
        self.model
            .clone()
            .or_else(|| self.kind.default_model().map(str::to_string))
    }
}

/// Advisory generation options passed to a completion backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_output_tokens: 500,
        }
    }
}

impl CompletionOptions {
    /// Options for the combined analysis prompt.
    pub fn analysis() -> Self {
        Self::default()
    }

    /// Options for the intent-only prompt.
    pub fn intent() -> Self {
        Self::default().with_max_output_tokens(50)
    }

    /// Options for the citation-type planning prompt.
    pub fn planning() -> Self {
        Self::default().with_max_output_tokens(200)
    }

    /// Options for the keyword prompt.
    pub fn keywords() -> Self {
        Self::default().with_max_output_tokens(150)
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }
}

/// Configuration for [`crate::CitationAdvisor`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Classification path.
    ///
    /// Default: rules.
    #[serde(default)]
    pub mode: AnalysisMode,

    /// How the completion backend is prompted.
    ///
    /// Default: combined.
    #[serde(default)]
    pub strategy: GenerationStrategy,
}

impl AdvisorConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: AnalysisMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_strategy(mut self, strategy: GenerationStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("rules".parse::<AnalysisMode>().unwrap(), AnalysisMode::Rules);
        assert_eq!("LLM".parse::<AnalysisMode>().unwrap(), AnalysisMode::Llm);
        assert_eq!(" hybrid ".parse::<AnalysisMode>().unwrap(), AnalysisMode::Hybrid);

        let err = "smart".parse::<AnalysisMode>().unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!("".parse::<BackendKind>().unwrap(), BackendKind::None);
        assert_eq!("OpenAI".parse::<BackendKind>().unwrap(), BackendKind::OpenAI);
        assert_eq!("claude".parse::<BackendKind>().unwrap(), BackendKind::Anthropic);
        assert!("gemini".parse::<BackendKind>().is_err());
    }

    #[test]
    fn test_backend_defaults() {
        let config = BackendConfig::new(BackendKind::Anthropic);
        assert_eq!(
            config.model_or_default().as_deref(),
            Some("claude-3-haiku-20240307")
        );

        let config = BackendConfig::new(BackendKind::OpenAI).with_model("gpt-4o");
        assert_eq!(config.model_or_default().as_deref(), Some("gpt-4o"));

        assert_eq!(BackendConfig::default().model_or_default(), None);
    }

    #[test]
    fn test_completion_option_presets() {
        assert_eq!(CompletionOptions::analysis().max_output_tokens, 500);
        assert_eq!(CompletionOptions::intent().max_output_tokens, 50);
        assert_eq!(CompletionOptions::planning().max_output_tokens, 200);
        assert_eq!(CompletionOptions::keywords().max_output_tokens, 150);
        assert_eq!(CompletionOptions::keywords().temperature, 0.3);
    }

    #[test]
    fn test_advisor_config_builder() {
        let config = AdvisorConfig::new()
            .with_mode(AnalysisMode::Hybrid)
            .with_strategy(GenerationStrategy::Staged);
        assert_eq!(config.mode, AnalysisMode::Hybrid);
        assert_eq!(config.strategy, GenerationStrategy::Staged);
    }
}
