//! The citation advisor entry point.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::pipeline::engine::{GenerativeEngine, RuleEngine};
use crate::pipeline::features::clean_text;
use crate::pipeline::format::format_recommendation;
use crate::pipeline::reconcile::GenerativeAdapter;
use crate::traits::completion::CompletionService;
use crate::traits::engine::RecommendationEngine;
use crate::types::config::{AdvisorConfig, AnalysisMode};
use crate::types::intent::NecessityLevel;
use crate::types::recommendation::Recommendation;

/// Turns a selected text span into a citation recommendation.
///
/// Always keeps a [`RuleEngine`]; a completion backend is optional and its
/// failures never reach the caller.
///
/// # Example
///
/// ```rust,ignore
/// use cite_advisor::CitationAdvisor;
///
/// let advisor = CitationAdvisor::rules_only();
/// let recommendation = advisor
///     .analyze("The transformer architecture was introduced in 2017.")
///     .await;
/// assert!(recommendation.needs_citation());
/// ```
#[derive(Clone)]
pub struct CitationAdvisor {
    config: AdvisorConfig,
    rules: RuleEngine,
    generative: Option<GenerativeEngine>,
}

impl CitationAdvisor {
    /// Create an advisor. `service` is consulted according to
    /// `config.mode`.
    pub fn new(config: AdvisorConfig, service: Option<Arc<dyn CompletionService>>) -> Self {
        let generative = service
            .map(|service| GenerativeEngine::new(GenerativeAdapter::new(service), config.strategy));

        Self {
            config,
            rules: RuleEngine::new(),
            generative,
        }
    }

    /// Advisor without a completion backend.
    pub fn rules_only() -> Self {
        Self::new(AdvisorConfig::default(), None)
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    pub fn has_backend(&self) -> bool {
        self.generative.is_some()
    }

    /// Analyze `text`.
    ///
    /// Empty or whitespace-only input yields [`Recommendation::no_text`].
    pub async fn analyze(&self, text: &str) -> Recommendation {
        let text = clean_text(text);
        if text.is_empty() {
            return Recommendation::no_text();
        }

        match self.config.mode {
            AnalysisMode::Rules => self.rules.evaluate(&text).await,
            AnalysisMode::Llm => match &self.generative {
                Some(engine) => self.with_fallback(engine, &text).await,
                None => {
                    warn!("LLM mode selected without a completion backend, using rules");
                    self.rules.evaluate(&text).await
                }
            },
            AnalysisMode::Hybrid => {
                let recommendation = self.rules.evaluate(&text).await;
                match &self.generative {
                    Some(engine) if recommendation.necessity == NecessityLevel::Optional => {
                        info!(engine = engine.name(), "Rule verdict is Optional, escalating");
                        self.try_engine(engine, &text).await.unwrap_or(recommendation)
                    }
                    _ => recommendation,
                }
            }
        }
    }

    /// Analyze `text` and render the display layout.
    pub async fn analyze_formatted(&self, text: &str) -> String {
        format_recommendation(&self.analyze(text).await)
    }

    /// Rule-only analysis, regardless of mode.
    pub async fn analyze_with_rules(&self, text: &str) -> Recommendation {
        let text = clean_text(text);
        if text.is_empty() {
            return Recommendation::no_text();
        }
        self.rules.evaluate(&text).await
    }

    async fn with_fallback(&self, engine: &GenerativeEngine, text: &str) -> Recommendation {
        match self.try_engine(engine, text).await {
            Some(recommendation) => recommendation,
            None => self.rules.evaluate(text).await,
        }
    }

    async fn try_engine(&self, engine: &GenerativeEngine, text: &str) -> Option<Recommendation> {
        match engine.recommend(text).await {
            Ok(recommendation) => {
                debug!(engine = engine.name(), "generative recommendation accepted");
                Some(recommendation)
            }
            Err(e) => {
                warn!(engine = engine.name(), error = %e, "Generative analysis failed, using rules");
                None
            }
        }
    }
}

impl Default for CitationAdvisor {
    fn default() -> Self {
        Self::rules_only()
    }
}
