//! Recommendation engines.
//!
//! [`RuleEngine`] runs the staged pipeline on rules alone and never fails.
//! [`GenerativeEngine`] asks a completion backend, either in one combined
//! call or stage by stage.

use std::time::Instant;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{AdvisorError, Result};
use crate::pipeline::features::extract_features;
use crate::pipeline::intent::IntentClassifier;
use crate::pipeline::keywords::KeywordGenerator;
use crate::pipeline::planner::CitationTypePlanner;
use crate::pipeline::reconcile::GenerativeAdapter;
use crate::traits::engine::RecommendationEngine;
use crate::types::config::GenerationStrategy;
use crate::types::intent::{Intent, NecessityLevel};
use crate::types::recommendation::Recommendation;

/// One-line explanation for a rule verdict.
pub fn rule_reason(intent: Intent) -> &'static str {
    match intent {
        Intent::CommonKnowledge => {
            "This is a common-knowledge statement and usually does not need a citation"
        }
        Intent::MethodTechnique => {
            "Mentions a specific method or technique; cite the work that introduced it"
        }
        Intent::Comparison => "Makes a comparison or evaluation; cite the works being compared",
        Intent::FactualClaim => "States a factual claim; cite research that supports it",
        Intent::TheoreticalClaim => "States a theoretical claim; cite the work that established it",
        Intent::SurveyReview => "Refers to a body of prior work; cite a relevant survey or review",
        Intent::FoundationalWork => "Refers to foundational work; cite the original publication",
        Intent::RecentAdvance => "Refers to recent progress; cite the relevant recent research",
        Intent::Unknown => "Check whether this statement needs support from related research",
    }
}

/// Classification, planning and keyword stages run in sequence.
#[derive(Clone, Default)]
pub struct StagedPipeline {
    classifier: IntentClassifier,
    planner: CitationTypePlanner,
    keywords: KeywordGenerator,
}

impl StagedPipeline {
    /// All stages on rules.
    pub fn rules() -> Self {
        Self::default()
    }

    /// All stages through `adapter`, each falling back to rules.
    pub fn generative(adapter: GenerativeAdapter) -> Self {
        Self {
            classifier: IntentClassifier::with_adapter(adapter.clone()),
            planner: CitationTypePlanner::with_adapter(adapter.clone()),
            keywords: KeywordGenerator::with_adapter(adapter),
        }
    }

    /// Run every stage on normalized, non-empty `text`.
    pub async fn run(&self, text: &str) -> Recommendation {
        let start = Instant::now();
        let features = extract_features(text);
        let intent = self.classifier.classify(&features).await;

        let (citation_types, keywords) = if intent.necessity == NecessityLevel::No {
            (Vec::new(), Vec::new())
        } else {
            let citation_types = self.planner.plan(&features.text, &intent).await;
            let keywords = self.keywords.generate(&features.text, &citation_types).await;
            (citation_types, keywords)
        };

        debug!(
            intent = %intent.intent,
            necessity = %intent.necessity,
            elapsed_us = start.elapsed().as_micros() as u64,
            "staged pipeline finished"
        );

        Recommendation::new(
            intent.necessity,
            intent.intent,
            rule_reason(intent.intent),
            citation_types,
            keywords,
        )
    }
}

/// Rule-only engine. Never fails.
#[derive(Clone, Default)]
pub struct RuleEngine {
    pipeline: StagedPipeline,
}

impl RuleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Infallible form of [`RecommendationEngine::recommend`].
    pub async fn evaluate(&self, text: &str) -> Recommendation {
        self.pipeline.run(text).await
    }
}

#[async_trait]
impl RecommendationEngine for RuleEngine {
    async fn recommend(&self, text: &str) -> Result<Recommendation> {
        Ok(self.evaluate(text).await)
    }

    fn name(&self) -> &'static str {
        "rules"
    }
}

/// Engine backed by a completion service.
#[derive(Clone)]
pub struct GenerativeEngine {
    adapter: GenerativeAdapter,
    strategy: GenerationStrategy,
    staged: StagedPipeline,
}

impl GenerativeEngine {
    pub fn new(adapter: GenerativeAdapter, strategy: GenerationStrategy) -> Self {
        Self {
            staged: StagedPipeline::generative(adapter.clone()),
            adapter,
            strategy,
        }
    }

    pub fn strategy(&self) -> GenerationStrategy {
        self.strategy
    }

    async fn recommend_combined(&self, text: &str) -> Result<Recommendation> {
        let analysis = self.adapter.analyze(text).await;
        if let Some(error) = analysis.error {
            return Err(AdvisorError::Completion(error.into()));
        }

        Ok(Recommendation::new(
            analysis.necessity,
            analysis.intent,
            analysis.reason,
            analysis.citation_types,
            analysis.keywords,
        ))
    }
}

#[async_trait]
impl RecommendationEngine for GenerativeEngine {
    /// Combined strategy fails when the backend call fails. Staged strategy
    /// absorbs failures stage by stage and never fails.
    async fn recommend(&self, text: &str) -> Result<Recommendation> {
        match self.strategy {
            GenerationStrategy::Combined => self.recommend_combined(text).await,
            GenerationStrategy::Staged => Ok(self.staged.run(text).await),
        }
    }

    fn name(&self) -> &'static str {
        match self.strategy {
            GenerationStrategy::Combined => "generative-combined",
            GenerationStrategy::Staged => "generative-staged",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rule_engine_comparison() {
        let engine = RuleEngine::new();
        let recommendation = engine
            .recommend("Our method outperforms previous approaches by 5% on the benchmark dataset.")
            .await
            .unwrap();

        assert_eq!(recommendation.intent, Intent::Comparison);
        assert_eq!(recommendation.necessity, NecessityLevel::Yes);
        assert_eq!(
            recommendation.citation_types[0],
            "Benchmark studies comparing different approaches"
        );
        assert_eq!(recommendation.reason, rule_reason(Intent::Comparison));
        assert!(!recommendation.keywords.is_empty());
    }

    #[tokio::test]
    async fn test_rule_engine_common_knowledge_has_empty_lists() {
        let recommendation = RuleEngine::new()
            .evaluate("It is well known that water boils at 100 degrees Celsius.")
            .await;

        assert_eq!(recommendation.intent, Intent::CommonKnowledge);
        assert_eq!(recommendation.necessity, NecessityLevel::No);
        assert!(recommendation.citation_types.is_empty());
        assert!(recommendation.keywords.is_empty());
    }

    #[test]
    fn test_every_intent_has_a_reason() {
        for intent in Intent::ALL {
            assert!(!rule_reason(intent).is_empty());
        }
    }
}
