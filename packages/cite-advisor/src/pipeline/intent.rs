//! Citation intent classification.
//!
//! Rules are an ordered cascade over [`FeatureSet`] flags; the first entry
//! whose predicate holds decides the intent. A completion backend, when
//! configured, replaces the cascade and falls back to it on failure.

use tracing::{debug, warn};

use crate::pipeline::reconcile::GenerativeAdapter;
use crate::pipeline::taxonomy::{contains_any, COMMON_KNOWLEDGE_PATTERNS};
use crate::types::features::FeatureSet;
use crate::types::intent::{Intent, IntentResult};

/// One entry of the classification cascade.
#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    pub name: &'static str,
    pub predicate: fn(&FeatureSet) -> bool,
    pub intent: Intent,
    pub confidence: f32,
}

fn is_common_knowledge(f: &FeatureSet) -> bool {
    contains_any(&f.text.to_lowercase(), COMMON_KNOWLEDGE_PATTERNS)
}

/// The cascade, highest priority first. The last entry always matches.
pub const INTENT_CASCADE: &[IntentRule] = &[
    IntentRule {
        name: "common_knowledge",
        predicate: is_common_knowledge,
        intent: Intent::CommonKnowledge,
        confidence: 0.85,
    },
    IntentRule {
        name: "foundational",
        predicate: |f| f.has_foundational_keywords,
        intent: Intent::FoundationalWork,
        confidence: 0.9,
    },
    IntentRule {
        name: "survey",
        predicate: |f| f.has_survey_keywords,
        intent: Intent::SurveyReview,
        confidence: 0.85,
    },
    IntentRule {
        name: "comparison",
        predicate: |f| f.has_comparison_keywords,
        intent: Intent::Comparison,
        confidence: 0.9,
    },
    IntentRule {
        name: "recent_method",
        predicate: |f| f.has_method_keywords && f.has_temporal_keywords,
        intent: Intent::RecentAdvance,
        confidence: 0.85,
    },
    IntentRule {
        name: "method",
        predicate: |f| f.has_method_keywords,
        intent: Intent::MethodTechnique,
        confidence: 0.85,
    },
    IntentRule {
        name: "theoretical",
        predicate: |f| f.has_theoretical_keywords,
        intent: Intent::TheoreticalClaim,
        confidence: 0.8,
    },
    IntentRule {
        name: "statistical",
        predicate: |f| f.has_statistical_keywords,
        intent: Intent::FactualClaim,
        confidence: 0.85,
    },
    IntentRule {
        name: "factual",
        predicate: |f| f.has_factual_keywords,
        intent: Intent::FactualClaim,
        confidence: 0.8,
    },
    IntentRule {
        name: "temporal",
        predicate: |f| f.has_temporal_keywords,
        intent: Intent::RecentAdvance,
        confidence: 0.75,
    },
    IntentRule {
        name: "default",
        predicate: |_| true,
        intent: Intent::Unknown,
        confidence: 0.5,
    },
];

/// Classify by the rule cascade. Pure and deterministic.
pub fn classify_features(features: &FeatureSet) -> IntentResult {
    INTENT_CASCADE
        .iter()
        .find(|rule| (rule.predicate)(features))
        .map(|rule| {
            debug!(rule = rule.name, intent = %rule.intent, "intent rule matched");
            IntentResult::new(rule.intent, rule.confidence)
        })
        .unwrap_or_else(|| IntentResult::new(Intent::Unknown, 0.5))
}

/// Classifies citation intent, by rules or through a completion backend.
#[derive(Clone, Default)]
pub struct IntentClassifier {
    adapter: Option<GenerativeAdapter>,
}

impl IntentClassifier {
    /// Rule-only classifier.
    pub fn rules() -> Self {
        Self::default()
    }

    pub fn with_adapter(adapter: GenerativeAdapter) -> Self {
        Self {
            adapter: Some(adapter),
        }
    }

    /// Classify the text behind `features`.
    ///
    /// Backend failures fall back to the cascade.
    pub async fn classify(&self, features: &FeatureSet) -> IntentResult {
        if let Some(adapter) = &self.adapter {
            match adapter.classify_intent(&features.text).await {
                Ok(result) => return result,
                Err(e) => warn!(
                    backend = adapter.backend_name(),
                    error = %e,
                    "Intent classification failed, using rules"
                ),
            }
        }
        classify_features(features)
    }
}
