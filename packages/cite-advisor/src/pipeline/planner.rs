//! Citation-type planning.

use tracing::{debug, warn};

use crate::pipeline::reconcile::GenerativeAdapter;
use crate::pipeline::taxonomy::{GENERIC_METHOD_TYPES, METHOD_DOMAINS};
use crate::types::intent::{Intent, IntentResult, NecessityLevel};

const FOUNDATIONAL_TYPES: &[&str] = &[
    "The original/foundational paper introducing this concept",
    "Seminal works establishing the theoretical foundation",
];

const COMPARISON_TYPES: &[&str] = &[
    "Benchmark studies comparing different approaches",
    "Comparative evaluations of existing methods",
    "Performance analysis studies",
];

const CLAIM_TYPES: &[&str] = &[
    "Empirical studies demonstrating this claim",
    "Theoretical works supporting this statement",
    "Recent research validating this finding",
];

const SURVEY_TYPES: &[&str] = &[
    "Comprehensive surveys on this topic",
    "Recent review papers",
    "State-of-the-art overviews",
];

const RECENT_TYPES: &[&str] = &[
    "Recent advances in this area",
    "State-of-the-art methods",
    "Latest research developments",
];

const RELATED_TYPES: &[&str] = &[
    "Related works on this topic",
    "Relevant research in this area",
];

fn method_types(lowered: &str) -> &'static [&'static str] {
    METHOD_DOMAINS
        .iter()
        .find(|domain| domain.matches(lowered))
        .map(|domain| {
            debug!(domain = domain.name, "method domain matched");
            domain.citation_types
        })
        .unwrap_or(GENERIC_METHOD_TYPES)
}

/// Rule-based citation-type template for `intent`.
pub fn plan_with_rules(text: &str, intent: Intent) -> Vec<String> {
    let template: &[&str] = match intent {
        Intent::CommonKnowledge => &[],
        Intent::FoundationalWork => FOUNDATIONAL_TYPES,
        Intent::MethodTechnique => method_types(&text.to_lowercase()),
        Intent::Comparison => COMPARISON_TYPES,
        Intent::FactualClaim | Intent::TheoreticalClaim => CLAIM_TYPES,
        Intent::SurveyReview => SURVEY_TYPES,
        Intent::RecentAdvance => RECENT_TYPES,
        Intent::Unknown => RELATED_TYPES,
    };
    template.iter().map(|t| t.to_string()).collect()
}

/// Plans which kinds of work to cite, by rules or through a completion
/// backend.
#[derive(Clone, Default)]
pub struct CitationTypePlanner {
    adapter: Option<GenerativeAdapter>,
}

impl CitationTypePlanner {
    /// Rule-only planner.
    pub fn rules() -> Self {
        Self::default()
    }

    pub fn with_adapter(adapter: GenerativeAdapter) -> Self {
        Self {
            adapter: Some(adapter),
        }
    }

    /// Citation types for `text`, most relevant first.
    ///
    /// Empty when no citation is needed. Backend failures fall back to the
    /// rule template.
    pub async fn plan(&self, text: &str, intent: &IntentResult) -> Vec<String> {
        if intent.necessity == NecessityLevel::No || intent.intent == Intent::CommonKnowledge {
            return Vec::new();
        }

        if let Some(adapter) = &self.adapter {
            match adapter.plan_citation_types(text, intent.intent).await {
                Ok(types) => return types,
                Err(e) => warn!(
                    backend = adapter.backend_name(),
                    error = %e,
                    "Citation type planning failed, using rules"
                ),
            }
        }
        plan_with_rules(text, intent.intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_template_leads_with_benchmarks() {
        let types = plan_with_rules("anything", Intent::Comparison);
        assert_eq!(types[0], "Benchmark studies comparing different approaches");
        assert_eq!(types.len(), 3);
    }

    #[test]
    fn test_claims_share_template() {
        assert_eq!(
            plan_with_rules("x", Intent::FactualClaim),
            plan_with_rules("x", Intent::TheoreticalClaim)
        );
    }

    #[test]
    fn test_method_domains() {
        let types = plan_with_rules("We train a CNN on images.", Intent::MethodTechnique);
        assert_eq!(types[0], "Foundational works on deep learning and neural networks");

        let types = plan_with_rules("We tune it with Adam.", Intent::MethodTechnique);
        assert_eq!(types[0], "Foundational works on optimization algorithms");

        let types = plan_with_rules("An RL agent learns a policy.", Intent::MethodTechnique);
        assert_eq!(types[0], "Foundational works on reinforcement learning");

        let types = plan_with_rules("A new language model.", Intent::MethodTechnique);
        assert_eq!(types[0], "Foundational works on natural language processing");
    }

    #[test]
    fn test_short_trigger_matches_as_substring() {
        // "world" contains "rl".
        let types = plan_with_rules("A world model approach.", Intent::MethodTechnique);
        assert_eq!(types[0], "Foundational works on reinforcement learning");

        let types = plan_with_rules("A simple approach.", Intent::MethodTechnique);
        assert_eq!(types[0], "Foundational works on the method/technique");
    }

    #[test]
    fn test_unknown_gets_related_works() {
        let types = plan_with_rules("x", Intent::Unknown);
        assert_eq!(types[0], "Related works on this topic");
    }

    #[tokio::test]
    async fn test_no_verdict_plans_nothing() {
        let planner = CitationTypePlanner::rules();
        let result = IntentResult::new(Intent::CommonKnowledge, 0.85);
        assert!(planner.plan("Water boils.", &result).await.is_empty());
    }
}
