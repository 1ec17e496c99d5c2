//! Integration tests for the citation advisor.
//!
//! These tests drive the public API end to end:
//! 1. Rule-only analysis of the reference sentences
//! 2. Mode selection (rules, llm, hybrid) against a mock backend
//! 3. Combined and staged generation, including backend failures

use std::sync::Arc;

use cite_advisor::{
    pipeline::prompts::PromptKind, testing::MockCompletion, AdvisorConfig, AnalysisMode,
    CitationAdvisor, GenerationStrategy, Intent, NecessityLevel, Recommendation,
};

const COMMON: &str = "It is well known that water boils at 100 degrees Celsius.";
const COMPARISON: &str = "Our method outperforms previous approaches by 5% on the benchmark dataset.";
const FOUNDATIONAL: &str = "The transformer architecture was introduced in 2017.";
const UNCERTAIN: &str = "We went to the park.";

const ANALYSIS_REPLY: &str = "【Do I need a citation?】\nYes\n\n【Why】\n- The sentence reports a finding about outdoor activity\n\n【What to cite】\n- Empirical studies on outdoor activity\n- Surveys on leisure research\n\n【Search keywords】\n- \"outdoor activity\"\n- \"leisure studies\"\n";

/// Helper to build an advisor around a mock backend.
fn advisor_with(
    mode: AnalysisMode,
    strategy: GenerationStrategy,
    mock: &MockCompletion,
) -> CitationAdvisor {
    let config = AdvisorConfig::new().with_mode(mode).with_strategy(strategy);
    CitationAdvisor::new(config, Some(Arc::new(mock.clone())))
}

async fn rules(text: &str) -> Recommendation {
    CitationAdvisor::rules_only().analyze(text).await
}

// =============================================================================
// Rule pipeline
// =============================================================================

#[tokio::test]
async fn test_common_knowledge_needs_no_citation() {
    let recommendation = rules(COMMON).await;

    assert_eq!(recommendation.intent, Intent::CommonKnowledge);
    assert_eq!(recommendation.necessity, NecessityLevel::No);
    assert!(recommendation.citation_types.is_empty());
    assert!(recommendation.keywords.is_empty());
}

#[tokio::test]
async fn test_comparison_sentence() {
    let recommendation = rules(COMPARISON).await;

    assert_eq!(recommendation.intent, Intent::Comparison);
    assert_eq!(recommendation.necessity, NecessityLevel::Yes);
    assert!(recommendation.citation_types[0].starts_with("Benchmark"));
    // Content words fill the list before any domain expansion.
    assert_eq!(
        recommendation.keywords,
        vec![
            "method".to_string(),
            "outperforms".to_string(),
            "previous".to_string(),
            "method outperforms".to_string(),
            "outperforms previous".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_foundational_sentence() {
    let recommendation = rules(FOUNDATIONAL).await;

    assert_eq!(recommendation.intent, Intent::FoundationalWork);
    assert_eq!(recommendation.necessity, NecessityLevel::Yes);
    assert!(!recommendation.citation_types.is_empty());
}

#[tokio::test]
async fn test_foundational_outranks_comparison() {
    let recommendation = rules("This seminal work outperforms every baseline.").await;
    assert_eq!(recommendation.intent, Intent::FoundationalWork);
}

#[tokio::test]
async fn test_empty_selection() {
    let recommendation = rules(" \n ").await;

    assert_eq!(recommendation.necessity, NecessityLevel::No);
    assert_eq!(recommendation.reason, "No text selected");
    assert!(recommendation.citation_types.is_empty());
    assert!(recommendation.keywords.is_empty());
}

#[tokio::test]
async fn test_rule_analysis_is_deterministic() {
    assert_eq!(rules(COMPARISON).await, rules(COMPARISON).await);
}

#[tokio::test]
async fn test_formatted_comparison() {
    let text = CitationAdvisor::rules_only().analyze_formatted(COMPARISON).await;

    assert!(text.starts_with("【Do I need a citation?】\n✔️ Yes\n\n【Why】\n- "));
    assert!(text.contains("【What to cite】\n- Benchmark studies comparing different approaches"));
    assert!(text.contains("【Search keywords】\n- \""));
}

// =============================================================================
// Mode selection
// =============================================================================

#[tokio::test]
async fn test_rules_mode_never_calls_backend() {
    let mock = MockCompletion::new().with_analysis(ANALYSIS_REPLY);
    let advisor = advisor_with(AnalysisMode::Rules, GenerationStrategy::Combined, &mock);

    for text in [COMMON, COMPARISON, UNCERTAIN] {
        assert_eq!(advisor.analyze(text).await, rules(text).await);
    }
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_empty_selection_never_calls_backend() {
    let mock = MockCompletion::new().with_analysis(ANALYSIS_REPLY);
    let advisor = advisor_with(AnalysisMode::Llm, GenerationStrategy::Combined, &mock);

    assert_eq!(advisor.analyze("   ").await, Recommendation::no_text());
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_hybrid_skips_backend_for_confident_verdicts() {
    let mock = MockCompletion::new().with_analysis(ANALYSIS_REPLY);
    let advisor = advisor_with(AnalysisMode::Hybrid, GenerationStrategy::Combined, &mock);

    assert_eq!(advisor.analyze(COMPARISON).await, rules(COMPARISON).await);
    assert_eq!(advisor.analyze(COMMON).await, rules(COMMON).await);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_hybrid_escalates_optional_verdicts() {
    let mock = MockCompletion::new().with_analysis(ANALYSIS_REPLY);
    let advisor = advisor_with(AnalysisMode::Hybrid, GenerationStrategy::Combined, &mock);

    assert_eq!(rules(UNCERTAIN).await.necessity, NecessityLevel::Optional);

    let recommendation = advisor.analyze(UNCERTAIN).await;
    assert_eq!(mock.call_kinds(), vec![Some(PromptKind::Analyze)]);
    assert_eq!(recommendation.necessity, NecessityLevel::Yes);
    assert_eq!(
        recommendation.reason,
        "The sentence reports a finding about outdoor activity"
    );
}

#[tokio::test]
async fn test_hybrid_keeps_rule_verdict_when_backend_fails() {
    let mock = MockCompletion::failing();
    let advisor = advisor_with(AnalysisMode::Hybrid, GenerationStrategy::Combined, &mock);

    assert_eq!(advisor.analyze(UNCERTAIN).await, rules(UNCERTAIN).await);
    assert_eq!(mock.call_count(), 1);
}

// =============================================================================
// Combined generation
// =============================================================================

#[tokio::test]
async fn test_combined_reply_is_used() {
    let mock = MockCompletion::new().with_analysis(ANALYSIS_REPLY);
    let advisor = advisor_with(AnalysisMode::Llm, GenerationStrategy::Combined, &mock);

    let recommendation = advisor.analyze(COMPARISON).await;

    assert_eq!(recommendation.necessity, NecessityLevel::Yes);
    assert_eq!(recommendation.intent.necessity(), NecessityLevel::Yes);
    assert_eq!(
        recommendation.citation_types,
        vec![
            "Empirical studies on outdoor activity".to_string(),
            "Surveys on leisure research".to_string(),
        ]
    );
    assert_eq!(
        recommendation.keywords,
        vec!["outdoor activity".to_string(), "leisure studies".to_string()]
    );

    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].prompt.contains(COMPARISON));
    assert_eq!(calls[0].options.max_output_tokens, 500);
}

#[tokio::test]
async fn test_combined_no_reply_drops_lists() {
    let reply = "【Do I need a citation?】\nNo\n\n【Why】\n- Widely accepted physical fact\n\n【Search keywords】\n- \"boiling point\"";
    let mock = MockCompletion::new().with_analysis(reply);
    let advisor = advisor_with(AnalysisMode::Llm, GenerationStrategy::Combined, &mock);

    let recommendation = advisor.analyze(COMPARISON).await;

    assert_eq!(recommendation.necessity, NecessityLevel::No);
    assert_eq!(recommendation.intent, Intent::CommonKnowledge);
    assert!(recommendation.citation_types.is_empty());
    assert!(recommendation.keywords.is_empty());
}

#[tokio::test]
async fn test_failing_backend_matches_rule_output() {
    for strategy in [GenerationStrategy::Combined, GenerationStrategy::Staged] {
        let mock = MockCompletion::failing();
        let advisor = advisor_with(AnalysisMode::Llm, strategy, &mock);

        for text in [COMMON, COMPARISON, FOUNDATIONAL, UNCERTAIN] {
            assert_eq!(advisor.analyze(text).await, rules(text).await);
        }
        assert!(mock.call_count() > 0);
    }
}

// =============================================================================
// Staged generation
// =============================================================================

#[tokio::test]
async fn test_staged_runs_each_stage() {
    let mock = MockCompletion::new()
        .with_intent("Comparison")
        .with_plan("- Benchmark studies of sorting algorithms\n- Surveys on external sorting")
        .with_keywords("- \"sorting benchmark\"\n- \"external sorting\"");
    let advisor = advisor_with(AnalysisMode::Llm, GenerationStrategy::Staged, &mock);

    let recommendation = advisor.analyze(COMPARISON).await;

    assert_eq!(
        mock.call_kinds(),
        vec![
            Some(PromptKind::Intent),
            Some(PromptKind::Planner),
            Some(PromptKind::Keywords),
        ]
    );
    assert_eq!(recommendation.intent, Intent::Comparison);
    assert_eq!(recommendation.necessity, NecessityLevel::Yes);
    assert_eq!(
        recommendation.citation_types[0],
        "Benchmark studies of sorting algorithms"
    );
    assert_eq!(
        recommendation.keywords,
        vec!["sorting benchmark".to_string(), "external sorting".to_string()]
    );
}

#[tokio::test]
async fn test_staged_stage_failure_uses_rule_stage() {
    let mock = MockCompletion::new()
        .with_intent("Comparison")
        .with_keywords("- \"sorting benchmark\"")
        .failing_on(PromptKind::Planner);
    let advisor = advisor_with(AnalysisMode::Llm, GenerationStrategy::Staged, &mock);

    let recommendation = advisor.analyze(COMPARISON).await;

    assert_eq!(
        recommendation.citation_types,
        rules(COMPARISON).await.citation_types
    );
    assert_eq!(recommendation.keywords, vec!["sorting benchmark".to_string()]);
}

#[tokio::test]
async fn test_staged_common_knowledge_stops_after_intent() {
    let mock = MockCompletion::new()
        .with_intent("Common knowledge")
        .with_plan("- Should never be requested")
        .with_keywords("- \"never\"");
    let advisor = advisor_with(AnalysisMode::Llm, GenerationStrategy::Staged, &mock);

    let recommendation = advisor.analyze(COMPARISON).await;

    assert_eq!(recommendation.necessity, NecessityLevel::No);
    assert!(recommendation.citation_types.is_empty());
    assert_eq!(mock.call_kinds(), vec![Some(PromptKind::Intent)]);
}
