//! Text feature extraction.

use crate::pipeline::taxonomy::KeywordCategory;
use crate::types::features::{FeatureSet, LONG_WORD_LIMIT, SHORT_WORD_LIMIT};

/// Collapse whitespace runs to single spaces and trim both ends.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Compute the lexical features of `text`.
///
/// Empty or whitespace-only input yields a zero-valued [`FeatureSet`].
pub fn extract_features(text: &str) -> FeatureSet {
    let cleaned = clean_text(text);
    if cleaned.is_empty() {
        return FeatureSet::default();
    }

    let word_count = cleaned.split(' ').count();
    let sentence_count = cleaned
        .chars()
        .filter(|c| matches!(c, '.' | '!' | '?'))
        .count();

    let lowered = cleaned.to_lowercase();
    let has = |category: KeywordCategory| category.matches(&lowered);

    FeatureSet {
        word_count,
        sentence_count,
        has_method_keywords: has(KeywordCategory::Method),
        has_comparison_keywords: has(KeywordCategory::Comparison),
        has_factual_keywords: has(KeywordCategory::Factual),
        has_statistical_keywords: has(KeywordCategory::Statistical),
        has_theoretical_keywords: has(KeywordCategory::Theoretical),
        has_survey_keywords: has(KeywordCategory::Survey),
        has_foundational_keywords: has(KeywordCategory::Foundational),
        has_temporal_keywords: has(KeywordCategory::Temporal),
        is_short: word_count < SHORT_WORD_LIMIT,
        is_long: word_count > LONG_WORD_LIMIT,
        text: cleaned,
    }
}
