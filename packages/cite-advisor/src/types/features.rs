//! Lexical feature set computed once per input text.

use serde::{Deserialize, Serialize};

/// Word count below which a span is considered short.
pub const SHORT_WORD_LIMIT: usize = 20;

/// Word count above which a span is considered long.
pub const LONG_WORD_LIMIT: usize = 100;

/// Lexical features of a normalized text span.
///
/// Built by [`crate::pipeline::features::extract_features`] and consumed only
/// by the intent classifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Whitespace-normalized text
    pub text: String,

    /// Number of whitespace-separated words
    pub word_count: usize,

    /// Count of `.`, `!` and `?` characters.
    ///
    /// A crude proxy: `...` or `?!` count more than once.
    pub sentence_count: usize,

    pub has_method_keywords: bool,
    pub has_comparison_keywords: bool,
    pub has_factual_keywords: bool,
    pub has_statistical_keywords: bool,
    pub has_theoretical_keywords: bool,
    pub has_survey_keywords: bool,
    pub has_foundational_keywords: bool,
    pub has_temporal_keywords: bool,

    /// `word_count < 20`
    pub is_short: bool,

    /// `word_count > 100`
    pub is_long: bool,
}

impl FeatureSet {
    /// Whether no keyword category matched at all.
    pub fn has_no_signals(&self) -> bool {
        !(self.has_method_keywords
            || self.has_comparison_keywords
            || self.has_factual_keywords
            || self.has_statistical_keywords
            || self.has_theoretical_keywords
            || self.has_survey_keywords
            || self.has_foundational_keywords
            || self.has_temporal_keywords)
    }
}
