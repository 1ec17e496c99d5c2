//! Search keyword generation.

use tracing::warn;

use crate::pipeline::reconcile::GenerativeAdapter;
use crate::pipeline::taxonomy::{CITATION_TYPE_EXPANSIONS, STOP_WORDS, TEXT_DOMAIN_EXPANSIONS};

/// Upper bound on a keyword list.
pub const MAX_KEYWORDS: usize = 5;

/// Content words kept as singleton keywords.
const LEADING_CONTENT_WORDS: usize = 3;

/// Tokens of this many characters or fewer are dropped.
const MIN_TOKEN_CHARS: usize = 3;

const TOKEN_PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '(', ')', '[', ']', '{', '}', '"', '\'',
];

/// Drop exact duplicates keeping first-seen order, then cap at
/// [`MAX_KEYWORDS`].
pub fn dedupe_and_cap(keywords: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(MAX_KEYWORDS);
    for keyword in keywords {
        if unique.len() == MAX_KEYWORDS {
            break;
        }
        if !unique.contains(&keyword) {
            unique.push(keyword);
        }
    }
    unique
}

/// Lowercased content words of `text` in order of appearance.
///
/// Length and stopword filters see the raw token, so "that," survives while
/// "that" does not. Punctuation is trimmed afterwards.
pub fn content_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .filter(|token| token.chars().count() > MIN_TOKEN_CHARS)
        .filter(|token| !STOP_WORDS.contains(token))
        .map(|token| token.trim_matches(TOKEN_PUNCTUATION))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Rule-based keyword generation.
pub fn generate_with_rules(text: &str, citation_types: &[String]) -> Vec<String> {
    let words = content_words(text);
    let mut keywords: Vec<String> = words.iter().take(LEADING_CONTENT_WORDS).cloned().collect();

    if let [first, second, rest @ ..] = words.as_slice() {
        keywords.push(format!("{} {}", first, second));
        if let Some(third) = rest.first() {
            keywords.push(format!("{} {}", second, third));
        }
    }

    for citation_type in citation_types {
        let lowered = citation_type.to_lowercase();
        if let Some(expansion) = CITATION_TYPE_EXPANSIONS.iter().find(|e| e.matches(&lowered)) {
            keywords.extend(expansion.keywords.iter().map(|k| k.to_string()));
        }
    }

    let lowered = text.to_lowercase();
    if let Some(expansion) = TEXT_DOMAIN_EXPANSIONS.iter().find(|e| e.matches(&lowered)) {
        keywords.extend(expansion.keywords.iter().map(|k| k.to_string()));
    }

    dedupe_and_cap(keywords)
}

/// Generates search keywords, by rules or through a completion backend.
#[derive(Clone, Default)]
pub struct KeywordGenerator {
    adapter: Option<GenerativeAdapter>,
}

impl KeywordGenerator {
    /// Rule-only generator.
    pub fn rules() -> Self {
        Self::default()
    }

    pub fn with_adapter(adapter: GenerativeAdapter) -> Self {
        Self {
            adapter: Some(adapter),
        }
    }

    /// Keywords for `text`, guided by the planned citation types.
    ///
    /// Backend failures fall back to the rule path.
    pub async fn generate(&self, text: &str, citation_types: &[String]) -> Vec<String> {
        if let Some(adapter) = &self.adapter {
            match adapter.generate_keywords(text, citation_types).await {
                Ok(keywords) => return keywords,
                Err(e) => warn!(
                    backend = adapter.backend_name(),
                    error = %e,
                    "Keyword generation failed, using rules"
                ),
            }
        }
        generate_with_rules(text, citation_types)
    }
}
