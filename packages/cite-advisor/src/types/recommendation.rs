//! The terminal aggregate handed to formatting and display.

use serde::{Deserialize, Serialize};

use super::intent::{Intent, NecessityLevel};

/// Reason shown when the selection is empty.
pub const NO_TEXT_REASON: &str = "No text selected";

/// A citation recommendation for one text span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub necessity: NecessityLevel,

    pub intent: Intent,

    /// One-line explanation of the verdict
    pub reason: String,

    /// Kinds of work to cite, most relevant first
    #[serde(default)]
    pub citation_types: Vec<String>,

    /// Search queries, deduplicated, at most five
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Recommendation {
    /// Create a recommendation.
    ///
    /// Both lists are dropped when the verdict is `No`.
    pub fn new(
        necessity: NecessityLevel,
        intent: Intent,
        reason: impl Into<String>,
        citation_types: Vec<String>,
        keywords: Vec<String>,
    ) -> Self {
        let (citation_types, keywords) = if necessity == NecessityLevel::No {
            (Vec::new(), Vec::new())
        } else {
            (citation_types, keywords)
        };

        Self {
            necessity,
            intent,
            reason: reason.into(),
            citation_types,
            keywords,
        }
    }

    /// The fixed result for an empty or whitespace-only selection.
    pub fn no_text() -> Self {
        Self::new(
            NecessityLevel::No,
            Intent::Unknown,
            NO_TEXT_REASON,
            Vec::new(),
            Vec::new(),
        )
    }

    pub fn needs_citation(&self) -> bool {
        self.necessity == NecessityLevel::Yes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_verdict_drops_lists() {
        let rec = Recommendation::new(
            NecessityLevel::No,
            Intent::CommonKnowledge,
            "common knowledge",
            vec!["Surveys".into()],
            vec!["water".into()],
        );
        assert!(rec.citation_types.is_empty());
        assert!(rec.keywords.is_empty());
    }

    #[test]
    fn test_no_text() {
        let rec = Recommendation::no_text();
        assert_eq!(rec.necessity, NecessityLevel::No);
        assert_eq!(rec.reason, NO_TEXT_REASON);
        assert!(!rec.needs_citation());
    }
}
