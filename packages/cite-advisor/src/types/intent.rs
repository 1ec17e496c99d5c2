//! Citation intent and necessity verdict.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Why a sentence might need a citation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Widely known fact, no citation needed
    CommonKnowledge,
    /// Refers to an original or seminal contribution
    FoundationalWork,
    /// Refers to a body of prior work
    SurveyReview,
    /// Compares or evaluates approaches
    Comparison,
    /// Names a method, model or technique
    MethodTechnique,
    /// States a theoretical or conceptual claim
    TheoreticalClaim,
    /// States an empirical or statistical fact
    FactualClaim,
    /// Refers to recent progress in a field
    RecentAdvance,
    /// No signal matched
    Unknown,
}

impl Intent {
    /// All intents, in cascade order.
    pub const ALL: [Intent; 9] = [
        Intent::CommonKnowledge,
        Intent::FoundationalWork,
        Intent::SurveyReview,
        Intent::Comparison,
        Intent::MethodTechnique,
        Intent::TheoreticalClaim,
        Intent::FactualClaim,
        Intent::RecentAdvance,
        Intent::Unknown,
    ];

    /// Necessity verdict for this intent.
    ///
    /// The mapping is total: every intent has exactly one verdict.
    pub fn necessity(self) -> NecessityLevel {
        match self {
            Intent::CommonKnowledge => NecessityLevel::No,
            Intent::Unknown => NecessityLevel::Optional,
            Intent::FoundationalWork
            | Intent::SurveyReview
            | Intent::Comparison
            | Intent::MethodTechnique
            | Intent::TheoreticalClaim
            | Intent::FactualClaim
            | Intent::RecentAdvance => NecessityLevel::Yes,
        }
    }

    /// Snake-case identifier used in prompts and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::CommonKnowledge => "common_knowledge",
            Intent::FoundationalWork => "foundational_work",
            Intent::SurveyReview => "survey_review",
            Intent::Comparison => "comparison",
            Intent::MethodTechnique => "method_technique",
            Intent::TheoreticalClaim => "theoretical_claim",
            Intent::FactualClaim => "factual_claim",
            Intent::RecentAdvance => "recent_advance",
            Intent::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Intent::ALL
            .into_iter()
            .find(|intent| intent.as_str() == normalized)
            .ok_or_else(|| format!("unknown intent: {}", s))
    }
}

/// Whether a citation is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NecessityLevel {
    Yes,
    Optional,
    No,
}

impl NecessityLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            NecessityLevel::Yes => "Yes",
            NecessityLevel::Optional => "Optional",
            NecessityLevel::No => "No",
        }
    }

    /// Status glyph shown next to the verdict.
    pub fn glyph(self) -> &'static str {
        match self {
            NecessityLevel::Yes => "✔️",
            NecessityLevel::Optional => "⚠️",
            NecessityLevel::No => "❌",
        }
    }
}

impl fmt::Display for NecessityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of intent classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntentResult {
    pub intent: Intent,

    pub necessity: NecessityLevel,

    /// Fixed per-rule constant (0.5 to 0.9).
    ///
    /// Reflects rule precedence, not a calibrated probability.
    pub confidence: f32,
}

impl IntentResult {
    /// Build a result whose necessity follows the intent mapping.
    pub fn new(intent: Intent, confidence: f32) -> Self {
        Self {
            intent,
            necessity: intent.necessity(),
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_necessity_mapping_is_total() {
        for intent in Intent::ALL {
            let expected = match intent {
                Intent::CommonKnowledge => NecessityLevel::No,
                Intent::Unknown => NecessityLevel::Optional,
                _ => NecessityLevel::Yes,
            };
            assert_eq!(intent.necessity(), expected, "mapping for {}", intent);
        }
    }

    #[test]
    fn test_intent_string_forms() {
        for intent in Intent::ALL {
            assert_eq!(intent.as_str().parse::<Intent>(), Ok(intent));
        }
        assert_eq!(" Comparison ".parse::<Intent>(), Ok(Intent::Comparison));
        assert!("citation".parse::<Intent>().is_err());
    }

    #[test]
    fn test_intent_serializes_snake_case() {
        let json = serde_json::to_string(&Intent::RecentAdvance).unwrap();
        assert_eq!(json, "\"recent_advance\"");
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(NecessityLevel::Yes.glyph(), "✔️");
        assert_eq!(NecessityLevel::Optional.glyph(), "⚠️");
        assert_eq!(NecessityLevel::No.glyph(), "❌");
    }
}
