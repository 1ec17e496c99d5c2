//! Fixed keyword taxonomy.
//!
//! Every lexical signal the rule pipeline looks at lives here as static
//! data, so tables can be extended or tested in isolation. All matching is
//! case-insensitive substring containment against lowercased text unless
//! noted otherwise.

/// Keyword category backing one [`crate::FeatureSet`] flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Method,
    Comparison,
    Factual,
    Statistical,
    Theoretical,
    Survey,
    Foundational,
    Temporal,
}

impl KeywordCategory {
    pub const ALL: [KeywordCategory; 8] = [
        KeywordCategory::Method,
        KeywordCategory::Comparison,
        KeywordCategory::Factual,
        KeywordCategory::Statistical,
        KeywordCategory::Theoretical,
        KeywordCategory::Survey,
        KeywordCategory::Foundational,
        KeywordCategory::Temporal,
    ];

    /// Phrases of this category.
    pub fn phrases(self) -> &'static [&'static str] {
        match self {
            KeywordCategory::Method => METHOD_KEYWORDS,
            KeywordCategory::Comparison => COMPARISON_KEYWORDS,
            KeywordCategory::Factual => FACTUAL_KEYWORDS,
            KeywordCategory::Statistical => STATISTICAL_KEYWORDS,
            KeywordCategory::Theoretical => THEORETICAL_KEYWORDS,
            KeywordCategory::Survey => SURVEY_KEYWORDS,
            KeywordCategory::Foundational => FOUNDATIONAL_KEYWORDS,
            KeywordCategory::Temporal => TEMPORAL_KEYWORDS,
        }
    }

    /// Whether any phrase of this category occurs in `lowered`.
    pub fn matches(self, lowered: &str) -> bool {
        contains_any(lowered, self.phrases())
    }
}

/// Methods, models and techniques.
pub const METHOD_KEYWORDS: &[&str] = &[
    "method",
    "approach",
    "algorithm",
    "technique",
    "framework",
    "model",
    "architecture",
    "system",
    "mechanism",
    "strategy",
    "procedure",
    "protocol",
    "scheme",
    "design",
    "implementation",
    "deep learning",
    "neural network",
    "transformer",
    "cnn",
    "rnn",
    "optimization",
    "gradient",
    "backpropagation",
    "training",
    "inference",
    "prediction",
    "classification",
    "regression",
];

/// Comparison and evaluation.
pub const COMPARISON_KEYWORDS: &[&str] = &[
    "compared",
    "comparison",
    "compare",
    "versus",
    "vs",
    "v.s.",
    "better",
    "worse",
    "superior",
    "inferior",
    "outperforms",
    "outperformed",
    "exceeds",
    "surpasses",
    "beats",
    "than",
    "benchmark",
    "evaluation",
    "evaluate",
    "performance",
    "accuracy",
    "precision",
    "recall",
    "f1",
    "f-score",
    "improvement",
    "improved",
    "enhancement",
    "enhanced",
];

/// Reporting verbs and research nouns. Stems cover their inflections
/// ("show" also matches "shows").
pub const FACTUAL_KEYWORDS: &[&str] = &[
    "show",
    "demonstrate",
    "prove",
    "indicate",
    "suggest",
    "reveal",
    "find",
    "found",
    "discover",
    "observe",
    "exhibit",
    "present",
    "confirm",
    "validate",
    "verify",
    "verifies",
    "establish",
    "evidence",
    "empirical",
    "experiment",
    "study",
    "studies",
    "research",
    "paper",
    "work",
];

/// Statistics and data.
pub const STATISTICAL_KEYWORDS: &[&str] = &[
    "statistical",
    "statistics",
    "significant",
    "significance",
    "p-value",
    "p value",
    "correlation",
    "regression",
    "analysis",
    "dataset",
    "data",
    "sample",
    "population",
    "mean",
    "median",
    "variance",
    "standard deviation",
    "confidence interval",
];

/// Theory and concepts.
pub const THEORETICAL_KEYWORDS: &[&str] = &[
    "theory",
    "theoretical",
    "theorem",
    "proof",
    "prove",
    "concept",
    "conceptual",
    "principle",
    "framework",
    "paradigm",
    "hypothesis",
    "hypotheses",
    "assumption",
    "assumptions",
    "definition",
    "formal",
    "mathematical",
    "mathematically",
];

/// Surveys and related work. Does not include "previous", which belongs to
/// comparison sentences ("outperforms previous approaches").
pub const SURVEY_KEYWORDS: &[&str] = &[
    "survey",
    "review",
    "overview",
    "state-of-the-art",
    "sota",
    "related work",
    "literature",
    "prior",
    "existing",
    "recent",
    "recently",
    "latest",
];

/// Original and seminal contributions.
pub const FOUNDATIONAL_KEYWORDS: &[&str] = &[
    "foundational",
    "foundation",
    "pioneering",
    "seminal",
    "original",
    "first",
    "introduced",
    "proposed",
    "propose",
    "established",
    "establish",
    "classic",
    "landmark",
];

/// Recency markers.
pub const TEMPORAL_KEYWORDS: &[&str] = &[
    "recent",
    "recently",
    "latest",
    "new",
    "novel",
    "newly",
    "current",
    "contemporary",
    "modern",
    "state-of-the-art",
    "2020",
    "2021",
    "2022",
    "2023",
    "2024",
    "2025",
];

/// Phrases marking a statement as common knowledge.
pub const COMMON_KNOWLEDGE_PATTERNS: &[&str] = &[
    "it is well known",
    "it is well-known",
    "well known that",
    "as we all know",
    "as everyone knows",
    "as is known",
    "obviously",
    "clearly",
    "it is clear that",
    "it is clear",
    "it is obvious",
    "it is evident",
    "evidently",
    "common sense",
    "common knowledge",
    "widely known",
    "universally accepted",
    "generally accepted",
    "water boils at",
    "the sun rises",
    "gravity",
    "earth is round",
];

/// Function words dropped before keyword extraction.
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did", "will",
    "would", "should", "could", "may", "might", "must", "can", "this", "that", "these", "those",
];

/// A research area a method sentence may belong to.
#[derive(Debug, Clone, Copy)]
pub struct MethodDomain {
    pub name: &'static str,

    /// Terms that select this domain by substring, so "rl" also matches
    /// inside "world".
    pub triggers: &'static [&'static str],

    /// Citation-type template, most foundational first.
    pub citation_types: &'static [&'static str],
}

impl MethodDomain {
    pub fn matches(&self, lowered: &str) -> bool {
        contains_any(lowered, self.triggers)
    }
}

/// Method domains in dispatch order; first match wins.
pub const METHOD_DOMAINS: &[MethodDomain] = &[
    MethodDomain {
        name: "deep_learning",
        triggers: &[
            "deep learning",
            "neural network",
            "neural",
            "cnn",
            "rnn",
            "transformer",
        ],
        citation_types: &[
            "Foundational works on deep learning and neural networks",
            "Recent advances in deep learning architectures",
            "State-of-the-art neural network methods",
        ],
    },
    MethodDomain {
        name: "optimization",
        triggers: &["optimization", "gradient", "adam", "sgd"],
        citation_types: &[
            "Foundational works on optimization algorithms",
            "Recent optimization methods and techniques",
        ],
    },
    MethodDomain {
        name: "reinforcement_learning",
        triggers: &["reinforcement", "rl", "q-learning"],
        citation_types: &[
            "Foundational works on reinforcement learning",
            "Recent advances in RL algorithms",
        ],
    },
    MethodDomain {
        name: "computer_vision",
        triggers: &["computer vision", "image", "visual"],
        citation_types: &[
            "Foundational works on computer vision",
            "Recent computer vision methods",
        ],
    },
    MethodDomain {
        name: "nlp",
        triggers: &["nlp", "natural language", "language model"],
        citation_types: &[
            "Foundational works on natural language processing",
            "Recent NLP methods and language models",
        ],
    },
];

/// Template when no method domain matches.
pub const GENERIC_METHOD_TYPES: &[&str] = &[
    "Foundational works on the method/technique",
    "Recent advances in this technique",
    "State-of-the-art methods in this area",
];

/// A trigger set and the search phrases it expands to.
#[derive(Debug, Clone, Copy)]
pub struct DomainExpansion {
    pub triggers: &'static [&'static str],
    pub keywords: &'static [&'static str],
}

impl DomainExpansion {
    pub fn matches(&self, lowered: &str) -> bool {
        contains_any(lowered, self.triggers)
    }
}

/// Expansions keyed on citation-type strings; first match per type wins.
pub const CITATION_TYPE_EXPANSIONS: &[DomainExpansion] = &[
    DomainExpansion {
        triggers: &["deep learning", "neural"],
        keywords: &["deep learning", "neural networks", "neural network methods"],
    },
    DomainExpansion {
        triggers: &["optimization"],
        keywords: &["optimization algorithms", "optimization methods"],
    },
    DomainExpansion {
        triggers: &["benchmark", "comparison"],
        keywords: &["benchmark evaluation", "performance comparison"],
    },
    DomainExpansion {
        triggers: &["computer vision", "vision"],
        keywords: &["computer vision", "image processing"],
    },
    DomainExpansion {
        triggers: &["nlp", "natural language"],
        keywords: &["natural language processing", "nlp methods"],
    },
    DomainExpansion {
        triggers: &["reinforcement"],
        keywords: &["reinforcement learning", "rl algorithms"],
    },
];

/// Expansions keyed on the raw text; only the first matching domain is used.
pub const TEXT_DOMAIN_EXPANSIONS: &[DomainExpansion] = &[
    DomainExpansion {
        triggers: &["machine learning"],
        keywords: &["machine learning", "ml methods"],
    },
    DomainExpansion {
        triggers: &["artificial intelligence"],
        keywords: &["artificial intelligence", "ai methods"],
    },
    DomainExpansion {
        triggers: &["data mining"],
        keywords: &["data mining", "data analysis"],
    },
    DomainExpansion {
        triggers: &["statistics"],
        keywords: &["statistical methods", "statistical analysis"],
    },
    DomainExpansion {
        triggers: &["optimization"],
        keywords: &["optimization", "optimization algorithms"],
    },
    DomainExpansion {
        triggers: &["graph"],
        keywords: &["graph algorithms", "graph theory"],
    },
    DomainExpansion {
        triggers: &["network"],
        keywords: &["network analysis", "network methods"],
    },
];

/// Whether any of `phrases` is a substring of `lowered`.
pub fn contains_any(lowered: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| lowered.contains(p))
}
