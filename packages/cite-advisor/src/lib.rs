//! Citation Need Advisor
//!
//! Decides whether a short span of academic prose needs a citation, what kind
//! of work to cite and which search queries would find it.
//!
//! # Design Philosophy
//!
//! - Rules always work: the deterministic pipeline needs no network
//! - A completion backend is an enhancement, never a dependency
//! - Backend failures degrade to rules and never reach the caller
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cite_advisor::{AdvisorConfig, AnalysisMode, CitationAdvisor};
//! use cite_advisor::testing::MockCompletion;
//!
//! // Rules only
//! let advisor = CitationAdvisor::rules_only();
//! println!("{}", advisor.analyze_formatted("Our method outperforms prior work.").await);
//!
//! // Hybrid: rules first, backend only for uncertain verdicts
//! let config = AdvisorConfig::new().with_mode(AnalysisMode::Hybrid);
//! let advisor = CitationAdvisor::new(config, Some(Arc::new(MockCompletion::new())));
//! let recommendation = advisor.analyze("We went to the park.").await;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (CompletionService, RecommendationEngine)
//! - [`types`] - Value types (FeatureSet, Intent, Recommendation, config)
//! - [`pipeline`] - Feature extraction, classification, planning, keywords, reconciliation
//! - [`ai`] - Completion backends (OpenAI, Anthropic)
//! - [`testing`] - Mock completion backend for tests

pub mod ai;
pub mod error;
pub mod pipeline;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use ai::build_completion_service;
pub use error::{AdvisorError, Result};
pub use pipeline::{
    format_recommendation, CitationAdvisor, CitationTypePlanner, GenerativeAdapter,
    GenerativeAnalysis, GenerativeEngine, IntentClassifier, KeywordGenerator, RuleEngine,
};
pub use traits::{completion::CompletionService, engine::RecommendationEngine};
pub use types::{
    config::{
        AdvisorConfig, AnalysisMode, BackendConfig, BackendKind, CompletionOptions,
        GenerationStrategy,
    },
    features::FeatureSet,
    intent::{Intent, IntentResult, NecessityLevel},
    recommendation::Recommendation,
};
