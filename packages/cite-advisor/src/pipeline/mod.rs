//! The citation pipeline.
//!
//! Feature extraction feeds intent classification, which gates citation-type
//! planning and keyword generation. Each stage has a rule path and an
//! optional completion-backed path that falls back to it.

pub mod advisor;
pub mod engine;
pub mod features;
pub mod format;
pub mod intent;
pub mod keywords;
pub mod planner;
pub mod prompts;
pub mod reconcile;
pub mod taxonomy;

pub use advisor::CitationAdvisor;
pub use engine::{rule_reason, GenerativeEngine, RuleEngine, StagedPipeline};
pub use features::{clean_text, extract_features};
pub use format::format_recommendation;
pub use intent::{classify_features, IntentClassifier, IntentRule, INTENT_CASCADE};
pub use keywords::{generate_with_rules, KeywordGenerator, MAX_KEYWORDS};
pub use planner::{plan_with_rules, CitationTypePlanner};
pub use prompts::PromptKind;
pub use reconcile::{GenerativeAdapter, GenerativeAnalysis};
