//! Completion adapter and reply parsing.
//!
//! Replies from the backend are free text that only loosely follows the
//! requested layout. Every parser here is total: it never errors and never
//! panics, and falls back to a heuristic default when nothing matches.

use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::error::{AdvisorError, Result};
use crate::pipeline::keywords::dedupe_and_cap;
use crate::pipeline::prompts::{
    format_analyze_prompt, format_intent_prompt, format_keyword_prompt, format_planner_prompt,
};
use crate::traits::completion::CompletionService;
use crate::types::config::CompletionOptions;
use crate::types::intent::{Intent, IntentResult, NecessityLevel};

/// Reason used when a reply carries nothing usable.
pub const DEFAULT_REASON: &str = "Further analysis needed";

/// Confidence assigned to a backend intent classification.
pub const GENERATIVE_CONFIDENCE: f32 = 0.9;

const MAX_REASON_CHARS: usize = 100;
const MAX_CITATION_TYPES: usize = 5;
const MIN_ITEM_CHARS: usize = 10;
const NECESSITY_PREFIX_CHARS: usize = 50;

lazy_static! {
    static ref QUOTED_REGEX: Regex = Regex::new(r#""([^"]+)""#).expect("valid quoted pattern");

    // `Why:` / `原因：` label, or a `因为` clause
    static ref REASON_MARKER_REGEX: Regex =
        Regex::new(r"(?i)(?:why|原因)\s*[：:]\s*(.+)|因为(.+)").expect("valid reason pattern");
}

/// Parsed result of one combined analysis call.
///
/// Always produced; a transport failure is carried in `error` instead of
/// being raised.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerativeAnalysis {
    pub necessity: NecessityLevel,
    pub intent: Intent,
    pub reason: String,
    pub citation_types: Vec<String>,
    pub keywords: Vec<String>,
    pub error: Option<String>,
}

impl GenerativeAnalysis {
    /// Parse a combined analysis reply.
    pub fn from_response(response: &str) -> Self {
        let necessity = extract_necessity(response);
        let intent = reconcile_intent(necessity, infer_intent(response));

        Self {
            necessity,
            intent,
            reason: extract_reason(response),
            citation_types: extract_citation_types(response),
            keywords: extract_keywords(response),
            error: None,
        }
    }

    /// Record a failed call.
    pub fn failed(error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            necessity: NecessityLevel::Optional,
            intent: Intent::Unknown,
            reason: format!("Generative analysis failed: {}", error),
            citation_types: Vec::new(),
            keywords: Vec::new(),
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Prompts a [`CompletionService`] and parses its replies.
#[derive(Clone)]
pub struct GenerativeAdapter {
    service: Arc<dyn CompletionService>,
}

impl GenerativeAdapter {
    pub fn new(service: Arc<dyn CompletionService>) -> Self {
        Self { service }
    }

    /// Backend name for logs.
    pub fn backend_name(&self) -> &str {
        self.service.name()
    }

    /// One-shot analysis with the combined prompt.
    pub async fn analyze(&self, text: &str) -> GenerativeAnalysis {
        let prompt = format_analyze_prompt(text);
        match self
            .service
            .complete(&prompt, &CompletionOptions::analysis())
            .await
        {
            Ok(response) => {
                debug!(backend = self.backend_name(), "parsing combined analysis");
                GenerativeAnalysis::from_response(&response)
            }
            Err(e) => GenerativeAnalysis::failed(e.to_string()),
        }
    }

    /// Classify the intent of `text`.
    pub async fn classify_intent(&self, text: &str) -> Result<IntentResult> {
        let prompt = format_intent_prompt(text);
        let response = self
            .service
            .complete(&prompt, &CompletionOptions::intent())
            .await?;

        Ok(IntentResult::new(parse_intent(&response), GENERATIVE_CONFIDENCE))
    }

    /// Plan the kinds of work to cite.
    pub async fn plan_citation_types(&self, text: &str, intent: Intent) -> Result<Vec<String>> {
        let prompt = format_planner_prompt(text, intent.as_str());
        let response = self
            .service
            .complete(&prompt, &CompletionOptions::planning())
            .await?;

        let types = parse_bullet_types(&response);
        if types.is_empty() {
            return Err(self.empty_reply());
        }
        Ok(types)
    }

    /// Generate search keywords.
    pub async fn generate_keywords(&self, text: &str, citation_types: &[String]) -> Result<Vec<String>> {
        let prompt = format_keyword_prompt(text, citation_types);
        let response = self
            .service
            .complete(&prompt, &CompletionOptions::keywords())
            .await?;

        let keywords = parse_keyword_lines(&response);
        if keywords.is_empty() {
            return Err(self.empty_reply());
        }
        Ok(keywords)
    }

    fn empty_reply(&self) -> AdvisorError {
        AdvisorError::EmptyResponse {
            backend: self.backend_name().to_string(),
        }
    }
}

// =============================================================================
// Line helpers
// =============================================================================

const BULLETS: &[char] = &['-', '•', '*'];

/// Strip a leading bullet marker, if present.
fn strip_bullet(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    trimmed
        .strip_prefix(BULLETS)
        .map(|rest| rest.trim_start_matches(BULLETS).trim())
}

/// Whether `line` opens a labeled section such as `【Why】` or `## Why`.
fn is_section_header(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('【') || trimmed.starts_with('#')
}

/// The lines between the first header matching `label` and the next header.
fn section_lines<'a>(response: &'a str, labels: &[&str]) -> Option<Vec<&'a str>> {
    let mut lines = response.lines();
    lines.by_ref().find(|line| {
        let lowered = line.to_lowercase();
        is_section_header(line) && labels.iter().any(|label| lowered.contains(label))
    })?;

    Some(
        lines
            .take_while(|line| !is_section_header(line))
            .filter(|line| !line.trim().is_empty())
            .collect(),
    )
}

fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(limit).collect();
    truncated.push_str("...");
    truncated
}

fn quoted_substrings(text: &str) -> Vec<String> {
    QUOTED_REGEX
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// =============================================================================
// Combined reply parsing
// =============================================================================

/// Necessity verdict from a combined reply.
///
/// A reply containing "yes" whose opening does not contain "no" is `Yes`;
/// the mirror case is `No`; anything else is `Optional`.
pub fn extract_necessity(response: &str) -> NecessityLevel {
    let lowered = response.to_lowercase();
    let prefix: String = lowered.chars().take(NECESSITY_PREFIX_CHARS).collect();

    if lowered.contains("yes") && !prefix.contains("no") {
        NecessityLevel::Yes
    } else if lowered.contains("no") && !prefix.contains("yes") {
        NecessityLevel::No
    } else {
        NecessityLevel::Optional
    }
}

/// One-line reason from a combined reply.
pub fn extract_reason(response: &str) -> String {
    let from_section = section_lines(response, &["why", "原因"]).and_then(|lines| {
        lines
            .first()
            .map(|line| strip_bullet(line).unwrap_or(line.trim()).to_string())
    });

    let from_marker = || {
        REASON_MARKER_REGEX.captures(response).and_then(|c| {
            c.get(1)
                .or_else(|| c.get(2))
                .map(|m| m.as_str().trim().to_string())
        })
    };

    let from_first_line = || {
        response
            .lines()
            .map(str::trim)
            .filter(|line| !is_section_header(line))
            .find(|line| line.chars().count() > MIN_ITEM_CHARS)
            .map(|line| strip_bullet(line).unwrap_or(line).to_string())
    };

    from_section
        .filter(|reason| !reason.is_empty())
        .or_else(from_marker)
        .or_else(from_first_line)
        .filter(|reason| !reason.is_empty())
        .map(|reason| truncate_chars(&reason, MAX_REASON_CHARS))
        .unwrap_or_else(|| DEFAULT_REASON.to_string())
}

/// Citation-type suggestions from a combined reply.
pub fn extract_citation_types(response: &str) -> Vec<String> {
    if let Some(lines) = section_lines(response, &["what to cite", "引用类型", "应该引用"]) {
        let types: Vec<String> = lines
            .iter()
            .filter_map(|line| strip_bullet(line))
            .filter(|item| item.chars().count() > MIN_ITEM_CHARS)
            .map(str::to_string)
            .take(MAX_CITATION_TYPES)
            .collect();
        if !types.is_empty() {
            return types;
        }
    }

    response
        .lines()
        .filter_map(strip_bullet)
        .filter(|item| {
            let lowered = item.to_lowercase();
            ["foundational", "recent", "survey"]
                .iter()
                .any(|marker| lowered.contains(marker))
        })
        .filter(|item| item.chars().count() > MIN_ITEM_CHARS)
        .map(str::to_string)
        .take(MAX_CITATION_TYPES)
        .collect()
}

/// Search keywords from a combined reply.
///
/// Quoted substrings anywhere in the reply come first, followed by the lines
/// under a keyword header.
pub fn extract_keywords(response: &str) -> Vec<String> {
    let mut keywords = quoted_substrings(response);

    let mut lines = response.lines();
    if lines
        .by_ref()
        .any(|line| line.to_lowercase().contains("keyword"))
    {
        for line in lines.take_while(|line| !is_section_header(line)) {
            let trimmed = line.trim();
            if let Some(item) = strip_bullet(trimmed) {
                let item = item.trim_matches('"').trim();
                if !item.is_empty() {
                    keywords.push(item.to_string());
                }
            } else if !trimmed.is_empty() && !trimmed.contains('"') {
                keywords.push(trimmed.to_string());
            }
        }
    }

    dedupe_and_cap(keywords)
}

/// Intent suggested by the wording of a combined reply.
pub fn infer_intent(response: &str) -> Intent {
    let lowered = response.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| lowered.contains(w));

    if has(&["method", "technique"]) {
        Intent::MethodTechnique
    } else if has(&["comparison", "compare"]) {
        Intent::Comparison
    } else if has(&["survey", "review"]) {
        Intent::SurveyReview
    } else if has(&["foundational"]) {
        Intent::FoundationalWork
    } else if has(&["recent"]) {
        Intent::RecentAdvance
    } else if has(&["theoretical", "theory"]) {
        Intent::TheoreticalClaim
    } else if has(&["common", "well known"]) {
        Intent::CommonKnowledge
    } else {
        Intent::FactualClaim
    }
}

/// Align an inferred intent with the parsed verdict.
///
/// The result always satisfies `intent.necessity() == necessity`.
pub fn reconcile_intent(necessity: NecessityLevel, inferred: Intent) -> Intent {
    match necessity {
        NecessityLevel::No => Intent::CommonKnowledge,
        NecessityLevel::Optional => Intent::Unknown,
        NecessityLevel::Yes if inferred.necessity() == NecessityLevel::Yes => inferred,
        NecessityLevel::Yes => Intent::FactualClaim,
    }
}

// =============================================================================
// Staged reply parsing
// =============================================================================

/// Ordered substring map for intent-only replies; first match wins.
const INTENT_MARKERS: &[(&str, Intent)] = &[
    ("factual", Intent::FactualClaim),
    ("theoretical", Intent::TheoreticalClaim),
    ("method", Intent::MethodTechnique),
    ("technique", Intent::MethodTechnique),
    ("comparison", Intent::Comparison),
    ("survey", Intent::SurveyReview),
    ("review", Intent::SurveyReview),
    ("foundational", Intent::FoundationalWork),
    ("recent", Intent::RecentAdvance),
    ("common", Intent::CommonKnowledge),
    ("knowledge", Intent::CommonKnowledge),
];

/// Intent from an intent-only reply.
pub fn parse_intent(response: &str) -> Intent {
    let lowered = response.trim().to_lowercase();
    INTENT_MARKERS
        .iter()
        .find(|(marker, _)| lowered.contains(marker))
        .map(|(_, intent)| *intent)
        .unwrap_or(Intent::Unknown)
}

/// Bullet lines longer than ten characters, at most five.
pub fn parse_bullet_types(response: &str) -> Vec<String> {
    response
        .lines()
        .filter_map(strip_bullet)
        .filter(|item| item.chars().count() > MIN_ITEM_CHARS)
        .map(str::to_string)
        .take(MAX_CITATION_TYPES)
        .collect()
}

/// Keywords from a keyword-only reply: bullet lines with quotes stripped,
/// plus quoted substrings of other lines.
pub fn parse_keyword_lines(response: &str) -> Vec<String> {
    let mut keywords = Vec::new();
    for line in response.lines() {
        let trimmed = line.trim();
        if let Some(item) = strip_bullet(trimmed) {
            let item = item.trim_matches('"').trim();
            if !item.is_empty() {
                keywords.push(item.to_string());
            }
        } else if trimmed.contains('"') {
            keywords.extend(quoted_substrings(trimmed));
        }
    }
    dedupe_and_cap(keywords)
}
