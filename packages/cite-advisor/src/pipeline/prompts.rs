//! Prompts for the completion backend.
//!
//! Replies are free text. Parsing lives in [`crate::pipeline::reconcile`]
//! and tolerates drift from the requested layout.

/// Prompt for the combined one-shot analysis.
pub const ANALYZE_PROMPT: &str = r#"You are a research writing assistant. Decide whether the selected text needs an academic citation.

Selected text:
{text}

Answer in exactly this layout:

【Do I need a citation?】
Yes / Optional / No

【Why】
- One short sentence explaining the verdict (at most 50 words)

【What to cite】(only if a citation is needed)
- Foundational works on XXX
- Recent methods for XXX
- Surveys on XXX (if applicable)

【Search keywords】(only if a citation is needed)
- "keyword1 keyword2"
- "keyword3 keyword4"

Rules:
- Classify and infer only. Never invent paper titles or author names.
- Follow the layout strictly.
- If no citation is needed, output only the first two sections."#;

/// Prompt for intent-only classification.
pub const INTENT_PROMPT: &str = r#"Classify the citation intent of this text.

Text: {text}

Possible types:
- Factual claim
- Theoretical claim
- Method/Technique
- Comparison
- Survey/Review
- Foundational work
- Recent advance
- Common knowledge (no citation needed)

Return only the type name, nothing else."#;

/// Prompt for citation-type planning.
pub const PLANNER_PROMPT: &str = r#"Plan which kinds of work should be cited for this text.

Text: {text}
Citation intent: {intent}

Output format:
- Foundational works on XXX
- Recent methods for XXX
- Surveys on XXX (if applicable)

Output only citation-type suggestions, never specific paper titles."#;

/// Prompt for search keyword generation.
pub const KEYWORD_PROMPT: &str = r#"Generate 3-5 search keywords for finding citations for this text.

Text: {text}
Citation types:
{citation_types}

Requirements:
- Use terms common in academic search
- Format: "keyword1 keyword2"
- One keyword per line

Output only the keywords, nothing else."#;

/// Which task a prompt was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    Analyze,
    Intent,
    Planner,
    Keywords,
}

impl PromptKind {
    /// Recognize a prompt built by this module from its opening line.
    pub fn detect(prompt: &str) -> Option<Self> {
        let first_line = prompt.lines().next().unwrap_or_default();
        [
            (PromptKind::Analyze, ANALYZE_PROMPT),
            (PromptKind::Intent, INTENT_PROMPT),
            (PromptKind::Planner, PLANNER_PROMPT),
            (PromptKind::Keywords, KEYWORD_PROMPT),
        ]
        .into_iter()
        .find(|(_, template)| template.lines().next() == Some(first_line))
        .map(|(kind, _)| kind)
    }
}

/// Format the combined analysis prompt.
pub fn format_analyze_prompt(text: &str) -> String {
    ANALYZE_PROMPT.replace("{text}", text)
}

/// Format the intent prompt.
pub fn format_intent_prompt(text: &str) -> String {
    INTENT_PROMPT.replace("{text}", text)
}

/// Format the planner prompt.
///
/// The selected text is substituted last so braces inside it survive.
pub fn format_planner_prompt(text: &str, intent: &str) -> String {
    PLANNER_PROMPT
        .replace("{intent}", intent)
        .replace("{text}", text)
}

/// Format the keyword prompt.
pub fn format_keyword_prompt(text: &str, citation_types: &[String]) -> String {
    let types = if citation_types.is_empty() {
        "General research".to_string()
    } else {
        citation_types.join("\n")
    };

    KEYWORD_PROMPT
        .replace("{citation_types}", &types)
        .replace("{text}", text)
}
