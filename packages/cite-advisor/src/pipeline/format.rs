//! Display text for a [`Recommendation`].

use crate::types::intent::NecessityLevel;
use crate::types::recommendation::Recommendation;

pub const NECESSITY_HEADER: &str = "【Do I need a citation?】";
pub const REASON_HEADER: &str = "【Why】";
pub const CITATION_TYPES_HEADER: &str = "【What to cite】";
pub const KEYWORDS_HEADER: &str = "【Search keywords】";

/// Render `recommendation` as the labeled section layout.
///
/// The citation-type section is omitted when the verdict is `No` or the
/// list is empty; the keyword section is omitted when its list is empty.
/// Every section except the keyword section ends with a blank line, so the
/// text ends in a newline whenever keywords are absent.
pub fn format_recommendation(recommendation: &Recommendation) -> String {
    let necessity = recommendation.necessity;
    let mut lines = vec![
        NECESSITY_HEADER.to_string(),
        format!("{} {}", necessity.glyph(), necessity),
        String::new(),
        REASON_HEADER.to_string(),
        format!("- {}", recommendation.reason),
        String::new(),
    ];

    if necessity != NecessityLevel::No && !recommendation.citation_types.is_empty() {
        lines.push(CITATION_TYPES_HEADER.to_string());
        lines.extend(recommendation.citation_types.iter().map(|t| format!("- {}", t)));
        lines.push(String::new());
    }

    if !recommendation.keywords.is_empty() {
        lines.push(KEYWORDS_HEADER.to_string());
        lines.extend(recommendation.keywords.iter().map(|k| format!("- \"{}\"", k)));
    }

    lines.join("\n")
}
