//! Terminal rendering of recommendations.

use colored::{ColoredString, Colorize};

use cite_advisor::pipeline::format::{
    CITATION_TYPES_HEADER, KEYWORDS_HEADER, NECESSITY_HEADER, REASON_HEADER,
};
use cite_advisor::{NecessityLevel, Recommendation};

/// Same section layout as [`cite_advisor::format_recommendation`], with
/// headers and the verdict colored.
pub fn render(recommendation: &Recommendation) -> String {
    let necessity = recommendation.necessity;
    let mut lines = vec![
        header(NECESSITY_HEADER),
        format!("{} {}", necessity.glyph(), verdict(necessity)),
        String::new(),
        header(REASON_HEADER),
        format!("- {}", recommendation.reason),
        String::new(),
    ];

    if necessity != NecessityLevel::No && !recommendation.citation_types.is_empty() {
        lines.push(header(CITATION_TYPES_HEADER));
        lines.extend(recommendation.citation_types.iter().map(|t| format!("- {}", t)));
        lines.push(String::new());
    }

    if !recommendation.keywords.is_empty() {
        lines.push(header(KEYWORDS_HEADER));
        lines.extend(
            recommendation
                .keywords
                .iter()
                .map(|k| format!("- {}", format!("\"{}\"", k).cyan())),
        );
    }

    lines.join("\n")
}

fn header(text: &str) -> String {
    text.bold().to_string()
}

fn verdict(necessity: NecessityLevel) -> ColoredString {
    match necessity {
        NecessityLevel::Yes => necessity.as_str().bright_green().bold(),
        NecessityLevel::Optional => necessity.as_str().yellow().bold(),
        NecessityLevel::No => necessity.as_str().bright_red().bold(),
    }
}
