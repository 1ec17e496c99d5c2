//! `cite` - ask whether a span of academic prose needs a citation.
//!
//! Reads the text from the argument, or from stdin when omitted. With
//! `--interactive`, stdin is read as paragraphs separated by blank lines and
//! each one is analyzed in turn.

mod config;
mod render;

use std::io::{BufRead, IsTerminal, Read, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cite_advisor::{build_completion_service, CitationAdvisor, Recommendation};

use crate::config::{EnvConfig, FileConfig, FlagConfig, Settings};

#[derive(Parser)]
#[command(name = "cite")]
#[command(about = "Decide whether a sentence needs a citation, and what to cite")]
struct Cli {
    /// Text to analyze (read from stdin when omitted)
    text: Option<String>,

    /// Config file (default: ./cite-advisor.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Analysis mode: rules, llm or hybrid
    #[arg(long)]
    mode: Option<String>,

    /// Completion backend: none, openai or anthropic
    #[arg(long)]
    backend: Option<String>,

    /// Model identifier for the backend
    #[arg(long)]
    model: Option<String>,

    /// Generation strategy: combined or staged
    #[arg(long)]
    strategy: Option<String>,

    /// Base URL for the backend API
    #[arg(long)]
    base_url: Option<String>,

    /// Give up on the backend after this many seconds and use rules
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Print the recommendation as JSON
    #[arg(long)]
    json: bool,

    /// Analyze blank-line separated paragraphs from stdin
    #[arg(short, long)]
    interactive: bool,
}

impl Cli {
    fn flags(&self) -> FlagConfig {
        FlagConfig {
            mode: self.mode.clone(),
            strategy: self.strategy.clone(),
            backend: self.backend.clone(),
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays parseable.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    colored::control::set_override(std::io::stdout().is_terminal());

    let file = FileConfig::load(cli.config.as_deref())?;
    let settings = Settings::resolve(file, EnvConfig::from_env(), cli.flags())?;

    let service = build_completion_service(&settings.backend)
        .context("Failed to configure completion backend")?;
    let advisor = CitationAdvisor::new(settings.advisor, service);
    let timeout = settings.timeout_secs.map(Duration::from_secs);

    if cli.interactive {
        let stdin = std::io::stdin();
        for paragraph in Paragraphs::new(stdin.lock()) {
            let paragraph = paragraph.context("Failed to read stdin")?;
            let recommendation = analyze(&advisor, &paragraph, timeout).await;
            print(&recommendation, cli.json)?;
            if !cli.json {
                println!();
            }
            std::io::stdout().flush().context("Failed to flush stdout")?;
        }
        return Ok(());
    }

    let text = match cli.text {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };

    let recommendation = analyze(&advisor, &text, timeout).await;
    print(&recommendation, cli.json)
}

async fn analyze(
    advisor: &CitationAdvisor,
    text: &str,
    timeout: Option<Duration>,
) -> Recommendation {
    let Some(limit) = timeout else {
        return advisor.analyze(text).await;
    };

    match tokio::time::timeout(limit, advisor.analyze(text)).await {
        Ok(recommendation) => recommendation,
        Err(_) => {
            warn!(timeout_secs = limit.as_secs(), "Analysis timed out, using rules");
            advisor.analyze_with_rules(text).await
        }
    }
}

fn print(recommendation: &Recommendation, json: bool) -> Result<()> {
    if json {
        let output = serde_json::to_string_pretty(recommendation)
            .context("Failed to serialize recommendation")?;
        println!("{}", output);
    } else {
        println!("{}", render::render(recommendation));
    }
    Ok(())
}

/// Paragraphs of `reader`, separated by blank lines.
///
/// Each paragraph is yielded as soon as the blank line ending it is read.
/// Lines inside a paragraph are joined with single spaces.
struct Paragraphs<R> {
    lines: std::io::Lines<R>,
}

impl<R: BufRead> Paragraphs<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

impl<R: BufRead> Iterator for Paragraphs<R> {
    type Item = std::io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut current: Vec<String> = Vec::new();
        for line in self.lines.by_ref() {
            let line = match line {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            if !line.trim().is_empty() {
                current.push(line);
            } else if !current.is_empty() {
                return Some(Ok(current.join(" ")));
            }
        }
        if current.is_empty() {
            None
        } else {
            Some(Ok(current.join(" ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_are_forwarded() {
        let cli = Cli::parse_from([
            "cite",
            "--mode",
            "hybrid",
            "--backend",
            "openai",
            "--timeout-secs",
            "5",
            "Some text.",
        ]);
        let flags = cli.flags();

        assert_eq!(flags.mode.as_deref(), Some("hybrid"));
        assert_eq!(flags.backend.as_deref(), Some("openai"));
        assert_eq!(flags.timeout_secs, Some(5));
        assert_eq!(cli.text.as_deref(), Some("Some text."));
    }

    #[test]
    fn test_paragraphs() {
        let input = "First line\ncontinues here.\n\n\n  \nSecond paragraph.\n";
        let result: Vec<String> = Paragraphs::new(input.as_bytes())
            .collect::<std::io::Result<_>>()
            .unwrap();
        assert_eq!(
            result,
            vec![
                "First line continues here.".to_string(),
                "Second paragraph.".to_string()
            ]
        );
    }

    /// Reader that fails once its scripted lines run out, standing in for a
    /// terminal that has not sent EOF yet.
    struct OpenEnded(std::io::Cursor<Vec<u8>>);

    impl Read for OpenEnded {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            match self.0.read(buf)? {
                0 => Err(std::io::Error::new(
                    std::io::ErrorKind::WouldBlock,
                    "no more input yet",
                )),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn test_paragraph_yielded_before_end_of_input() {
        let reader = std::io::BufReader::new(OpenEnded(std::io::Cursor::new(
            b"The first paragraph.\n\n".to_vec(),
        )));
        let mut paragraphs = Paragraphs::new(reader);

        assert_eq!(
            paragraphs.next().unwrap().unwrap(),
            "The first paragraph."
        );
        assert!(paragraphs.next().unwrap().is_err());
    }

    #[tokio::test]
    async fn test_analyze_within_timeout() {
        let advisor = CitationAdvisor::rules_only();
        let text = "The transformer architecture was introduced in 2017.";
        assert_eq!(
            analyze(&advisor, text, Some(Duration::from_secs(5))).await,
            advisor.analyze(text).await
        );
    }
}
