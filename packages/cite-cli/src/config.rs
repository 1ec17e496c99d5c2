//! Configuration for the `cite` binary.
//!
//! Sources, lowest to highest precedence:
//! - built-in defaults
//! - `cite-advisor.toml` (or the file named by `--config`)
//! - environment variables (a `.env` file is loaded first)
//! - command-line flags

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use cite_advisor::{
    AdvisorConfig, AnalysisMode, BackendConfig, BackendKind, GenerationStrategy,
};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "cite-advisor.toml";

// =============================================================================
// File configuration (cite-advisor.toml)
// =============================================================================

/// Contents of the TOML config file. Every field is optional.
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub mode: Option<String>,
    pub strategy: Option<String>,
    pub backend: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    /// Credentials are normally taken from the environment; a file value is
    /// used only when the matching variable is unset.
    pub api_key: Option<String>,
}

impl FileConfig {
    /// Load `explicit`, or the default file if it exists, or defaults.
    ///
    /// An explicitly named file must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

// =============================================================================
// Environment
// =============================================================================

/// Values read from the environment.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EnvConfig {
    pub backend: Option<String>,
    pub model: Option<String>,
    pub mode: Option<String>,
    pub strategy: Option<String>,
    pub base_url: Option<String>,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
}

impl EnvConfig {
    /// Read from the process environment after loading `.env` if present.
    pub fn from_env() -> Self {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through `lookup`; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            backend: get("CITE_BACKEND"),
            model: get("CITE_MODEL"),
            mode: get("CITE_MODE"),
            strategy: get("CITE_STRATEGY"),
            base_url: get("CITE_BASE_URL"),
            openai_api_key: get("OPENAI_API_KEY"),
            anthropic_api_key: get("ANTHROPIC_API_KEY"),
        }
    }

    fn api_key_for(&self, kind: BackendKind) -> Option<String> {
        match kind {
            BackendKind::None => None,
            BackendKind::OpenAI => self.openai_api_key.clone(),
            BackendKind::Anthropic => self.anthropic_api_key.clone(),
        }
    }
}

// =============================================================================
// Flags
// =============================================================================

/// Values given on the command line.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FlagConfig {
    pub mode: Option<String>,
    pub strategy: Option<String>,
    pub backend: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

// =============================================================================
// Resolved settings
// =============================================================================

/// Fully resolved settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub advisor: AdvisorConfig,
    pub backend: BackendConfig,
    pub timeout_secs: Option<u64>,
}

impl Settings {
    /// Merge the three sources over the defaults.
    pub fn resolve(file: FileConfig, env: EnvConfig, flags: FlagConfig) -> Result<Self> {
        let pick = |flag: Option<String>, env: Option<String>, file: Option<String>| {
            flag.or(env).or(file)
        };

        let mode = match pick(flags.mode, env.mode.clone(), file.mode) {
            Some(value) => value.parse::<AnalysisMode>().context("Invalid analysis mode")?,
            None => AnalysisMode::default(),
        };

        let strategy = match pick(flags.strategy, env.strategy.clone(), file.strategy) {
            Some(value) => value
                .parse::<GenerationStrategy>()
                .context("Invalid generation strategy")?,
            None => GenerationStrategy::default(),
        };

        let kind = match pick(flags.backend, env.backend.clone(), file.backend) {
            Some(value) => value.parse::<BackendKind>().context("Invalid backend")?,
            None => BackendKind::default(),
        };

        let backend = BackendConfig {
            kind,
            api_key: env.api_key_for(kind).or(file.api_key),
            model: pick(flags.model, env.model.clone(), file.model),
            base_url: pick(flags.base_url, env.base_url.clone(), file.base_url),
        };

        Ok(Self {
            advisor: AdvisorConfig::new().with_mode(mode).with_strategy(strategy),
            backend,
            timeout_secs: flags.timeout_secs.or(file.timeout_secs),
        })
    }
}
