//! Completion backends for the citation advisor.
//!
//! Each backend sits behind a cargo feature. [`build_completion_service`]
//! selects one from a [`BackendConfig`].

use std::sync::Arc;

use tracing::debug;

use crate::error::{AdvisorError, Result};
use crate::traits::completion::CompletionService;
use crate::types::config::{BackendConfig, BackendKind};

#[cfg(feature = "openai")]
mod openai;

#[cfg(feature = "anthropic")]
mod anthropic;

#[cfg(feature = "openai")]
pub use openai::OpenAI;

#[cfg(feature = "anthropic")]
pub use anthropic::Anthropic;

/// Build the completion backend described by `config`.
///
/// Returns `Ok(None)` for [`BackendKind::None`]. A missing credential or a
/// backend whose feature is not compiled in is a configuration error.
pub fn build_completion_service(
    config: &BackendConfig,
) -> Result<Option<Arc<dyn CompletionService>>> {
    if config.kind == BackendKind::None {
        return Ok(None);
    }

    let api_key = config
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or_else(|| {
            AdvisorError::config(format!(
                "{} backend needs an API key (set {})",
                config.kind,
                config.kind.api_key_env().unwrap_or("an API key")
            ))
        })?;

    let model = config.model_or_default().unwrap_or_default();
    debug!(backend = %config.kind, model = %model, "building completion backend");

    match config.kind {
        BackendKind::None => Ok(None),
        BackendKind::OpenAI => build_openai(config, api_key, model),
        BackendKind::Anthropic => build_anthropic(config, api_key, model),
    }
}

#[cfg(feature = "openai")]
fn build_openai(
    config: &BackendConfig,
    api_key: &str,
    model: String,
) -> Result<Option<Arc<dyn CompletionService>>> {
    let mut service = OpenAI::new(api_key).with_model(model);
    if let Some(url) = &config.base_url {
        service = service.with_base_url(url);
    }
    Ok(Some(Arc::new(service)))
}

#[cfg(not(feature = "openai"))]
fn build_openai(
    _config: &BackendConfig,
    _api_key: &str,
    _model: String,
) -> Result<Option<Arc<dyn CompletionService>>> {
    Err(not_compiled(BackendKind::OpenAI))
}

#[cfg(feature = "anthropic")]
fn build_anthropic(
    config: &BackendConfig,
    api_key: &str,
    model: String,
) -> Result<Option<Arc<dyn CompletionService>>> {
    let mut service = Anthropic::new(api_key).with_model(model);
    if let Some(url) = &config.base_url {
        service = service.with_base_url(url);
    }
    Ok(Some(Arc::new(service)))
}

#[cfg(not(feature = "anthropic"))]
fn build_anthropic(
    _config: &BackendConfig,
    _api_key: &str,
    _model: String,
) -> Result<Option<Arc<dyn CompletionService>>> {
    Err(not_compiled(BackendKind::Anthropic))
}

#[cfg(any(not(feature = "openai"), not(feature = "anthropic")))]
fn not_compiled(kind: BackendKind) -> AdvisorError {
    AdvisorError::config(format!(
        "{} backend is not compiled in (enable the `{}` feature)",
        kind, kind
    ))
}
