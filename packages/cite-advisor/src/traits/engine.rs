//! Recommendation engine trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::recommendation::Recommendation;

/// Something that turns a normalized, non-empty text span into a
/// [`Recommendation`].
///
/// Two implementations exist: [`crate::RuleEngine`], which never fails, and
/// [`crate::GenerativeEngine`], which may fail when its completion backend
/// does. The orchestrator always keeps a `RuleEngine` as the fallback.
#[async_trait]
pub trait RecommendationEngine: Send + Sync {
    async fn recommend(&self, text: &str) -> Result<Recommendation>;

    /// Short engine name for logs.
    fn name(&self) -> &'static str;
}
