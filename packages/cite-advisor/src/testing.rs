//! Testing utilities including a mock completion backend.
//!
//! Useful for testing code that uses the citation advisor without making
//! real network calls.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{AdvisorError, Result};
use crate::pipeline::prompts::PromptKind;
use crate::traits::completion::CompletionService;
use crate::types::config::CompletionOptions;

/// A mock completion backend for testing.
///
/// Replies are scripted per [`PromptKind`]. Unscripted prompts fail with
/// [`AdvisorError::EmptyResponse`]. Every call is recorded.
#[derive(Clone, Default)]
pub struct MockCompletion {
    /// Scripted replies by prompt kind
    responses: Arc<RwLock<HashMap<PromptKind, String>>>,

    /// Prompt kinds that fail with a transport error
    failing: Arc<RwLock<HashSet<PromptKind>>>,

    /// Fail every call, including unrecognized prompts
    fail_all: bool,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<MockCompletionCall>>>,
}

/// Record of a call made to the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct MockCompletionCall {
    /// `None` when the prompt was not built by this crate
    pub kind: Option<PromptKind>,
    pub prompt: String,
    pub options: CompletionOptions,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockCompletion {
    /// Create a mock with no scripted replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock whose every call fails.
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Default::default()
        }
    }

    /// Script the reply for a prompt kind.
    pub fn with_response(self, kind: PromptKind, response: impl Into<String>) -> Self {
        write(&self.responses).insert(kind, response.into());
        self
    }

    /// Script the combined analysis reply.
    pub fn with_analysis(self, response: impl Into<String>) -> Self {
        self.with_response(PromptKind::Analyze, response)
    }

    /// Script the intent-only reply.
    pub fn with_intent(self, response: impl Into<String>) -> Self {
        self.with_response(PromptKind::Intent, response)
    }

    /// Script the citation-type planning reply.
    pub fn with_plan(self, response: impl Into<String>) -> Self {
        self.with_response(PromptKind::Planner, response)
    }

    /// Script the keyword reply.
    pub fn with_keywords(self, response: impl Into<String>) -> Self {
        self.with_response(PromptKind::Keywords, response)
    }

    /// Make calls of one prompt kind fail.
    pub fn failing_on(self, kind: PromptKind) -> Self {
        write(&self.failing).insert(kind);
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockCompletionCall> {
        read(&self.calls).clone()
    }

    /// Number of calls made to this mock.
    pub fn call_count(&self) -> usize {
        read(&self.calls).len()
    }

    /// Prompt kinds of all calls, in order.
    pub fn call_kinds(&self) -> Vec<Option<PromptKind>> {
        read(&self.calls).iter().map(|call| call.kind).collect()
    }

    /// Clear call history.
    pub fn clear_calls(&self) {
        write(&self.calls).clear();
    }
}

#[async_trait]
impl CompletionService for MockCompletion {
    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String> {
        let kind = PromptKind::detect(prompt);
        write(&self.calls).push(MockCompletionCall {
            kind,
            prompt: prompt.to_string(),
            options: *options,
        });

        let fails = self.fail_all || kind.is_some_and(|k| read(&self.failing).contains(&k));
        if fails {
            return Err(AdvisorError::Completion("mock transport failure".into()));
        }

        kind.and_then(|k| read(&self.responses).get(&k).cloned())
            .ok_or_else(|| AdvisorError::EmptyResponse {
                backend: self.name().to_string(),
            })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::prompts::{format_intent_prompt, format_planner_prompt};

    #[tokio::test]
    async fn test_scripted_reply_and_call_tracking() {
        let mock = MockCompletion::new().with_intent("Comparison");

        let reply = mock
            .complete(&format_intent_prompt("x"), &CompletionOptions::intent())
            .await
            .unwrap();
        assert_eq!(reply, "Comparison");

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].kind, Some(PromptKind::Intent));
        assert_eq!(calls[0].options.max_output_tokens, 50);
    }

    #[tokio::test]
    async fn test_unscripted_prompt_is_empty_response() {
        let mock = MockCompletion::new();
        let err = mock
            .complete(&format_planner_prompt("x", "comparison"), &CompletionOptions::planning())
            .await
            .unwrap_err();
        assert!(matches!(err, AdvisorError::EmptyResponse { .. }));
    }

    #[tokio::test]
    async fn test_failing_mock() {
        let mock = MockCompletion::failing().with_intent("Comparison");
        let err = mock
            .complete(&format_intent_prompt("x"), &CompletionOptions::intent())
            .await
            .unwrap_err();
        assert!(matches!(err, AdvisorError::Completion(_)));
        assert_eq!(mock.call_count(), 1);

        mock.clear_calls();
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failing_on_one_kind() {
        let mock = MockCompletion::new()
            .with_intent("Comparison")
            .with_plan("- Benchmark studies on sorting")
            .failing_on(PromptKind::Planner);

        assert!(mock
            .complete(&format_intent_prompt("x"), &CompletionOptions::intent())
            .await
            .is_ok());
        assert!(mock
            .complete(&format_planner_prompt("x", "comparison"), &CompletionOptions::planning())
            .await
            .is_err());
    }
}
