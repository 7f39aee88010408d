/*!
 * Mock translator implementation for testing.
 *
 * This module provides a mock translator that simulates different behaviors:
 * - `MockTranslator::working()` - Always succeeds with a tagged translation
 * - `MockTranslator::intermittent(n)` - Fails every n-th request
 * - `MockTranslator::failing()` - Always fails with an error
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::TranslationError;
use crate::language_utils::Language;
use super::Translator;

/// Behavior mode for the mock translator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a proper translation
    Working,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
}

/// Mock translator for testing translation behavior
#[derive(Debug)]
pub struct MockTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter, shared between clones
    request_count: Arc<AtomicUsize>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&str, Language, Language) -> String>,
}

impl MockTranslator {
    /// Create a new mock translator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            custom_response: None,
        }
    }

    /// Create a working mock translator that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create an intermittently failing mock translator
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a failing mock translator that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Set a custom response generator
    pub fn with_custom_response(
        mut self,
        generator: fn(&str, Language, Language) -> String,
    ) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Shared handle to the request counter, readable after the mock is boxed
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.request_count)
    }

    fn respond(&self, text: &str, source: Language, target: Language) -> String {
        match self.custom_response {
            Some(generator) => generator(text, source, target),
            None => format!("[{}] {}", target, text),
        }
    }
}

impl Clone for MockTranslator {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            custom_response: self.custom_response,
        }
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, TranslationError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(self.respond(text, source, target)),
            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && count % fail_every == fail_every - 1 {
                    Err(TranslationError::ApiError {
                        status_code: 503,
                        message: "Simulated intermittent failure".to_string(),
                    })
                } else {
                    Ok(self.respond(text, source, target))
                }
            }
            MockBehavior::Failing => Err(TranslationError::RequestFailed(
                "Simulated network failure".to_string(),
            )),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
