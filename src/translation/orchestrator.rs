/*!
 * Translation orchestrator.
 *
 * Holds the editor state (languages, input and output text) and drives the
 * Idle / Translating / Blocked state machine around the external translator.
 * Successful translations are recorded in the history; failures are logged
 * and leave the visible state untouched.
 */

use log::{debug, error, info, warn};
use std::fmt;

use crate::history_service::{HistoryService, SavedIcon};
use crate::language_utils::Language;
use crate::providers::Translator;

/// Orchestrator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslatorState {
    /// Ready to translate
    Idle,
    /// Waiting for the external translator
    Translating,
    /// Input exceeds the symbol budget
    Blocked,
}

impl fmt::Display for TranslatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Translating => write!(f, "translating"),
            Self::Blocked => write!(f, "blocked"),
        }
    }
}

/// Result of a translate request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateOutcome {
    /// Output replaced by the translation; `record_id` is `None` when the
    /// history write failed
    Translated {
        text: String,
        record_id: Option<i64>,
    },
    /// Request dropped because the input is over budget
    Blocked { length: usize, max: usize },
    /// The translator failed; output unchanged
    Failed,
}

/// Coordinates the translator, the editor state and the history
pub struct Orchestrator {
    translator: Box<dyn Translator>,
    history: HistoryService,
    max_symbols: usize,
    state: TranslatorState,
    source: Language,
    target: Language,
    input: String,
    output: String,
}

impl Orchestrator {
    /// Create an orchestrator with empty texts
    pub fn new(
        translator: Box<dyn Translator>,
        history: HistoryService,
        max_symbols: usize,
        source: Language,
        target: Language,
    ) -> Self {
        Self {
            translator,
            history,
            max_symbols,
            state: TranslatorState::Idle,
            source,
            target,
            input: String::new(),
            output: String::new(),
        }
    }

    pub fn state(&self) -> TranslatorState {
        self.state
    }

    pub fn source(&self) -> Language {
        self.source
    }

    pub fn target(&self) -> Language {
        self.target
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn max_symbols(&self) -> usize {
        self.max_symbols
    }

    /// History service backing the list views
    pub fn history(&self) -> &HistoryService {
        &self.history
    }

    /// Give back the history service, e.g. to close the store
    pub fn into_history(self) -> HistoryService {
        self.history
    }

    /// Input length in symbols
    pub fn input_len(&self) -> usize {
        self.input.chars().count()
    }

    /// Symbol counter as shown next to the input, e.g. "12/3100"
    pub fn symbol_counter(&self) -> String {
        format!("{}/{}", self.input_len(), self.max_symbols)
    }

    /// Whether the current input fits the symbol budget
    pub fn can_translate(&self) -> bool {
        self.input_len() <= self.max_symbols
    }

    /// Replace the input text and re-evaluate the symbol budget
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.refresh_state();
    }

    pub fn set_source(&mut self, source: Language) {
        self.source = source;
    }

    pub fn set_target(&mut self, target: Language) {
        self.target = target;
    }

    /// Empty both texts
    pub fn clear(&mut self) {
        self.input.clear();
        self.output.clear();
        self.refresh_state();
    }

    fn refresh_state(&mut self) {
        if self.state == TranslatorState::Translating {
            return;
        }
        self.state = if self.can_translate() {
            TranslatorState::Idle
        } else {
            TranslatorState::Blocked
        };
    }

    /// Translate the current input
    pub async fn translate(&mut self) -> TranslateOutcome {
        let length = self.input_len();
        if length > self.max_symbols {
            self.state = TranslatorState::Blocked;
            warn!(
                "Input has {} symbols, the limit is {}; translation skipped",
                length, self.max_symbols
            );
            return TranslateOutcome::Blocked {
                length,
                max: self.max_symbols,
            };
        }

        self.state = TranslatorState::Translating;
        debug!(
            "Translating {} symbols {} -> {} with {}",
            length,
            self.source,
            self.target,
            self.translator.name()
        );

        let result = self
            .translator
            .translate(&self.input, self.source, self.target)
            .await;
        self.state = TranslatorState::Idle;

        match result {
            Ok(text) => {
                self.output = text.clone();
                let record_id = match self.history.record(&self.input, self.source, self.target) {
                    Ok(id) => Some(id),
                    Err(e) => {
                        error!("Failed to record translation in history: {}", e);
                        None
                    }
                };
                TranslateOutcome::Translated { text, record_id }
            }
            Err(e) => {
                error!("Translation failed: {}", e);
                TranslateOutcome::Failed
            }
        }
    }

    /// Exchange languages and texts, then translate again
    pub async fn swap(&mut self) -> TranslateOutcome {
        std::mem::swap(&mut self.source, &mut self.target);
        std::mem::swap(&mut self.input, &mut self.output);
        self.refresh_state();
        info!("Swapped languages: {} -> {}", self.source, self.target);

        self.translate().await
    }

    /// Saved indicator for the current input and languages
    pub fn saved_icon(&self) -> SavedIcon {
        self.history
            .current_saved_icon(&self.input, self.source, self.target)
            .unwrap_or_else(|e| {
                error!("Failed to read saved state: {}", e);
                SavedIcon::Inactive
            })
    }

    /// Star or unstar the current triple, recording it first if needed
    ///
    /// Returns `None` when there is nothing to save or the store failed.
    pub fn toggle_saved(&mut self) -> Option<SavedIcon> {
        if self.input.trim().is_empty() {
            debug!("Nothing to save: input is empty");
            return None;
        }

        let result = self
            .history
            .contains(&self.input, self.source, self.target)
            .and_then(|known| {
                if !known {
                    self.history.record(&self.input, self.source, self.target)?;
                }
                self.history.toggle_saved(&self.input, self.source, self.target)
            });

        match result {
            Ok(Some(saved)) => Some(SavedIcon::from(saved)),
            Ok(None) => None,
            Err(e) => {
                error!("Failed to toggle saved state: {}", e);
                None
            }
        }
    }

    /// Star the current triple unless it already is, recording it first if needed
    pub fn star(&mut self) -> Option<SavedIcon> {
        if self.saved_icon() == SavedIcon::Active {
            debug!("Translation is already saved");
            return Some(SavedIcon::Active);
        }
        self.toggle_saved()
    }

    /// Load a history row into the editor and translate it
    pub async fn select_from_history(&mut self, id: i64) -> Option<TranslateOutcome> {
        let record = match self.history.get(id) {
            Ok(Some(record)) => record,
            Ok(None) => {
                warn!("History entry #{} does not exist", id);
                return None;
            }
            Err(e) => {
                error!("Failed to load history entry #{}: {}", id, e);
                return None;
            }
        };

        let (source, target) = match (
            record.source_language.parse::<Language>(),
            record.target_language.parse::<Language>(),
        ) {
            (Ok(source), Ok(target)) => (source, target),
            _ => {
                warn!(
                    "History entry #{} uses unsupported languages {} -> {}",
                    id, record.source_language, record.target_language
                );
                return None;
            }
        };

        self.source = source;
        self.target = target;
        self.set_input(record.text);

        Some(self.translate().await)
    }
}
