/*!
 * Common test utilities for the yatt test suite
 */

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use yatt::app_config::{Config, TranslationProvider};
use yatt::app_controller::Controller;
use yatt::errors::{RecognitionError, SpeechError};
use yatt::history_service::HistoryService;
use yatt::providers::mock::MockTranslator;
use yatt::speech::{SpeechRecognizer, SpeechSynthesizer};

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Configuration using the mock provider and a database inside `dir`
pub fn test_config(dir: &Path) -> Config {
    let mut config = Config::default();
    config.database_path = Some(dir.join("history.db"));
    config.translation.provider = TranslationProvider::Mock;
    config
}

/// Synthesizer that remembers what it was asked to say
#[derive(Clone, Default)]
pub struct RecordingSynthesizer {
    pub spoken: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl SpeechSynthesizer for RecordingSynthesizer {
    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Recognizer returning a fixed transcript, or silence when none is set
#[derive(Clone, Default)]
pub struct ScriptedRecognizer {
    pub transcript: Option<String>,
    pub tags: Arc<Mutex<Vec<String>>>,
}

impl ScriptedRecognizer {
    pub fn saying(transcript: &str) -> Self {
        Self {
            transcript: Some(transcript.to_string()),
            tags: Arc::default(),
        }
    }
}

#[async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    async fn listen_and_transcribe(&self, language_tag: &str) -> Result<String, RecognitionError> {
        self.tags.lock().unwrap().push(language_tag.to_string());
        self.transcript.clone().ok_or(RecognitionError::Silence)
    }
}

/// Controller over an in-memory store with fake collaborators
pub fn create_test_controller(
    translator: MockTranslator,
    synthesizer: RecordingSynthesizer,
    recognizer: ScriptedRecognizer,
) -> Result<Controller> {
    Ok(Controller::with_components(
        Config::default(),
        Box::new(translator),
        HistoryService::new_in_memory()?,
        Box::new(synthesizer),
        Box::new(recognizer),
    ))
}
