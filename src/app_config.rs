use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use url::Url;

use crate::database::DatabaseConnection;
use crate::language_utils::Language;
use crate::providers::google::DEFAULT_GOOGLE_ENDPOINT;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language selected on the input side
    #[serde(default = "default_source_language")]
    pub source_language: Language,

    /// Language selected on the output side
    #[serde(default = "default_target_language")]
    pub target_language: Language,

    /// Maximum number of symbols accepted for a single translation
    #[serde(default = "default_max_symbols")]
    pub max_symbols: usize,

    /// History database file; the user data directory is used when unset
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Speech config
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    /// Public Google Translate web endpoint
    #[default]
    Google,
    /// Offline mock translator
    Mock,
}

impl TranslationProvider {
    /// Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Google => "Google Translate",
            Self::Mock => "Mock",
        }
    }

    /// Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Google => "google".to_string(),
            Self::Mock => "mock".to_string(),
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Service endpoint URL (empty means the provider default)
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            endpoint: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TranslationConfig {
    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if !self.endpoint.is_empty() {
            return self.endpoint.clone();
        }

        match self.provider {
            TranslationProvider::Google => DEFAULT_GOOGLE_ENDPOINT.to_string(),
            TranslationProvider::Mock => String::new(),
        }
    }
}

/// External programs used for speech
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpeechConfig {
    /// Text-to-speech program
    #[serde(default = "default_tts_command")]
    pub tts_command: String,

    /// Arguments for the TTS program; `{text}` is replaced by the text
    #[serde(default)]
    pub tts_args: Vec<String>,

    /// Speech-to-text program printing the transcript on stdout
    #[serde(default)]
    pub stt_command: Option<String>,

    /// Arguments for the STT program; `{lang}` is replaced by the language tag
    #[serde(default)]
    pub stt_args: Vec<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            tts_command: default_tts_command(),
            tts_args: Vec::new(),
            stt_command: None,
            stt_args: Vec::new(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_source_language() -> Language {
    Language::Russian
}

fn default_target_language() -> Language {
    Language::English
}

fn default_max_symbols() -> usize {
    3100
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_tts_command() -> String {
    if cfg!(target_os = "macos") {
        "say".to_string()
    } else {
        "espeak".to_string()
    }
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.max_symbols == 0 {
            return Err(anyhow!("max_symbols must be greater than zero"));
        }

        if self.translation.timeout_secs == 0 {
            return Err(anyhow!("Translation timeout must be greater than zero"));
        }

        if self.translation.provider == TranslationProvider::Google {
            let endpoint = self.translation.get_endpoint();
            Url::parse(&endpoint)
                .with_context(|| format!("Invalid translation endpoint: {}", endpoint))?;
        }

        if self.source_language == self.target_language {
            warn!(
                "Source and target language are both {}",
                self.source_language.display_name()
            );
        }

        Ok(())
    }

    /// Resolved history database path
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => DatabaseConnection::default_database_path(),
        }
    }

    /// Load the configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Write the configuration as pretty JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {:?}", path))
    }

    /// Load the configuration, creating a default file when none exists
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Self::default();
        config.save_to_file(path)?;
        Ok(config)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            max_symbols: default_max_symbols(),
            database_path: None,
            translation: TranslationConfig::default(),
            speech: SpeechConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
