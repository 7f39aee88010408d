use anyhow::{Context, Result, anyhow};
use log::{debug, error, info, warn};
use std::fmt;
use std::path::PathBuf;

use crate::app_config::Config;
use crate::database::{DatabaseConnection, Repository, TranslationRecord};
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::history_service::{HistoryService, SavedIcon};
use crate::language_utils::Language;
use crate::providers::{self, Translator};
use crate::speech::{CommandRecognizer, CommandSynthesizer, SpeechRecognizer, SpeechSynthesizer};
use crate::translation::{Orchestrator, TranslateOutcome};

// @module: Application controller and command boundary

/// Which text pane to read aloud
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakTarget {
    Input,
    Output,
}

/// Commands accepted from the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Translate the current input, replacing it first when text is given
    Translate(Option<String>),
    /// Exchange languages and texts, then translate
    Swap,
    /// Empty both texts
    Clear,
    /// Star or unstar the current translation
    Save,
    /// Star the current translation, leaving it starred if it already is
    Star,
    /// Load the input text from a file
    OpenFile(PathBuf),
    /// Write the output text to a file (`translate.txt` when unset)
    SaveFile(Option<PathBuf>),
    /// Read a pane aloud
    Speak(SpeakTarget),
    /// Replace the input with a voice transcript
    VoiceInput,
    /// List the full history
    ShowHistory,
    /// List saved translations
    ShowSaved,
    /// Delete the whole history; ignored unless confirmed
    DeleteHistory { confirmed: bool },
    /// Unstar every translation
    DeleteSaved,
    /// Load a history entry into the editor and translate it
    SelectFromList(i64),
    SetSource(Language),
    SetTarget(Language),
    Status,
    Help,
    Quit,
}

impl Command {
    /// Parse one line of interactive input
    ///
    /// Lines starting with `:` are commands, anything else is text to translate.
    pub fn parse_line(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let Some(rest) = line.strip_prefix(':') else {
            return Ok(Some(Self::Translate(Some(line.to_string()))));
        };

        let mut parts = rest.splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

        let command = match (name, arg) {
            ("translate" | "t", text) => Self::Translate(text.map(str::to_string)),
            ("swap", None) => Self::Swap,
            ("clear", None) => Self::Clear,
            ("save", None) => Self::Save,
            ("star", None) => Self::Star,
            ("open", Some(path)) => Self::OpenFile(PathBuf::from(path)),
            ("write", path) => Self::SaveFile(path.map(PathBuf::from)),
            ("speak", None | Some("out" | "output")) => Self::Speak(SpeakTarget::Output),
            ("speak", Some("in" | "input")) => Self::Speak(SpeakTarget::Input),
            ("listen", None) => Self::VoiceInput,
            ("history", None) => Self::ShowHistory,
            ("saved", None) => Self::ShowSaved,
            ("delete-history", None) => Self::DeleteHistory { confirmed: false },
            ("delete-history", Some("--yes")) => Self::DeleteHistory { confirmed: true },
            ("delete-saved", None) => Self::DeleteSaved,
            ("select", Some(id)) => Self::SelectFromList(
                id.parse()
                    .with_context(|| format!("Invalid history id: {}", id))?,
            ),
            ("from", Some(lang)) => Self::SetSource(lang.parse()?),
            ("to", Some(lang)) => Self::SetTarget(lang.parse()?),
            ("status", None) => Self::Status,
            ("help" | "h", None) => Self::Help,
            ("quit" | "q" | "exit", None) => Self::Quit,
            _ => return Err(anyhow!("Unknown command: {}", line)),
        };

        Ok(Some(command))
    }
}

/// Shell help text
pub const HELP_TEXT: &str = "\
Type text to translate it, or one of:
  :translate [text]        translate the current input (or the given text)
  :swap                    swap languages and texts, then translate
  :clear                   clear input and output
  :save                    star or unstar the current translation
  :star                    star the current translation
  :open <path>             load input from a file
  :write [path]            write output to a file (default translate.txt)
  :speak [in|out]          read input or output aloud
  :listen                  voice input in the source language
  :history                 show the translation history
  :saved                   show saved translations
  :delete-history --yes    delete the whole history
  :delete-saved            unstar all translations
  :select <id>             translate a history entry again
  :from <lang> / :to <lang> change languages (ru, en, ja, de)
  :status                  show languages, counter and saved state
  :quit                    exit";

/// Result of a dispatched command
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    /// New output text with the saved indicator for it
    Translation { text: String, saved: SavedIcon },
    /// Translation refused because the input is over budget
    Blocked { length: usize, max: usize },
    /// History or saved list
    Records(Vec<TranslationRecord>),
    /// Saved indicator after starring or unstarring
    SavedState(SavedIcon),
    /// Informational line for the user
    Message(String),
    /// The command had no visible effect
    Nothing,
    /// The session should end
    Quit,
}

impl fmt::Display for CommandOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Translation { text, saved } => {
                let star = if *saved == SavedIcon::Active { "★ " } else { "" };
                write!(f, "{}{}", star, text)
            }
            Self::Blocked { length, max } => {
                write!(f, "Text is too long: {}/{} symbols", length, max)
            }
            Self::Records(records) if records.is_empty() => write!(f, "(empty)"),
            Self::Records(records) => {
                let lines: Vec<String> = records.iter().map(|r| r.to_string()).collect();
                write!(f, "{}", lines.join("\n"))
            }
            Self::SavedState(SavedIcon::Active) => write!(f, "★ saved"),
            Self::SavedState(SavedIcon::Inactive) => write!(f, "☆ not saved"),
            Self::Message(message) => write!(f, "{}", message),
            Self::Nothing | Self::Quit => Ok(()),
        }
    }
}

fn saved_output(icon: Option<SavedIcon>) -> CommandOutput {
    icon.map_or(CommandOutput::Nothing, CommandOutput::SavedState)
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    orchestrator: Orchestrator,
    synthesizer: Box<dyn SpeechSynthesizer>,
    recognizer: Box<dyn SpeechRecognizer>,
}

impl Controller {
    // @method: Create a controller from configuration, opening the history database
    pub fn with_config(config: Config) -> Result<Self> {
        let db_path = config.database_path()?;
        let connection = DatabaseConnection::new(&db_path)
            .with_context(|| format!("Failed to open history database: {:?}", db_path))?;
        let history = HistoryService::new(Repository::new(connection));

        let translator = providers::create_translator(&config.translation);
        let synthesizer = CommandSynthesizer::new(
            config.speech.tts_command.clone(),
            config.speech.tts_args.clone(),
        );
        let recognizer = CommandRecognizer::new(
            config.speech.stt_command.clone(),
            config.speech.stt_args.clone(),
        );

        info!(
            "Using {} with history at {:?}",
            config.translation.provider.display_name(),
            db_path
        );

        Ok(Self::with_components(
            config,
            translator,
            history,
            Box::new(synthesizer),
            Box::new(recognizer),
        ))
    }

    /// Create a controller from explicit collaborators
    pub fn with_components(
        config: Config,
        translator: Box<dyn Translator>,
        history: HistoryService,
        synthesizer: Box<dyn SpeechSynthesizer>,
        recognizer: Box<dyn SpeechRecognizer>,
    ) -> Self {
        let orchestrator = Orchestrator::new(
            translator,
            history,
            config.max_symbols,
            config.source_language,
            config.target_language,
        );

        Self {
            config,
            orchestrator,
            synthesizer,
            recognizer,
        }
    }

    /// Create a new controller for test purposes: in-memory history, mock translator
    pub fn new_for_test() -> Result<Self> {
        let config = Config::default();
        Ok(Self::with_components(
            config,
            Box::new(providers::mock::MockTranslator::working()),
            HistoryService::new_in_memory()?,
            Box::new(CommandSynthesizer::new(String::new(), Vec::new())),
            Box::new(CommandRecognizer::new(None, Vec::new())),
        ))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    pub fn orchestrator_mut(&mut self) -> &mut Orchestrator {
        &mut self.orchestrator
    }

    /// Run one command to completion
    ///
    /// Failures are logged and leave the editor state unchanged.
    pub async fn dispatch(&mut self, command: Command) -> CommandOutput {
        debug!("Dispatching {:?}", command);

        match self.execute(command).await {
            Ok(output) => output,
            Err(e) => {
                error!("{}", e);
                CommandOutput::Nothing
            }
        }
    }

    async fn execute(&mut self, command: Command) -> Result<CommandOutput, AppError> {
        let output = match command {
            Command::Translate(text) => {
                if let Some(text) = text {
                    self.orchestrator.set_input(text);
                }
                let outcome = self.orchestrator.translate().await;
                self.translation_output(outcome)
            }
            Command::Swap => {
                let outcome = self.orchestrator.swap().await;
                self.translation_output(outcome)
            }
            Command::Clear => {
                self.orchestrator.clear();
                CommandOutput::Nothing
            }
            Command::Save => saved_output(self.orchestrator.toggle_saved()),
            Command::Star => saved_output(self.orchestrator.star()),
            Command::OpenFile(path) => self.open_file(path)?,
            Command::SaveFile(path) => self.save_file(path)?,
            Command::Speak(target) => self.speak(target).await?,
            Command::VoiceInput => self.voice_input().await?,
            Command::ShowHistory => {
                CommandOutput::Records(self.orchestrator.history().list_history()?)
            }
            Command::ShowSaved => CommandOutput::Records(self.orchestrator.history().list_saved()?),
            Command::DeleteHistory { confirmed } => self.delete_history(confirmed)?,
            Command::DeleteSaved => {
                let count = self.orchestrator.history().clear_saved()?;
                CommandOutput::Message(format!("Unstarred {} entries", count))
            }
            Command::SelectFromList(id) => match self.orchestrator.select_from_history(id).await {
                Some(outcome) => self.translation_output(outcome),
                None => CommandOutput::Nothing,
            },
            Command::SetSource(language) => {
                self.orchestrator.set_source(language);
                CommandOutput::Message(format!("Source language: {}", language.display_name()))
            }
            Command::SetTarget(language) => {
                self.orchestrator.set_target(language);
                CommandOutput::Message(format!("Target language: {}", language.display_name()))
            }
            Command::Status => CommandOutput::Message(self.status_line()),
            Command::Help => CommandOutput::Message(HELP_TEXT.to_string()),
            Command::Quit => CommandOutput::Quit,
        };

        Ok(output)
    }

    fn translation_output(&self, outcome: TranslateOutcome) -> CommandOutput {
        match outcome {
            TranslateOutcome::Translated { text, .. } => CommandOutput::Translation {
                text,
                saved: self.orchestrator.saved_icon(),
            },
            TranslateOutcome::Blocked { length, max } => CommandOutput::Blocked { length, max },
            TranslateOutcome::Failed => CommandOutput::Nothing,
        }
    }

    fn open_file(&mut self, path: PathBuf) -> Result<CommandOutput, AppError> {
        let content =
            FileManager::read_to_string(&path).map_err(|e| AppError::File(format!("{:#}", e)))?;

        self.orchestrator.set_input(content);
        info!("Loaded {:?} ({})", path, self.orchestrator.symbol_counter());
        Ok(CommandOutput::Message(format!(
            "Loaded {} symbols from {}",
            self.orchestrator.input_len(),
            path.display()
        )))
    }

    fn save_file(&self, path: Option<PathBuf>) -> Result<CommandOutput, AppError> {
        let path = path.unwrap_or_else(FileManager::default_save_path);
        FileManager::write_to_file(&path, self.orchestrator.output())
            .map_err(|e| AppError::File(format!("{:#}", e)))?;

        info!("Saved translation to {:?}", path);
        Ok(CommandOutput::Message(format!("Saved to {}", path.display())))
    }

    async fn speak(&self, target: SpeakTarget) -> Result<CommandOutput, AppError> {
        let text = match target {
            SpeakTarget::Input => self.orchestrator.input(),
            SpeakTarget::Output => self.orchestrator.output(),
        };
        if text.trim().is_empty() {
            debug!("Nothing to speak");
            return Ok(CommandOutput::Nothing);
        }

        self.synthesizer.speak(text).await?;
        Ok(CommandOutput::Nothing)
    }

    async fn voice_input(&mut self) -> Result<CommandOutput, AppError> {
        let tag = self.orchestrator.source().recognition_tag();
        info!("Listening ({})...", tag);

        let transcript = self.recognizer.listen_and_transcribe(&tag).await?;
        self.orchestrator.set_input(transcript.clone());
        Ok(CommandOutput::Message(transcript))
    }

    fn delete_history(&self, confirmed: bool) -> Result<CommandOutput, AppError> {
        if !confirmed {
            warn!("History deletion not confirmed");
            return Ok(CommandOutput::Message(
                "This deletes the whole history; repeat with --yes to confirm".to_string(),
            ));
        }

        let count = self.orchestrator.history().clear_history()?;
        Ok(CommandOutput::Message(format!("Deleted {} entries", count)))
    }

    /// Languages, symbol counter and saved indicator
    pub fn status_line(&self) -> String {
        let orchestrator = &self.orchestrator;
        format!(
            "{} -> {} | {} | {} | {}",
            orchestrator.source().display_name(),
            orchestrator.target().display_name(),
            orchestrator.symbol_counter(),
            orchestrator.state(),
            orchestrator.saved_icon()
        )
    }

    /// Close the history database
    pub fn shutdown(self) -> Result<()> {
        self.orchestrator
            .into_history()
            .close()
            .context("Failed to close history database")
    }
}
