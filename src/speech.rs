/*!
 * Text-to-speech and speech-to-text collaborators.
 *
 * Both are delegated to external programs configured by the user, in the
 * same way media tools are driven through `Command` elsewhere. The
 * orchestration layer only sees the two traits.
 */

use async_trait::async_trait;
use log::debug;
use std::io::ErrorKind;
use std::process::Output;
use tokio::process::Command;

use crate::errors::{RecognitionError, SpeechError};

/// Placeholder replaced by the text to speak
const TEXT_PLACEHOLDER: &str = "{text}";

/// Placeholder replaced by the recognition language tag
const LANG_PLACEHOLDER: &str = "{lang}";

/// Speaks text aloud
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Speak the given text, returning once playback has finished
    async fn speak(&self, text: &str) -> Result<(), SpeechError>;
}

/// Captures voice input and returns its transcript
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Listen on the default input device and transcribe in the given language
    async fn listen_and_transcribe(&self, language_tag: &str) -> Result<String, RecognitionError>;
}

/// Substitute `placeholder` in `args`, or append `value` when it is absent
fn expand_args(args: &[String], placeholder: &str, value: &str) -> Vec<String> {
    if args.iter().any(|a| a.contains(placeholder)) {
        args.iter().map(|a| a.replace(placeholder, value)).collect()
    } else {
        let mut expanded = args.to_vec();
        expanded.push(value.to_string());
        expanded
    }
}

async fn run_program(program: &str, args: &[String]) -> std::io::Result<Output> {
    debug!("Running {} {:?}", program, args);
    Command::new(program).args(args).output().await
}

/// Synthesizer backed by a TTS program such as `espeak` or `say`
#[derive(Debug, Clone)]
pub struct CommandSynthesizer {
    program: String,
    args: Vec<String>,
}

impl CommandSynthesizer {
    /// Create a synthesizer; `{text}` in `args` is replaced by the text,
    /// otherwise the text is passed as the last argument
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for CommandSynthesizer {
    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        if self.program.is_empty() {
            return Err(SpeechError::BackendUnavailable(
                "no text-to-speech command configured".to_string(),
            ));
        }

        let args = expand_args(&self.args, TEXT_PLACEHOLDER, text);
        let output = run_program(&self.program, &args).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                SpeechError::BackendUnavailable(format!("{} not found", self.program))
            } else {
                SpeechError::BackendUnavailable(e.to_string())
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SpeechError::PlaybackFailed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

/// Recognizer backed by a speech-to-text program printing the transcript to stdout
#[derive(Debug, Clone)]
pub struct CommandRecognizer {
    program: Option<String>,
    args: Vec<String>,
}

impl CommandRecognizer {
    /// Create a recognizer; `{lang}` in `args` is replaced by the language
    /// tag, otherwise the tag is passed as the last argument
    pub fn new(program: Option<String>, args: Vec<String>) -> Self {
        Self { program, args }
    }
}

#[async_trait]
impl SpeechRecognizer for CommandRecognizer {
    async fn listen_and_transcribe(&self, language_tag: &str) -> Result<String, RecognitionError> {
        let program = self.program.as_deref().filter(|p| !p.is_empty()).ok_or_else(|| {
            RecognitionError::BackendUnavailable("no speech-to-text command configured".to_string())
        })?;

        let args = expand_args(&self.args, LANG_PLACEHOLDER, language_tag);
        let output = run_program(program, &args).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                RecognitionError::BackendUnavailable(format!("{} not found", program))
            } else {
                RecognitionError::BackendUnavailable(e.to_string())
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RecognitionError::Unrecognized(stderr.trim().to_string()));
        }

        let transcript = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if transcript.is_empty() {
            return Err(RecognitionError::Silence);
        }

        Ok(transcript)
    }
}
