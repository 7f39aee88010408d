/*!
 * Error types for the yatt application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised by the translation history store
#[derive(Error, Debug)]
pub enum StoreError {
    /// The underlying SQLite storage failed or is unavailable
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// No row exists with the given identifier
    #[error("Translation record not found: {id}")]
    NotFound {
        /// Identifier that was looked up
        id: i64,
    },

    /// The connection mutex was poisoned by a panicking holder
    #[error("Failed to acquire database lock: {0}")]
    Lock(String),
}

/// Errors returned by an external translation provider
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The HTTP request could not be sent or timed out
    #[error("Translation request failed: {0}")]
    RequestFailed(String),

    /// The provider answered with a non-success status
    #[error("Translation provider responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error body returned by the provider
        message: String,
    },

    /// The response body did not have the expected shape
    #[error("Failed to parse translation response: {0}")]
    ParseError(String),
}

/// Errors from the text-to-speech backend
#[derive(Error, Debug)]
pub enum SpeechError {
    /// No audio backend is installed or it could not be started
    #[error("No speech backend available: {0}")]
    BackendUnavailable(String),

    /// The backend ran but reported a failure
    #[error("Speech playback failed: {0}")]
    PlaybackFailed(String),
}

/// Errors from voice capture and speech-to-text
#[derive(Error, Debug)]
pub enum RecognitionError {
    /// No recognizer is installed or it could not be started
    #[error("No speech recognizer available: {0}")]
    BackendUnavailable(String),

    /// Listening timed out or only silence was captured
    #[error("No speech detected")]
    Silence,

    /// Speech was captured but could not be transcribed
    #[error("Speech not recognized: {0}")]
    Unrecognized(String),
}

/// Errors surfaced by the command boundary
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from opening or saving a text file
    #[error("File error: {0}")]
    File(String),

    /// Error from the history store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Error from speech playback
    #[error("Speech error: {0}")]
    Speech(#[from] SpeechError),

    /// Error from voice input
    #[error("Recognition error: {0}")]
    Recognition(#[from] RecognitionError),
}
