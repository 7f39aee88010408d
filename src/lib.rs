/*!
 * # YATT - Yet Another Text Translator
 *
 * A Rust library for translating short texts between a fixed set of
 * languages while keeping a persistent history of every translation.
 *
 * ## Features
 *
 * - Translate text through a pluggable translator (Google web endpoint or mock)
 * - SQLite-backed translation history with starred ("saved") entries
 * - Symbol budget that blocks over-long input before any request is made
 * - Read texts aloud and dictate input through external speech programs
 * - Open input from and save output to plain text files
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `database`: SQLite record store (connection, schema, models, repository)
 * - `history_service`: History semantics on top of the store
 * - `translation`: Orchestrator state machine (Idle, Translating, Blocked)
 * - `providers`: Translator implementations:
 *   - `providers::google`: Google Translate web client
 *   - `providers::mock`: Deterministic offline translator
 * - `speech`: Text-to-speech and speech-to-text collaborators
 * - `app_controller`: Command boundary used by the CLI and the shell
 * - `app_config`: Configuration management
 * - `language_utils`: Supported languages and ISO code helpers
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod database;
pub mod errors;
pub mod file_utils;
pub mod history_service;
pub mod language_utils;
pub mod providers;
pub mod speech;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Command, CommandOutput, Controller};
pub use database::{DatabaseConnection, Repository, TranslationRecord};
pub use errors::{AppError, RecognitionError, SpeechError, StoreError, TranslationError};
pub use history_service::{HistoryService, SavedIcon};
pub use language_utils::{Language, get_language_name, normalize_to_part1};
pub use translation::{Orchestrator, TranslateOutcome, TranslatorState};
