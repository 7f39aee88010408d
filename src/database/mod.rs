/*!
 * Database module for persistent storage of the translation history.
 *
 * This module provides SQLite-based persistence for:
 * - Every successful translation (source text and language pair)
 * - The saved/starred flag shown in the saved view
 */

pub mod schema;
pub mod connection;
pub mod repository;
pub mod models;

// Re-export main types
pub use connection::{DatabaseConnection, DatabaseStats};
pub use models::{SavedFlag, TranslationRecord};
pub use repository::Repository;
