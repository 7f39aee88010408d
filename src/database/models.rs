/*!
 * Database entity models.
 *
 * These structures map directly to the translations table and provide
 * type-safe access to persisted data.
 */

use rusqlite::Row;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One translation event in the history table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRecord {
    /// Store-assigned, monotonically increasing identifier
    pub id: i64,
    /// Source text submitted for translation
    pub text: String,
    /// Source language code
    pub source_language: String,
    /// Target language code
    pub target_language: String,
    /// Saved/starred flag
    pub saved: bool,
    /// Insert timestamp (RFC 3339), absent on rows from older schemas
    pub created_at: Option<String>,
}

impl TranslationRecord {
    /// Column list matching `from_row`
    pub(crate) const COLUMNS: &'static str =
        "id, text, input_lang, output_lang, saved, created_at";

    /// Map a row selected with `COLUMNS`
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            text: row.get(1)?,
            source_language: row.get(2)?,
            target_language: row.get(3)?,
            saved: row.get::<_, i64>(4)? != 0,
            created_at: row.get(5)?,
        })
    }
}

impl fmt::Display for TranslationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let star = if self.saved { "*" } else { " " };
        write!(
            f,
            "{:>4} {} [{} -> {}] {}",
            self.id, star, self.source_language, self.target_language, self.text
        )
    }
}

/// Id and saved flag of the most recent row matching a triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedFlag {
    /// Row identifier
    pub id: i64,
    /// Saved flag of that row
    pub saved: bool,
}
