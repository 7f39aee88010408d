/*!
 * Repository layer for the translation history table.
 *
 * This module provides the data-access API the history service builds on,
 * abstracting away the SQL details and providing type-safe access.
 */

use anyhow::Result;
use log::debug;
use rusqlite::{Connection, OptionalExtension, params};

use super::connection::{DatabaseConnection, DatabaseStats};
use super::models::{SavedFlag, TranslationRecord};
use crate::errors::StoreError;

/// Repository for translation history rows
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Close the underlying connection
    pub fn close(self) -> Result<(), StoreError> {
        self.db.close()
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Append a new row and return its id
    pub fn append(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
        saved: bool,
    ) -> Result<i64, StoreError> {
        self.db
            .execute(|conn| insert_row(conn, text, source_language, target_language, saved))
    }

    /// Append a new row that inherits the saved flag of the latest matching row
    ///
    /// The lookup and the insert run in one transaction.
    pub fn append_carrying_saved(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<i64, StoreError> {
        self.db.transaction(|tx| {
            let saved = select_saved_flag(tx, text, source_language, target_language)?
                .is_some_and(|flag| flag.saved);
            insert_row(tx, text, source_language, target_language, saved)
        })
    }

    /// Set the saved flag on exactly one row
    pub fn set_saved(&self, id: i64, saved: bool) -> Result<(), StoreError> {
        self.db.execute(|conn| {
            let updated = conn.execute(
                "UPDATE translations SET saved = ?1 WHERE id = ?2",
                params![saved, id],
            )?;

            if updated == 0 {
                return Err(StoreError::NotFound { id });
            }
            Ok(())
        })
    }

    /// Delete every row, returning how many were removed
    pub fn clear_all(&self) -> Result<usize, StoreError> {
        self.db.execute(|conn| {
            let deleted = conn.execute("DELETE FROM translations", [])?;
            debug!("Cleared {} history rows", deleted);
            Ok(deleted)
        })
    }

    /// Reset the saved flag on every row, returning how many rows changed
    pub fn clear_saved_flags(&self) -> Result<usize, StoreError> {
        self.db.execute(|conn| {
            let updated = conn.execute("UPDATE translations SET saved = 0 WHERE saved = 1", [])?;
            debug!("Unsaved {} history rows", updated);
            Ok(updated)
        })
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Id and saved flag of the most recently inserted row matching the triple
    pub fn find_saved_flag(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<Option<SavedFlag>, StoreError> {
        self.db
            .execute(|conn| select_saved_flag(conn, text, source_language, target_language))
    }

    /// Get a single row by id
    pub fn get(&self, id: i64) -> Result<Option<TranslationRecord>, StoreError> {
        self.db.execute(|conn| {
            let sql = format!(
                "SELECT {} FROM translations WHERE id = ?1",
                TranslationRecord::COLUMNS
            );
            let record = conn
                .query_row(&sql, [id], TranslationRecord::from_row)
                .optional()?;
            Ok(record)
        })
    }

    /// All rows in insertion order
    pub fn query_all(&self) -> Result<Vec<TranslationRecord>, StoreError> {
        self.query_records(&format!(
            "SELECT {} FROM translations ORDER BY id ASC",
            TranslationRecord::COLUMNS
        ))
    }

    /// Every row flagged as saved, in insertion order
    pub fn query_saved(&self) -> Result<Vec<TranslationRecord>, StoreError> {
        self.query_records(&format!(
            "SELECT {} FROM translations WHERE saved = 1 ORDER BY id ASC",
            TranslationRecord::COLUMNS
        ))
    }

    /// Saved rows that are also the latest row of their triple, in insertion order
    pub fn query_saved_latest(&self) -> Result<Vec<TranslationRecord>, StoreError> {
        self.query_records(&format!(
            r#"
            SELECT {}
            FROM translations AS t
            WHERE t.saved = 1
              AND t.id = (
                  SELECT MAX(u.id)
                  FROM translations AS u
                  WHERE u.text = t.text
                    AND u.input_lang = t.input_lang
                    AND u.output_lang = t.output_lang
              )
            ORDER BY t.id ASC
            "#,
            TranslationRecord::COLUMNS
        ))
    }

    /// Row and file statistics
    pub fn stats(&self) -> Result<DatabaseStats, StoreError> {
        self.db.stats()
    }

    fn query_records(&self, sql: &str) -> Result<Vec<TranslationRecord>, StoreError> {
        self.db.execute(|conn| {
            let mut stmt = conn.prepare(sql)?;
            let records = stmt
                .query_map([], TranslationRecord::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(records)
        })
    }
}

fn insert_row(
    conn: &Connection,
    text: &str,
    source_language: &str,
    target_language: &str,
    saved: bool,
) -> Result<i64, StoreError> {
    let now = chrono::Utc::now().to_rfc3339();

    conn.execute(
        r#"
        INSERT INTO translations (text, input_lang, output_lang, saved, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
        params![text, source_language, target_language, saved, now],
    )?;
    let id = conn.last_insert_rowid();
    debug!(
        "Appended translation #{} ({} -> {}, saved={})",
        id, source_language, target_language, saved
    );
    Ok(id)
}

fn select_saved_flag(
    conn: &Connection,
    text: &str,
    source_language: &str,
    target_language: &str,
) -> Result<Option<SavedFlag>, StoreError> {
    let flag = conn
        .query_row(
            r#"
            SELECT id, saved
            FROM translations
            WHERE text = ?1 AND input_lang = ?2 AND output_lang = ?3
            ORDER BY id DESC
            LIMIT 1
            "#,
            params![text, source_language, target_language],
            |row| {
                Ok(SavedFlag {
                    id: row.get(0)?,
                    saved: row.get::<_, i64>(1)? != 0,
                })
            },
        )
        .optional()?;
    Ok(flag)
}
