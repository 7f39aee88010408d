/*!
 * Database connection management.
 *
 * This module owns the single long-lived SQLite connection used by the
 * application. The handle is opened once at startup and closed exactly once,
 * either explicitly through `close()` or when the handle is dropped.
 */

use anyhow::{Context, Result};
use log::{debug, info, warn};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use super::schema;
use crate::errors::StoreError;

/// Default database filename
const DEFAULT_DB_FILENAME: &str = "yatt.db";

/// Default database directory name under user's data directory
const DEFAULT_DB_DIRNAME: &str = "yatt";

/// Owned database connection handle
pub struct DatabaseConnection {
    /// Path to the database file
    db_path: PathBuf,
    /// Connection guarded for exclusive access
    connection: Mutex<Connection>,
}

impl DatabaseConnection {
    /// Create a new database connection at the specified path
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create database directory: {:?}", parent)
                })?;
            }
        }

        info!("Opening database at: {:?}", db_path);

        let conn = Connection::open(&db_path)
            .with_context(|| format!("Failed to open database: {:?}", db_path))?;

        schema::initialize_schema(&conn)?;

        Ok(Self {
            db_path,
            connection: Mutex::new(conn),
        })
    }

    /// Create an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        debug!("Creating in-memory database");

        let conn =
            Connection::open_in_memory().context("Failed to create in-memory database")?;

        schema::initialize_schema(&conn)?;

        Ok(Self {
            db_path: PathBuf::from(":memory:"),
            connection: Mutex::new(conn),
        })
    }

    /// Get the default database path
    pub fn default_database_path() -> Result<PathBuf> {
        // Try to use the system data directory
        let base_dir = dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;

        Ok(base_dir.join(DEFAULT_DB_DIRNAME).join(DEFAULT_DB_FILENAME))
    }

    /// Get the database file path
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.connection
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))
    }

    /// Execute a database operation with the connection
    pub fn execute<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError>,
    {
        let conn = self.lock()?;
        f(&conn)
    }

    /// Begin a transaction and execute operations within it
    ///
    /// The transaction is rolled back when the closure fails.
    pub fn transaction<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&rusqlite::Transaction) -> Result<T, StoreError>,
    {
        let mut conn = self.lock()?;

        let tx = conn.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;

        Ok(result)
    }

    /// Close the connection, reporting any error SQLite raises while closing
    pub fn close(self) -> Result<(), StoreError> {
        let conn = self
            .connection
            .into_inner()
            .map_err(|e| StoreError::Lock(e.to_string()))?;

        info!("Closing database at: {:?}", self.db_path);

        conn.close().map_err(|(_, e)| {
            warn!("Failed to close database cleanly: {}", e);
            StoreError::Storage(e)
        })
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DatabaseStats, StoreError> {
        self.execute(|conn| {
            let record_count: i64 =
                conn.query_row("SELECT COUNT(*) FROM translations", [], |row| row.get(0))?;

            let saved_count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM translations WHERE saved = 1",
                [],
                |row| row.get(0),
            )?;

            // Get file size if not in-memory
            let file_size = if self.db_path.to_string_lossy() != ":memory:" {
                std::fs::metadata(&self.db_path)
                    .map(|m| m.len())
                    .unwrap_or(0)
            } else {
                0
            };

            Ok(DatabaseStats {
                record_count,
                saved_count,
                file_size_bytes: file_size,
            })
        })
    }
}

/// Database statistics
#[derive(Debug, Clone)]
pub struct DatabaseStats {
    /// Number of history rows
    pub record_count: i64,
    /// Number of rows flagged as saved
    pub saved_count: i64,
    /// Database file size in bytes
    pub file_size_bytes: u64,
}

impl std::fmt::Display for DatabaseStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "History: {}, Saved: {}, Size: {} KB",
            self.record_count,
            self.saved_count,
            self.file_size_bytes / 1024
        )
    }
}
