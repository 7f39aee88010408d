/*!
 * Database schema definitions and migrations.
 *
 * This module contains the SQL schema for the translation history table
 * and handles schema migrations for version upgrades.
 */

use anyhow::{Context, Result};
use log::{debug, info};
use rusqlite::Connection;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 2;

/// Initialize the database schema
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        info!("Initializing database schema v{}", SCHEMA_VERSION);
        create_all_tables(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else if current_version < SCHEMA_VERSION {
        info!(
            "Migrating database schema from v{} to v{}",
            current_version, SCHEMA_VERSION
        );
        migrate_schema(conn, current_version)?;
    } else {
        debug!("Database schema is up to date (v{})", current_version);
    }

    Ok(())
}

/// Get the current schema version from the database
fn get_schema_version(conn: &Connection) -> Result<i32> {
    let table_exists: bool = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_version'",
            [],
            |row| row.get(0),
        )
        .context("Failed to check schema_version table existence")?;

    if !table_exists {
        // A bare translations table predates versioning
        return Ok(if translations_table_exists(conn)? { 1 } else { 0 });
    }

    let version: i32 = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .unwrap_or(0);

    Ok(version)
}

fn translations_table_exists(conn: &Connection) -> Result<bool> {
    let exists: bool = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='translations'",
        [],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// Set the schema version in the database
fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO schema_version (id, version, updated_at) VALUES (1, ?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

fn create_schema_version_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            version INTEGER NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Create all database tables
fn create_all_tables(conn: &Connection) -> Result<()> {
    create_schema_version_table(conn)?;

    // No uniqueness on (text, input_lang, output_lang): repeated
    // translations of the same triple append new rows.
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS translations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            text TEXT NOT NULL,
            input_lang TEXT NOT NULL,
            output_lang TEXT NOT NULL,
            saved INTEGER NOT NULL DEFAULT 0,
            created_at TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_translations_triple ON translations(text, input_lang, output_lang);
        CREATE INDEX IF NOT EXISTS idx_translations_saved ON translations(saved);
        "#,
    )?;

    info!("Database schema created successfully");
    Ok(())
}

/// v1 -> v2: the unversioned table gains a timestamp column and lookup indexes
///
/// v1 stored German under the Dutch code `nl`; those rows are rewritten to `de`.
fn migrate_v1_to_v2(conn: &Connection) -> Result<()> {
    create_schema_version_table(conn)?;
    conn.execute_batch(
        r#"
        ALTER TABLE translations ADD COLUMN created_at TEXT;

        UPDATE translations SET input_lang = 'de' WHERE input_lang = 'nl';
        UPDATE translations SET output_lang = 'de' WHERE output_lang = 'nl';

        CREATE INDEX IF NOT EXISTS idx_translations_triple ON translations(text, input_lang, output_lang);
        CREATE INDEX IF NOT EXISTS idx_translations_saved ON translations(saved);
        "#,
    )?;
    Ok(())
}

/// Migrate the schema from one version to another
fn migrate_schema(conn: &Connection, from_version: i32) -> Result<()> {
    let mut current = from_version;

    while current < SCHEMA_VERSION {
        match current {
            1 => {
                migrate_v1_to_v2(conn)?;
                current = 2;
            }
            _ => {
                return Err(anyhow::anyhow!(
                    "Unknown schema version: {}. Cannot migrate.",
                    current
                ));
            }
        }
    }

    set_schema_version(conn, SCHEMA_VERSION)?;
    info!("Schema migration completed to v{}", SCHEMA_VERSION);
    Ok(())
}
