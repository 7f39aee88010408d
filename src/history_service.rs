/*!
 * Translation history service.
 *
 * Turns raw store operations into the semantics the presentation layer
 * needs: recording translations, starring them, and the two list views.
 * Nothing is cached here; every query re-reads the store.
 */

use log::{debug, info};
use std::fmt;

use crate::database::{DatabaseStats, Repository, TranslationRecord};
use crate::errors::StoreError;
use crate::language_utils::Language;

/// Saved-state indicator for the current triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavedIcon {
    /// The most recent matching row is saved
    Active,
    /// No matching row, or it is not saved
    Inactive,
}

impl SavedIcon {
    /// Icon name as used by the presentation layer
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl From<bool> for SavedIcon {
    fn from(saved: bool) -> Self {
        if saved { Self::Active } else { Self::Inactive }
    }
}

impl fmt::Display for SavedIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Business logic over the translation history store
pub struct HistoryService {
    repository: Repository,
}

impl HistoryService {
    /// Create a service owning the given repository
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a service over an in-memory database (for testing)
    pub fn new_in_memory() -> anyhow::Result<Self> {
        Ok(Self::new(Repository::new_in_memory()?))
    }

    /// Record a successful translation and return the new row id
    ///
    /// A new row is always appended. When the triple was seen before, the
    /// new row inherits the saved flag of the most recent matching row.
    pub fn record(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<i64, StoreError> {
        let id = self
            .repository
            .append_carrying_saved(text, source.code(), target.code())?;
        debug!("Recorded translation #{}", id);
        Ok(id)
    }

    /// Flip the saved flag of the most recent row matching the triple
    ///
    /// Returns the new flag, or `None` when the triple was never recorded.
    pub fn toggle_saved(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<Option<bool>, StoreError> {
        let Some(flag) = self
            .repository
            .find_saved_flag(text, source.code(), target.code())?
        else {
            debug!("Nothing to toggle for {} -> {}", source, target);
            return Ok(None);
        };

        let saved = !flag.saved;
        self.repository.set_saved(flag.id, saved)?;
        debug!("Translation #{} saved={}", flag.id, saved);

        Ok(Some(saved))
    }

    /// Saved indicator for the triple, `Inactive` when it was never recorded
    pub fn current_saved_icon(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<SavedIcon, StoreError> {
        let flag = self
            .repository
            .find_saved_flag(text, source.code(), target.code())?;

        Ok(flag.map_or(SavedIcon::Inactive, |f| SavedIcon::from(f.saved)))
    }

    /// Whether the triple has at least one row
    pub fn contains(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<bool, StoreError> {
        Ok(self
            .repository
            .find_saved_flag(text, source.code(), target.code())?
            .is_some())
    }

    /// Full history, oldest first
    pub fn list_history(&self) -> Result<Vec<TranslationRecord>, StoreError> {
        self.repository.query_all()
    }

    /// Saved translations, oldest first, one row per triple
    pub fn list_saved(&self) -> Result<Vec<TranslationRecord>, StoreError> {
        self.repository.query_saved_latest()
    }

    /// Look up a single history row
    pub fn get(&self, id: i64) -> Result<Option<TranslationRecord>, StoreError> {
        self.repository.get(id)
    }

    /// Delete the whole history; confirmation is the caller's job
    pub fn clear_history(&self) -> Result<usize, StoreError> {
        let deleted = self.repository.clear_all()?;
        info!("History cleared ({} entries removed)", deleted);
        Ok(deleted)
    }

    /// Unstar every translation, keeping the rows
    pub fn clear_saved(&self) -> Result<usize, StoreError> {
        let updated = self.repository.clear_saved_flags()?;
        info!("Saved translations cleared ({} entries unstarred)", updated);
        Ok(updated)
    }

    /// Store statistics
    pub fn stats(&self) -> Result<DatabaseStats, StoreError> {
        self.repository.stats()
    }

    /// Close the underlying store
    pub fn close(self) -> Result<(), StoreError> {
        self.repository.close()
    }
}
