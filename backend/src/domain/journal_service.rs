//! # Journal Service
//!
//! Check-in/check-out journal operations. Every create and update runs the
//! referenced child check and then [`journal_validator::resolve`] before the
//! storage is touched, so a rejected request never leaves a partial write.
//!
//! The study view (`list_study_entries`) is recomputed on every call.

use std::sync::Arc;
use tracing::{info, warn};

use super::errors::{DomainError, DomainResult, FieldErrors, REQUIRED};
use super::journal_validator;
use super::models::{JournalEntry, JournalEntryChanges, JournalEntryFields};
use crate::storage::{ChildStorage, JournalStorage};

#[derive(Clone)]
pub struct JournalService {
    journal: Arc<dyn JournalStorage>,
    children: Arc<dyn ChildStorage>,
}

impl JournalService {
    pub fn new(journal: Arc<dyn JournalStorage>, children: Arc<dyn ChildStorage>) -> Self {
        Self { journal, children }
    }

    /// Create a journal entry from the proposed changes.
    ///
    /// `changes.child_id` is required; the other fields default to absent.
    pub async fn create_entry(&self, changes: JournalEntryChanges) -> DomainResult<JournalEntry> {
        let child_id = changes
            .child_id
            .ok_or_else(|| FieldErrors::single("child_id", REQUIRED))?;
        info!("Creating journal entry for child: {}", child_id);

        self.ensure_child_exists(child_id).await?;
        let fields = self.resolve(&JournalEntryFields::empty(child_id), &changes)?;

        let entry = self.journal.store_entry(&fields).await?;

        info!("Created journal entry: {} for child: {}", entry.id, child_id);
        Ok(entry)
    }

    /// Get a journal entry by ID
    pub async fn get_entry(&self, entry_id: i64) -> DomainResult<JournalEntry> {
        info!("Getting journal entry: {}", entry_id);

        match self.journal.get_entry(entry_id).await? {
            Some(entry) => Ok(entry),
            None => {
                warn!("Journal entry not found: {}", entry_id);
                Err(DomainError::NotFound { entity: "Journal entry", id: entry_id })
            }
        }
    }

    /// List every journal entry
    pub async fn list_entries(&self) -> DomainResult<Vec<JournalEntry>> {
        info!("Listing journal entries");

        let entries = self.journal.list_entries().await?;

        info!("Found {} journal entries", entries.len());
        Ok(entries)
    }

    /// List the entries of children currently flagged as studying
    pub async fn list_study_entries(&self) -> DomainResult<Vec<JournalEntry>> {
        info!("Listing journal entries of studying children");

        let entries = self.journal.list_study_entries().await?;

        info!("Found {} journal entries of studying children", entries.len());
        Ok(entries)
    }

    /// Merge `changes` into the stored entry and persist the result
    pub async fn update_entry(
        &self,
        entry_id: i64,
        changes: JournalEntryChanges,
    ) -> DomainResult<JournalEntry> {
        info!("Updating journal entry: {}", entry_id);

        let current = self.get_entry(entry_id).await?;

        if let Some(child_id) = changes.child_id {
            if child_id != current.fields.child_id {
                self.ensure_child_exists(child_id).await?;
            }
        }

        let entry = JournalEntry {
            id: entry_id,
            fields: self.resolve(&current.fields, &changes)?,
        };

        if !self.journal.update_entry(&entry).await? {
            warn!("Journal entry disappeared during update: {}", entry_id);
            return Err(DomainError::NotFound { entity: "Journal entry", id: entry_id });
        }

        info!("Updated journal entry: {}", entry_id);
        Ok(entry)
    }

    /// Delete a journal entry
    pub async fn delete_entry(&self, entry_id: i64) -> DomainResult<()> {
        info!("Deleting journal entry: {}", entry_id);

        if !self.journal.delete_entry(entry_id).await? {
            warn!("Journal entry not found: {}", entry_id);
            return Err(DomainError::NotFound { entity: "Journal entry", id: entry_id });
        }

        info!("Deleted journal entry: {}", entry_id);
        Ok(())
    }

    async fn ensure_child_exists(&self, child_id: i64) -> DomainResult<()> {
        if self.children.get_child(child_id).await?.is_none() {
            warn!("Journal entry references unknown child: {}", child_id);
            return Err(FieldErrors::single(
                "child_id",
                format!("Invalid pk \"{}\" - object does not exist.", child_id),
            )
            .into());
        }
        Ok(())
    }

    fn resolve(
        &self,
        current: &JournalEntryFields,
        changes: &JournalEntryChanges,
    ) -> DomainResult<JournalEntryFields> {
        journal_validator::resolve(current, changes).map_err(|violations| {
            warn!("Rejected journal entry: {:?}", violations);
            DomainError::InvalidJournalEntry(violations)
        })
    }
}
