//! # Storage Traits
//!
//! Storage abstractions used by the domain services, so that the services
//! never depend on a concrete database.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{Child, JournalEntry, JournalEntryFields, NewChild};

/// Trait defining the interface for child storage operations
#[async_trait]
pub trait ChildStorage: Send + Sync {
    /// Store a new child and return it with its assigned id
    async fn store_child(&self, child: &NewChild) -> Result<Child>;

    /// Retrieve a specific child by ID
    async fn get_child(&self, child_id: i64) -> Result<Option<Child>>;

    /// List all children ordered by id
    async fn list_children(&self) -> Result<Vec<Child>>;

    /// Update an existing child.
    /// Returns false if no child with that id exists
    async fn update_child(&self, child: &Child) -> Result<bool>;

    /// Delete a child together with its journal entries.
    /// Returns false if no child with that id exists
    async fn delete_child(&self, child_id: i64) -> Result<bool>;
}

/// Trait defining the interface for journal entry storage operations
#[async_trait]
pub trait JournalStorage: Send + Sync {
    /// Store a new entry and return it with its assigned id
    async fn store_entry(&self, fields: &JournalEntryFields) -> Result<JournalEntry>;

    /// Retrieve a specific entry by ID
    async fn get_entry(&self, entry_id: i64) -> Result<Option<JournalEntry>>;

    /// List all entries ordered by id
    async fn list_entries(&self) -> Result<Vec<JournalEntry>>;

    /// List entries whose child is currently flagged as studying, ordered by id
    async fn list_study_entries(&self) -> Result<Vec<JournalEntry>>;

    /// Overwrite all fields of an existing entry.
    /// Returns false if no entry with that id exists
    async fn update_entry(&self, entry: &JournalEntry) -> Result<bool>;

    /// Delete an entry. Returns false if no entry with that id exists
    async fn delete_entry(&self, entry_id: i64) -> Result<bool>;
}
