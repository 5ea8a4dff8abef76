use std::sync::Arc;
use tracing::{info, warn};

use super::errors::{DomainError, DomainResult};
use super::models::{Child, ChildChanges, NewChild};
use crate::storage::ChildStorage;

/// Service for managing the children enrolled in the daycare
#[derive(Clone)]
pub struct ChildService {
    storage: Arc<dyn ChildStorage>,
}

impl ChildService {
    pub fn new(storage: Arc<dyn ChildStorage>) -> Self {
        Self { storage }
    }

    /// Create a new child
    pub async fn create_child(&self, child: NewChild) -> DomainResult<Child> {
        info!("Creating child: name={}, birthday={}", child.name, child.birthday);

        let child = self.storage.store_child(&child).await?;

        info!("Created child: {} with ID: {}", child.name, child.id);
        Ok(child)
    }

    /// Get a child by ID
    pub async fn get_child(&self, child_id: i64) -> DomainResult<Child> {
        info!("Getting child: {}", child_id);

        match self.storage.get_child(child_id).await? {
            Some(child) => Ok(child),
            None => {
                warn!("Child not found: {}", child_id);
                Err(DomainError::NotFound { entity: "Child", id: child_id })
            }
        }
    }

    /// List all children
    pub async fn list_children(&self) -> DomainResult<Vec<Child>> {
        info!("Listing all children");

        let children = self.storage.list_children().await?;

        info!("Found {} children", children.len());
        Ok(children)
    }

    /// Apply changes to an existing child, keeping unspecified fields
    pub async fn update_child(&self, child_id: i64, changes: ChildChanges) -> DomainResult<Child> {
        info!("Updating child: {}", child_id);

        let child = self.get_child(child_id).await?.apply(changes);

        if !self.storage.update_child(&child).await? {
            warn!("Child disappeared during update: {}", child_id);
            return Err(DomainError::NotFound { entity: "Child", id: child_id });
        }

        info!("Updated child: {} with ID: {}", child.name, child.id);
        Ok(child)
    }

    /// Delete a child and, through the storage cascade, its journal entries
    pub async fn delete_child(&self, child_id: i64) -> DomainResult<()> {
        info!("Deleting child: {}", child_id);

        if !self.storage.delete_child(child_id).await? {
            warn!("Child not found: {}", child_id);
            return Err(DomainError::NotFound { entity: "Child", id: child_id });
        }

        info!("Deleted child with ID: {}", child_id);
        Ok(())
    }
}
