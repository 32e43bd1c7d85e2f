//! Storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::StorageEntity;

/// Generic storage trait for CRUD operations on any entity type
///
/// The storage backend owns identity: `insert` assigns the ID, every other
/// operation addresses entities by it.
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Retrieves an entity by its ID
    async fn get(&self, id: i64) -> Result<Option<E>, DomainError>;

    /// Retrieves all entities ordered by ID
    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Persists a new entity and returns it with its assigned ID
    ///
    /// Entities that already carry an ID are rejected.
    async fn insert(&self, entity: E) -> Result<E, DomainError>;

    /// Updates an existing entity, returns error if not found
    async fn update(&self, entity: E) -> Result<E, DomainError>;

    /// Deletes an entity by its ID, returns true if deleted
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;

    /// Checks if an entity exists by its ID
    async fn exists(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.get(id).await?.is_some())
    }

    /// Returns the count of entities
    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.list().await?.len())
    }
}

pub(crate) fn require_id<E: StorageEntity>(entity: &E) -> Result<i64, DomainError> {
    entity.id().ok_or_else(|| {
        DomainError::validation(format!(
            "Cannot update an unsaved entity in '{}'",
            E::TABLE_NAME
        ))
    })
}

pub(crate) fn reject_persisted<E: StorageEntity>(entity: &E) -> Result<(), DomainError> {
    match entity.id() {
        Some(id) => Err(DomainError::conflict(format!(
            "Entity {} in '{}' is already persisted",
            id,
            E::TABLE_NAME
        ))),
        None => Ok(()),
    }
}
