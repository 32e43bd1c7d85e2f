//! In-memory storage implementation

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::storage::{reject_persisted, require_id, Storage, StorageEntity};
use crate::domain::DomainError;

#[derive(Debug)]
struct Table<E> {
    rows: BTreeMap<i64, E>,
    next_id: i64,
}

/// Thread-safe in-memory storage implementation
///
/// IDs are handed out sequentially starting at 1 and are never reused, even after
/// deletes. Useful for testing and development. Data is lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    table: RwLock<Table<E>>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    /// Creates a new empty in-memory storage
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

fn read_lock_error<T>(e: T) -> DomainError
where
    T: std::fmt::Display,
{
    DomainError::storage(format!("Failed to acquire read lock: {}", e))
}

fn write_lock_error<T>(e: T) -> DomainError
where
    T: std::fmt::Display,
{
    DomainError::storage(format!("Failed to acquire write lock: {}", e))
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, id: i64) -> Result<Option<E>, DomainError> {
        let table = self.table.read().map_err(read_lock_error)?;
        Ok(table.rows.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let table = self.table.read().map_err(read_lock_error)?;
        Ok(table.rows.values().cloned().collect())
    }

    async fn insert(&self, mut entity: E) -> Result<E, DomainError> {
        reject_persisted(&entity)?;

        let mut table = self.table.write().map_err(write_lock_error)?;
        let id = table.next_id;

        entity.assign_id(id)?;
        table.rows.insert(id, entity.clone());
        table.next_id += 1;

        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<E, DomainError> {
        let id = require_id(&entity)?;
        let mut table = self.table.write().map_err(write_lock_error)?;

        if !table.rows.contains_key(&id) {
            return Err(DomainError::not_found(format!(
                "Entity {} in '{}' not found",
                id,
                E::TABLE_NAME
            )));
        }

        table.rows.insert(id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let mut table = self.table.write().map_err(write_lock_error)?;
        Ok(table.rows.remove(&id).is_some())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let table = self.table.read().map_err(read_lock_error)?;
        Ok(table.rows.len())
    }

    async fn exists(&self, id: i64) -> Result<bool, DomainError> {
        let table = self.table.read().map_err(read_lock_error)?;
        Ok(table.rows.contains_key(&id))
    }
}
