//! Storage entity trait

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::domain::DomainError;

/// Trait for types that can be stored
///
/// Entities describe their own shape: the backing table, the full field mapping, and the
/// default values for optional fields. Identity is a storage-assigned integer that stays
/// empty until the entity is first inserted.
pub trait StorageEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    /// Name of the table backing this entity
    const TABLE_NAME: &'static str;

    /// Returns the storage-assigned ID, if the entity has been persisted
    fn id(&self) -> Option<i64>;

    /// Records the ID handed out by the storage backend
    ///
    /// Fails with a conflict if the entity already carries an ID.
    fn assign_id(&mut self, id: i64) -> Result<(), DomainError>;

    /// Every declared field mapped to its current value
    fn fields(&self) -> Map<String, Value>;

    /// Values applied to optional fields omitted at construction
    fn defaults() -> Map<String, Value>;
}
