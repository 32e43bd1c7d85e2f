//! Storage domain - Generic storage abstraction layer

mod entity;
mod repository;

pub use entity::StorageEntity;
pub use repository::Storage;
pub(crate) use repository::{reject_persisted, require_id};

#[cfg(test)]
pub use repository::mock;
