//! Domain layer - entities, value objects, and repository contracts

pub mod error;
pub mod storage;
pub mod team;

pub use error::DomainError;
pub use team::{Team, TeamId, TeamToken};
