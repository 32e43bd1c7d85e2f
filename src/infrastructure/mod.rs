//! Infrastructure layer - storage backends, team services and logging

pub mod logging;
pub mod storage;
pub mod team;
