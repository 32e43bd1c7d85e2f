//! Team registry for attack/defense competitions
//!
//! Keeps the roster of competing teams: their network address, display flags and the
//! secret token each team authenticates with. Admins manage teams over HTTP with the
//! token visible; participants only ever see the redacted view.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use domain::team::Team;
use infrastructure::storage::StorageFactory;
use infrastructure::team::{StorageTeamRepository, TeamService};

/// Create the application state with all services initialized
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_config = config.storage.to_storage_config()?;
    info!(backend = ?storage_config.storage_type(), "Initializing team storage");

    let storage = StorageFactory::create::<Team>(&storage_config).await?;
    let repository = Arc::new(StorageTeamRepository::new(storage));
    let team_service = Arc::new(TeamService::new(repository));

    Ok(AppState::new(team_service, config.admin.token()))
}
