//! Storage-backed team repository implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::storage::{Storage, StorageEntity};
use crate::domain::team::{canonical_team_ip, Team, TeamId, TeamQuery, TeamRepository};
use crate::domain::DomainError;

/// Storage-backed implementation of TeamRepository
#[derive(Debug)]
pub struct StorageTeamRepository {
    storage: Arc<dyn Storage<Team>>,
}

impl StorageTeamRepository {
    /// Create a new storage-backed repository
    pub fn new(storage: Arc<dyn Storage<Team>>) -> Self {
        Self { storage }
    }

    async fn find(&self, predicate: impl Fn(&Team) -> bool) -> Result<Option<Team>, DomainError> {
        let teams = self.storage.list().await?;
        Ok(teams.into_iter().find(|team| predicate(team)))
    }
}

#[async_trait]
impl TeamRepository for StorageTeamRepository {
    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        self.storage.get(id.get()).await
    }

    async fn create(&self, team: Team) -> Result<Team, DomainError> {
        self.storage.insert(team).await
    }

    async fn update(&self, team: Team) -> Result<Team, DomainError> {
        let id = team
            .id()
            .ok_or_else(|| DomainError::validation(format!("{} has not been saved yet", team)))?;

        if !self.storage.exists(id).await? {
            return Err(DomainError::not_found(format!("Team '{}' not found", id)));
        }

        self.storage.update(team).await
    }

    async fn delete(&self, id: TeamId) -> Result<bool, DomainError> {
        self.storage.delete(id.get()).await
    }

    async fn list(&self, query: &TeamQuery) -> Result<Vec<Team>, DomainError> {
        let mut teams: Vec<Team> = self
            .storage
            .list()
            .await?
            .into_iter()
            .filter(|team| query.matches(team))
            .collect();

        teams.sort_by_key(|team| team.id());

        Ok(query.paginate(teams))
    }

    async fn count(&self, query: &TeamQuery) -> Result<usize, DomainError> {
        let teams = self.storage.list().await?;
        Ok(teams.iter().filter(|team| query.matches(team)).count())
    }

    async fn exists(&self, id: TeamId) -> Result<bool, DomainError> {
        self.storage.exists(id.get()).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Team>, DomainError> {
        let name = name.trim();
        self.find(|team| team.name().trim() == name).await
    }

    async fn find_by_ip(&self, ip: &str) -> Result<Option<Team>, DomainError> {
        let Ok(wanted) = canonical_team_ip(ip) else {
            return Ok(None);
        };

        // Rows written before addresses were canonicalised may hold another spelling
        self.find(|team| canonical_team_ip(team.ip()).is_ok_and(|stored| stored == wanted))
            .await
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Team>, DomainError> {
        self.find(|team| team.token().matches(token)).await
    }
}
