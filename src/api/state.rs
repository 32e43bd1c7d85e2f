//! Application state for shared services

use std::sync::Arc;

use crate::domain::team::{Team, TeamQuery, TeamRepository};
use crate::domain::DomainError;
use crate::infrastructure::team::{CreateTeamRequest, TeamService, UpdateTeamRequest};

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub team_service: Arc<dyn TeamServiceTrait>,
    /// Token required by the admin API; `None` locks the admin API entirely
    pub admin_token: Option<Arc<str>>,
}

impl AppState {
    pub fn new(team_service: Arc<dyn TeamServiceTrait>, admin_token: Option<&str>) -> Self {
        Self {
            team_service,
            admin_token: admin_token.map(Arc::from),
        }
    }
}

/// Trait for team service operations
#[async_trait::async_trait]
pub trait TeamServiceTrait: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<Team>, DomainError>;
    async fn list(&self, query: Option<TeamQuery>) -> Result<Vec<Team>, DomainError>;
    async fn count(&self, query: Option<TeamQuery>) -> Result<usize, DomainError>;
    async fn create(&self, request: CreateTeamRequest) -> Result<Team, DomainError>;
    async fn update(&self, id: &str, request: UpdateTeamRequest) -> Result<Team, DomainError>;
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
    async fn authenticate(&self, token: &str) -> Result<Option<Team>, DomainError>;
}

#[async_trait::async_trait]
impl<R: TeamRepository + 'static> TeamServiceTrait for TeamService<R> {
    async fn get(&self, id: &str) -> Result<Option<Team>, DomainError> {
        TeamService::get(self, id).await
    }

    async fn list(&self, query: Option<TeamQuery>) -> Result<Vec<Team>, DomainError> {
        TeamService::list(self, query).await
    }

    async fn count(&self, query: Option<TeamQuery>) -> Result<usize, DomainError> {
        TeamService::count(self, query).await
    }

    async fn create(&self, request: CreateTeamRequest) -> Result<Team, DomainError> {
        TeamService::create(self, request).await
    }

    async fn update(&self, id: &str, request: UpdateTeamRequest) -> Result<Team, DomainError> {
        TeamService::update(self, id, request).await
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        TeamService::delete(self, id).await
    }

    async fn authenticate(&self, token: &str) -> Result<Option<Team>, DomainError> {
        TeamService::authenticate(self, token).await
    }
}
