//! Team service for team management

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::team::{
    canonical_team_ip, validate_logo_path, validate_team_name, Team, TeamId, TeamQuery,
    TeamRepository, TOKEN_LENGTH,
};
use crate::domain::DomainError;

/// Attempts at drawing a token no other team holds
const MAX_TOKEN_ATTEMPTS: usize = 5;

/// Request for creating a new team
///
/// There is deliberately no token field: tokens are only ever issued by the service.
#[derive(Debug, Clone)]
pub struct CreateTeamRequest {
    pub name: String,
    pub ip: String,
    pub logo_path: Option<String>,
    pub highlighted: Option<bool>,
    pub active: Option<bool>,
}

/// Request for updating a team
#[derive(Debug, Clone, Default)]
pub struct UpdateTeamRequest {
    pub name: Option<String>,
    pub ip: Option<String>,
    pub logo_path: Option<String>,
    pub highlighted: Option<bool>,
    pub active: Option<bool>,
}

/// Team service for managing teams
#[derive(Debug)]
pub struct TeamService<R: TeamRepository> {
    repository: Arc<R>,
}

impl<R: TeamRepository> TeamService<R> {
    /// Create a new team service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Create a new team with a freshly issued token
    pub async fn create(&self, request: CreateTeamRequest) -> Result<Team, DomainError> {
        info!(name = %request.name, ip = %request.ip, "Creating team");

        let name = request.name.trim();
        validate_team_name(name).map_err(|e| DomainError::validation(e.to_string()))?;
        let ip =
            canonical_team_ip(&request.ip).map_err(|e| DomainError::validation(e.to_string()))?;

        let logo_path = request.logo_path.unwrap_or_default();
        validate_logo_path(&logo_path).map_err(|e| DomainError::validation(e.to_string()))?;

        self.ensure_name_available(name, None).await?;
        self.ensure_ip_available(&ip, None).await?;

        let mut team = self.issue(name, &ip, &logo_path).await?;

        if let Some(highlighted) = request.highlighted {
            team.set_highlighted(highlighted);
        }

        if let Some(active) = request.active {
            team.set_active(active);
        }

        let team = self.repository.create(team).await?;
        info!(team = %team, "Team created");

        Ok(team)
    }

    /// Get a team by ID
    pub async fn get(&self, id: &str) -> Result<Option<Team>, DomainError> {
        let team_id = parse_id(id)?;
        self.repository.get(team_id).await
    }

    /// List teams
    pub async fn list(&self, query: Option<TeamQuery>) -> Result<Vec<Team>, DomainError> {
        self.repository.list(&query.unwrap_or_default()).await
    }

    /// Count teams
    pub async fn count(&self, query: Option<TeamQuery>) -> Result<usize, DomainError> {
        self.repository.count(&query.unwrap_or_default()).await
    }

    /// Update a team; the token is never touched
    pub async fn update(&self, id: &str, request: UpdateTeamRequest) -> Result<Team, DomainError> {
        info!(id = %id, "Updating team");

        let team_id = parse_id(id)?;

        let mut team = self
            .repository
            .get(team_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Team '{}' not found", id)))?;

        if let Some(name) = request.name {
            team.set_name(name)
                .map_err(|e| DomainError::validation(e.to_string()))?;
            self.ensure_name_available(team.name(), Some(team_id)).await?;
        }

        if let Some(ip) = request.ip {
            team.set_ip(ip)
                .map_err(|e| DomainError::validation(e.to_string()))?;
            self.ensure_ip_available(team.ip(), Some(team_id)).await?;
        }

        if let Some(logo_path) = request.logo_path {
            team.set_logo_path(logo_path)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        if let Some(highlighted) = request.highlighted {
            team.set_highlighted(highlighted);
        }

        if let Some(active) = request.active {
            team.set_active(active);
        }

        self.repository.update(team).await
    }

    /// Delete a team
    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        info!(id = %id, "Deleting team");

        let team_id = parse_id(id)?;
        self.repository.delete(team_id).await
    }

    /// Resolve the team owning a presented token
    pub async fn authenticate(&self, token: &str) -> Result<Option<Team>, DomainError> {
        if token.len() != TOKEN_LENGTH {
            debug!("Rejecting token with unexpected length");
            return Ok(None);
        }

        let team = self.repository.find_by_token(token).await?;

        match &team {
            Some(team) => debug!(team = %team, "Token authenticated"),
            None => debug!("Unknown team token presented"),
        }

        Ok(team)
    }

    /// Build an unsaved team whose token no existing team holds
    async fn issue(&self, name: &str, ip: &str, logo_path: &str) -> Result<Team, DomainError> {
        for attempt in 1..=MAX_TOKEN_ATTEMPTS {
            let team = Team::new(name, ip, logo_path)
                .map_err(|e| DomainError::validation(e.to_string()))?;

            if self
                .repository
                .find_by_token(team.token().as_str())
                .await?
                .is_none()
            {
                return Ok(team);
            }

            warn!(attempt, "Issued team token collided with an existing team");
        }

        Err(DomainError::internal("Could not issue a unique team token"))
    }

    async fn ensure_name_available(
        &self,
        name: &str,
        owner: Option<TeamId>,
    ) -> Result<(), DomainError> {
        match self.repository.find_by_name(name).await? {
            Some(existing) if existing.team_id() != owner => Err(DomainError::conflict(format!(
                "Team name '{}' is already taken",
                name
            ))),
            _ => Ok(()),
        }
    }

    async fn ensure_ip_available(&self, ip: &str, owner: Option<TeamId>) -> Result<(), DomainError> {
        match self.repository.find_by_ip(ip).await? {
            Some(existing) if existing.team_id() != owner => Err(DomainError::conflict(format!(
                "IP address '{}' is already assigned to another team",
                ip
            ))),
            _ => Ok(()),
        }
    }
}

fn parse_id(id: &str) -> Result<TeamId, DomainError> {
    id.parse::<TeamId>()
        .map_err(|e| DomainError::invalid_id(e.to_string()))
}
