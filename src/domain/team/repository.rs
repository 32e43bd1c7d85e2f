//! Team repository trait

use async_trait::async_trait;

use super::entity::{Team, TeamId};
use crate::domain::DomainError;

/// Query parameters for listing teams
#[derive(Debug, Clone, Default)]
pub struct TeamQuery {
    /// Filter by active flag
    pub active: Option<bool>,
    /// Filter by highlighted flag
    pub highlighted: Option<bool>,
    /// Maximum number of results
    pub limit: Option<usize>,
    /// Offset for pagination
    pub offset: Option<usize>,
}

impl TeamQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn with_highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = Some(highlighted);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Check whether a team passes the filters
    pub fn matches(&self, team: &Team) -> bool {
        if let Some(active) = self.active {
            if team.active() != active {
                return false;
            }
        }

        if let Some(highlighted) = self.highlighted {
            if team.highlighted() != highlighted {
                return false;
            }
        }

        true
    }

    /// Apply offset and limit to an already filtered, ordered list
    pub fn paginate(&self, teams: Vec<Team>) -> Vec<Team> {
        let offset = self.offset.unwrap_or(0);
        let limit = self.limit.unwrap_or(usize::MAX);

        teams.into_iter().skip(offset).take(limit).collect()
    }
}

/// Repository for managing teams
#[async_trait]
pub trait TeamRepository: Send + Sync + std::fmt::Debug {
    /// Get a team by ID
    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError>;

    /// Persist a new team, returning it with its assigned ID
    async fn create(&self, team: Team) -> Result<Team, DomainError>;

    /// Update an existing team
    async fn update(&self, team: Team) -> Result<Team, DomainError>;

    /// Delete a team by ID
    async fn delete(&self, id: TeamId) -> Result<bool, DomainError>;

    /// List teams ordered by ID
    async fn list(&self, query: &TeamQuery) -> Result<Vec<Team>, DomainError>;

    /// Count teams matching query
    async fn count(&self, query: &TeamQuery) -> Result<usize, DomainError>;

    /// Check if a team exists
    async fn exists(&self, id: TeamId) -> Result<bool, DomainError>;

    /// Find a team by name, ignoring surrounding whitespace
    async fn find_by_name(&self, name: &str) -> Result<Option<Team>, DomainError>;

    /// Find a team by network address; any spelling of the same address matches
    async fn find_by_ip(&self, ip: &str) -> Result<Option<Team>, DomainError>;

    /// Find the team owning a token
    async fn find_by_token(&self, token: &str) -> Result<Option<Team>, DomainError>;
}


#[cfg(test)]
mod tests {
    use super::mock::MockTeamRepository;
    use super::*;

    fn team(name: &str, ip: &str) -> Team {
        Team::new(name, ip, "").unwrap()
    }

    #[test]
    fn test_query_matches() {
        let active = team("Alpha", "10.0.0.1");
        let inactive = team("Bravo", "10.0.0.2").with_active(false).with_highlighted(true);

        let query = TeamQuery::new().with_active(true);
        assert!(query.matches(&active));
        assert!(!query.matches(&inactive));

        let query = TeamQuery::new().with_highlighted(true);
        assert!(!query.matches(&active));
        assert!(query.matches(&inactive));

        assert!(TeamQuery::new().matches(&active));
    }

    #[test]
    fn test_query_paginate() {
        let teams: Vec<Team> = (1..=5)
            .map(|i| team(&format!("Team {}", i), &format!("10.0.0.{}", i)))
            .collect();

        let page = TeamQuery::new().with_offset(1).with_limit(2).paginate(teams.clone());
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].name(), "Team 2");

        let past_end = TeamQuery::new().with_offset(10).paginate(teams);
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn test_mock_create_and_get() {
        let repo = MockTeamRepository::new();

        let created = repo.create(team("Alpha", "10.0.0.1")).await.unwrap();
        let id = created.team_id().unwrap();

        let fetched = repo.get(id).await.unwrap();
        assert_eq!(fetched.unwrap().name(), "Alpha");
    }

    #[tokio::test]
    async fn test_mock_find_by_token() {
        let repo = MockTeamRepository::new();
        let created = repo.create(team("Alpha", "10.0.0.1")).await.unwrap();

        let found = repo
            .find_by_token(created.token().as_str())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.team_id(), created.team_id());
        assert!(repo.find_by_token("0000000000000000").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mock_update_unsaved() {
        let repo = MockTeamRepository::new();

        let result = repo.update(team("Alpha", "10.0.0.1")).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
