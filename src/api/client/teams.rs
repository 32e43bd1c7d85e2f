//! Participant team endpoints

use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::api::middleware::RequireTeam;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::team::{Team, TeamQuery};

/// Filters accepted by the participant list endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientTeamsParams {
    pub highlighted: Option<bool>,
}

/// Participant list response
#[derive(Debug, Clone, Serialize)]
pub struct ClientTeamsResponse {
    pub teams: Vec<Map<String, Value>>,
}

/// GET /api/client/teams
///
/// Only active teams are listed.
pub async fn list_teams(
    State(state): State<AppState>,
    Query(params): Query<ClientTeamsParams>,
) -> Result<Json<ClientTeamsResponse>, ApiError> {
    let query = TeamQuery {
        active: Some(true),
        highlighted: params.highlighted,
        ..TeamQuery::default()
    };

    let teams = state.team_service.list(Some(query)).await?;

    Ok(Json(ClientTeamsResponse {
        teams: teams.iter().map(Team::to_participant_fields).collect(),
    }))
}

/// GET /api/client/teams/{team_id}
pub async fn get_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<Map<String, Value>>, ApiError> {
    debug!(team_id = %team_id, "Participant getting team");

    let team = state
        .team_service
        .get(&team_id)
        .await?
        .filter(Team::active)
        .ok_or_else(|| ApiError::not_found(format!("Team '{}' not found", team_id)))?;

    Ok(Json(team.to_participant_fields()))
}

/// GET /api/client/teams/me
///
/// The calling team, resolved from its token.
pub async fn current_team(RequireTeam(team): RequireTeam) -> Json<Map<String, Value>> {
    Json(team.to_participant_fields())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_serialization_has_no_token() {
        let team = Team::new("Alpha", "10.0.0.1", "").unwrap();
        let response = ClientTeamsResponse {
            teams: vec![team.to_participant_fields()],
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"name\":\"Alpha\""));
        assert!(!json.contains("token"));
        assert!(!json.contains(team.token().as_str()));
    }
}
