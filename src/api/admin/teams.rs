//! Team management admin endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::team::{Team, TeamQuery};
use crate::infrastructure::team::{CreateTeamRequest, UpdateTeamRequest};

/// Request to create a new team
///
/// Unknown fields are rejected so a client cannot believe it chose the token.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTeamApiRequest {
    pub name: String,
    pub ip: String,
    #[serde(default)]
    pub logo_path: Option<String>,
    #[serde(default)]
    pub highlighted: Option<bool>,
    #[serde(default)]
    pub active: Option<bool>,
}

/// Request to update a team
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTeamApiRequest {
    pub name: Option<String>,
    pub ip: Option<String>,
    pub logo_path: Option<String>,
    pub highlighted: Option<bool>,
    pub active: Option<bool>,
}

/// Filters accepted by the list endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTeamsParams {
    pub active: Option<bool>,
    pub highlighted: Option<bool>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl ListTeamsParams {
    fn filters(&self) -> TeamQuery {
        TeamQuery {
            active: self.active,
            highlighted: self.highlighted,
            ..TeamQuery::default()
        }
    }

    fn page(&self) -> TeamQuery {
        TeamQuery {
            limit: self.limit,
            offset: self.offset,
            ..self.filters()
        }
    }
}

/// Full team view for admins, token included
#[derive(Debug, Clone, Serialize)]
pub struct TeamResponse {
    pub id: Option<i64>,
    pub name: String,
    pub ip: String,
    pub token: String,
    pub highlighted: bool,
    pub active: bool,
    pub logo_path: String,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.team_id().map(|id| id.get()),
            name: team.name().to_string(),
            ip: team.ip().to_string(),
            token: team.token().as_str().to_string(),
            highlighted: team.highlighted(),
            active: team.active(),
            logo_path: team.logo_path().to_string(),
        }
    }
}

/// List teams response
#[derive(Debug, Clone, Serialize)]
pub struct ListTeamsResponse {
    pub teams: Vec<TeamResponse>,
    /// Matching teams before `limit`/`offset`
    pub total: usize,
}

/// GET /admin/teams
pub async fn list_teams(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(params): Query<ListTeamsParams>,
) -> Result<Json<ListTeamsResponse>, ApiError> {
    debug!(?params, "Admin listing teams");

    let teams = state.team_service.list(Some(params.page())).await?;
    let total = state.team_service.count(Some(params.filters())).await?;

    Ok(Json(ListTeamsResponse {
        teams: teams.iter().map(TeamResponse::from).collect(),
        total,
    }))
}

/// POST /admin/teams
pub async fn create_team(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(request): Json<CreateTeamApiRequest>,
) -> Result<(StatusCode, Json<TeamResponse>), ApiError> {
    debug!(name = %request.name, ip = %request.ip, "Admin creating team");

    let service_request = CreateTeamRequest {
        name: request.name,
        ip: request.ip,
        logo_path: request.logo_path,
        highlighted: request.highlighted,
        active: request.active,
    };

    let team = state.team_service.create(service_request).await?;

    Ok((StatusCode::CREATED, Json(TeamResponse::from(&team))))
}

/// GET /admin/teams/{team_id}
pub async fn get_team(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(team_id): Path<String>,
) -> Result<Json<TeamResponse>, ApiError> {
    debug!(team_id = %team_id, "Admin getting team");

    let team = state
        .team_service
        .get(&team_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Team '{}' not found", team_id)))?;

    Ok(Json(TeamResponse::from(&team)))
}

/// PUT /admin/teams/{team_id}
pub async fn update_team(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(team_id): Path<String>,
    Json(request): Json<UpdateTeamApiRequest>,
) -> Result<Json<TeamResponse>, ApiError> {
    debug!(team_id = %team_id, "Admin updating team");

    let service_request = UpdateTeamRequest {
        name: request.name,
        ip: request.ip,
        logo_path: request.logo_path,
        highlighted: request.highlighted,
        active: request.active,
    };

    let team = state.team_service.update(&team_id, service_request).await?;

    Ok(Json(TeamResponse::from(&team)))
}

/// DELETE /admin/teams/{team_id}
pub async fn delete_team(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(team_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    debug!(team_id = %team_id, "Admin deleting team");

    if !state.team_service.delete(&team_id).await? {
        return Err(ApiError::not_found(format!("Team '{}' not found", team_id)));
    }

    Ok(Json(serde_json::json!({
        "deleted": true,
        "id": team_id
    })))
}
