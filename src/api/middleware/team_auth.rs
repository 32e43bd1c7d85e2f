//! Participant authentication extractor
//!
//! Teams authenticate with the token issued when they were created, sent as
//! `Authorization: Bearer <token>` or `X-Team-Token: <token>`.

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::team::Team;

use super::token::extract_token;

pub const TEAM_TOKEN_HEADER: &str = "x-team-token";

/// Extractor that resolves the calling team from its token
///
/// Inactive teams are rejected.
#[derive(Debug, Clone)]
pub struct RequireTeam(pub Team);

impl FromRequestParts<AppState> for RequireTeam {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers, TEAM_TOKEN_HEADER)?.ok_or_else(|| {
            ApiError::unauthorized(
                "Team token required. Provide via 'Authorization: Bearer <token>' or 'X-Team-Token: <token>' header",
            )
        })?;

        let team = state
            .team_service
            .authenticate(&token)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::unauthorized("Invalid team token"))?;

        if !team.active() {
            debug!(team = %team, "Rejecting inactive team");
            return Err(ApiError::unauthorized("Team is not active"));
        }

        Ok(RequireTeam(team))
    }
}
