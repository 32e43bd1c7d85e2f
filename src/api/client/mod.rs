//! Participant-facing endpoints
//!
//! Everything served here is built from the participant view of a team and never
//! carries a token.

pub mod teams;

use axum::{routing::get, Router};

use super::state::AppState;

/// Create participant API router
pub fn create_client_router() -> Router<AppState> {
    Router::new()
        .route("/teams", get(teams::list_teams))
        .route("/teams/me", get(teams::current_team))
        .route("/teams/{team_id}", get(teams::get_team))
}
