//! Admin authentication extractor
//!
//! The admin API is guarded by a single shared token taken from `admin.token` in the
//! configuration. It is accepted from either:
//! - `Authorization: Bearer <token>`
//! - `X-Admin-Token: <token>`
//!
//! When no token is configured every admin request is rejected.

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::team::constant_time_compare;

use super::token::extract_token;

pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Extractor that requires the admin token
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.admin_token.as_deref() else {
            warn!("Admin request rejected: no admin token is configured");
            return Err(ApiError::unauthorized("Admin API is disabled"));
        };

        let presented = extract_token(&parts.headers, ADMIN_TOKEN_HEADER)?.ok_or_else(|| {
            ApiError::unauthorized(
                "Admin token required. Provide via 'Authorization: Bearer <token>' or 'X-Admin-Token: <token>' header",
            )
        })?;

        if !constant_time_compare(&presented, expected) {
            debug!("Admin request rejected: token mismatch");
            return Err(ApiError::unauthorized("Invalid admin token"));
        }

        Ok(RequireAdmin)
    }
}
