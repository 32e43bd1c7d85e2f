//! Liveness and readiness probes

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::api::types::Json;

use super::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<ComponentCheck>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Outcome of probing one dependency
#[derive(Debug, Serialize)]
pub struct ComponentCheck {
    pub name: &'static str,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub latency_ms: u64,
}

impl HealthResponse {
    fn new(checks: Vec<ComponentCheck>) -> Self {
        let status = if checks.iter().all(|c| c.status == HealthStatus::Healthy) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };

        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self.status {
            HealthStatus::Healthy => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// GET /health - process is up, no dependency checks
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse::new(Vec::new()))
}

/// GET /ready - the team store answers queries
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse::new(vec![check_team_store(&state).await]);
    (response.status_code(), Json(response))
}

/// GET /live
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

async fn check_team_store(state: &AppState) -> ComponentCheck {
    let start = Instant::now();
    let result = state.team_service.count(None).await;
    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => ComponentCheck {
            name: "team_store",
            status: HealthStatus::Healthy,
            message: None,
            latency_ms,
        },
        Err(e) => ComponentCheck {
            name: "team_store",
            status: HealthStatus::Unhealthy,
            message: Some(e.to_string()),
            latency_ms,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(status: HealthStatus) -> ComponentCheck {
        ComponentCheck {
            name: "team_store",
            status,
            message: None,
            latency_ms: 1,
        }
    }

    #[test]
    fn test_no_checks_is_healthy() {
        let response = HealthResponse::new(Vec::new());

        assert_eq!(response.status, HealthStatus::Healthy);
        assert_eq!(response.status_code(), StatusCode::OK);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "healthy");
        assert!(json.get("checks").is_none());
    }

    #[test]
    fn test_failed_check_is_unhealthy() {
        let response = HealthResponse::new(vec![check(HealthStatus::Unhealthy)]);

        assert_eq!(response.status, HealthStatus::Unhealthy);
        assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "unhealthy");
        assert_eq!(json["checks"][0]["name"], "team_store");
    }
}
