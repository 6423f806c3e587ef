//! Health check handlers

use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub checks: HealthChecks,
}

#[derive(Serialize)]
pub struct HealthChecks {
    pub directory: CheckResult,
    pub networks: CheckResult,
}

#[derive(Serialize)]
pub struct CheckResult {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Liveness probe - always returns healthy if server is running
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: collabnet_common::VERSION.to_string(),
    })
}

/// Readiness probe - checks the in-memory corpus and networks
pub async fn ready(State(state): State<AppState>) -> Json<ReadyResponse> {
    let directory = if state.directory.is_empty() {
        CheckResult {
            status: "down".to_string(),
            detail: Some("faculty directory is empty".to_string()),
        }
    } else {
        CheckResult {
            status: "up".to_string(),
            detail: Some(format!("{} members", state.directory.len())),
        }
    };

    let networks = if state.years.is_empty() {
        CheckResult {
            status: "down".to_string(),
            detail: Some("no year networks built".to_string()),
        }
    } else {
        CheckResult {
            status: "up".to_string(),
            detail: Some(format!("{} years", state.years.len())),
        }
    };

    let all_healthy = directory.status == "up" && networks.status == "up";

    Json(ReadyResponse {
        status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
        started_at: state.started_at,
        checks: HealthChecks {
            directory,
            networks,
        },
    })
}
