//! Health check handlers

use axum::{extract::State, http::StatusCode, Json};
use datahub_common::catalog::validate_catalog;
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub checks: HealthChecks,
}

#[derive(Serialize)]
pub struct HealthChecks {
    pub catalog: CheckResult,
}

#[derive(Serialize)]
pub struct CheckResult {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Liveness probe - always returns healthy if server is running
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: datahub_common::VERSION,
    })
}

/// Readiness probe - re-checks the catalog invariants
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let catalog_check = match validate_catalog(state.catalog.as_slice()) {
        Ok(()) => CheckResult {
            status: "up".to_string(),
            projects: Some(state.catalog.len()),
            errors: Vec::new(),
        },
        Err(issues) => CheckResult {
            status: "down".to_string(),
            projects: None,
            errors: issues.iter().map(ToString::to_string).collect(),
        },
    };

    let all_healthy = catalog_check.status == "up";
    let status = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ReadyResponse {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            checks: HealthChecks {
                catalog: catalog_check,
            },
        }),
    )
}
