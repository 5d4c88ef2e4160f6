//! Health and status handlers

use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{extract::State, http::Uri, Json};
use risk_types::Phase;
use serde::Serialize;
use std::collections::BTreeMap;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub version: String,
    pub uptime: String,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime: state.uptime(),
    })
}

/// Daemon status response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaemonStatusResponse {
    pub status: String,
    pub version: String,
    pub uptime: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub total_risks: usize,
    /// Risk count per derived phase
    pub by_phase: BTreeMap<&'static str, usize>,
    pub recorded_transitions: usize,
}

/// Daemon status endpoint
pub async fn daemon_status(State(state): State<AppState>) -> ApiResult<Json<DaemonStatusResponse>> {
    let risks = state.engine.list_risks().await?;

    let mut by_phase = BTreeMap::new();
    for risk in &risks {
        let phase: Phase = state.engine.phase(risk);
        *by_phase.entry(phase.as_str()).or_insert(0) += 1;
    }

    Ok(Json(DaemonStatusResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime: state.uptime(),
        started_at: state.started_at,
        total_risks: risks.len(),
        by_phase,
        recorded_transitions: state.provenance.total_events().await,
    }))
}

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
