//! Workflow action handlers
//!
//! One POST endpoint per operator action. Every handler returns the updated
//! Risk; rejections come back as an [`ErrorResponse`](crate::error::ErrorResponse).

use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::HeaderMap,
    Json,
};
use risk_types::*;
use serde::Deserialize;

/// Header naming the user performing the request
pub const ACTOR_HEADER: &str = "x-actor-id";

/// Optional optimistic concurrency token on mutating requests
#[derive(Debug, Default, Deserialize)]
pub struct VersionQuery {
    pub version: Option<u64>,
}

pub(crate) fn actor_id(headers: &HeaderMap) -> Option<UserId> {
    headers
        .get(ACTOR_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(UserId::new)
}

pub(crate) async fn run_command(
    state: &AppState,
    id: String,
    query: Result<Query<VersionQuery>, QueryRejection>,
    headers: &HeaderMap,
    command: WorkflowCommand,
) -> ApiResult<Json<Risk>> {
    let Query(query) = query?;
    let risk = state
        .engine
        .execute(&RiskId::new(id), query.version, actor_id(headers).as_ref(), command)
        .await?;
    Ok(Json(risk))
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload.map(|Json(inner)| inner).map_err(ApiError::from)
}

/// GRC validation of a reported risk
pub async fn validate_risk(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<VersionQuery>, QueryRejection>,
    headers: HeaderMap,
    payload: Result<Json<ValidatePayload>, JsonRejection>,
) -> ApiResult<Json<Risk>> {
    let command = WorkflowCommand::Validate(body(payload)?);
    run_command(&state, id, query, &headers, command).await
}

pub async fn start_assessment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<VersionQuery>, QueryRejection>,
    headers: HeaderMap,
    payload: Result<Json<StartAssessmentPayload>, JsonRejection>,
) -> ApiResult<Json<Risk>> {
    let command = WorkflowCommand::StartAssessment(body(payload)?);
    run_command(&state, id, query, &headers, command).await
}

pub async fn submit_assessment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<VersionQuery>, QueryRejection>,
    headers: HeaderMap,
    payload: Result<Json<AssessmentFields>, JsonRejection>,
) -> ApiResult<Json<Risk>> {
    let command = WorkflowCommand::SubmitAssessment(body(payload)?);
    run_command(&state, id, query, &headers, command).await
}

/// Approve the assessment or send it back for revision
pub async fn review_assessment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<VersionQuery>, QueryRejection>,
    headers: HeaderMap,
    payload: Result<Json<ReviewAssessmentPayload>, JsonRejection>,
) -> ApiResult<Json<Risk>> {
    let command = WorkflowCommand::from_review(body(payload)?);
    run_command(&state, id, query, &headers, command).await
}

/// Patch a declined assessment and resubmit it
pub async fn complete_revision(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<VersionQuery>, QueryRejection>,
    headers: HeaderMap,
    payload: Result<Json<AssessmentFields>, JsonRejection>,
) -> ApiResult<Json<Risk>> {
    let command = WorkflowCommand::CompleteRevision(body(payload)?);
    run_command(&state, id, query, &headers, command).await
}

pub async fn submit_treatment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<VersionQuery>, QueryRejection>,
    headers: HeaderMap,
    payload: Result<Json<SubmitTreatmentPayload>, JsonRejection>,
) -> ApiResult<Json<Risk>> {
    let command = WorkflowCommand::SubmitTreatment(body(payload)?);
    run_command(&state, id, query, &headers, command).await
}

pub async fn assign_approver(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<VersionQuery>, QueryRejection>,
    headers: HeaderMap,
    payload: Result<Json<AssignApproverPayload>, JsonRejection>,
) -> ApiResult<Json<Risk>> {
    let command = WorkflowCommand::AssignApprover(body(payload)?);
    run_command(&state, id, query, &headers, command).await
}

/// Executive approval or denial of an escalated treatment
pub async fn executive_approval(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<VersionQuery>, QueryRejection>,
    headers: HeaderMap,
    payload: Result<Json<ExecutiveReviewPayload>, JsonRejection>,
) -> ApiResult<Json<Risk>> {
    let command = WorkflowCommand::from_executive_review(body(payload)?);
    run_command(&state, id, query, &headers, command).await
}

pub async fn update_mitigation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<VersionQuery>, QueryRejection>,
    headers: HeaderMap,
    payload: Result<Json<UpdateMitigationPayload>, JsonRejection>,
) -> ApiResult<Json<Risk>> {
    let command = WorkflowCommand::UpdateMitigation(body(payload)?);
    run_command(&state, id, query, &headers, command).await
}
