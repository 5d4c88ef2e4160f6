//! Risk resource handlers

use super::workflow::{actor_id, run_command, VersionQuery};
use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{HeaderMap, StatusCode},
    Json,
};
use risk_engine::{ProvenanceRecord, WorkflowView};
use risk_types::*;
use serde::{Deserialize, Deserializer};

/// Filters for listing risks
#[derive(Debug, Default, Deserialize)]
pub struct ListRisksQuery {
    pub phase: Option<Phase>,
    pub status: Option<RiskStatus>,
}

/// List risks, oldest first
pub async fn list_risks(
    State(state): State<AppState>,
    query: Result<Query<ListRisksQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Risk>>> {
    let Query(query) = query?;
    let risks = state
        .engine
        .list_risks()
        .await?
        .into_iter()
        .filter(|r| query.phase.map_or(true, |p| state.engine.phase(r) == p))
        .filter(|r| query.status.map_or(true, |s| r.status == s))
        .collect();
    Ok(Json(risks))
}

/// Report a new risk
pub async fn create_risk(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateRiskPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Risk>)> {
    let Json(payload) = payload?;
    let risk = state
        .engine
        .create_risk(payload, actor_id(&headers).as_ref())
        .await?;
    Ok((StatusCode::CREATED, Json(risk)))
}

pub async fn get_risk(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Risk>> {
    let risk = state.engine.get_risk(&RiskId::new(id)).await?;
    Ok(Json(risk))
}

/// Phase, permitted actions and assignable roles for one risk
pub async fn get_workflow(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<WorkflowView>> {
    let risk = state.engine.get_risk(&RiskId::new(id)).await?;
    Ok(Json(state.engine.workflow_view(&risk)))
}

/// Transition history of one risk, oldest first
pub async fn get_risk_events(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<ProvenanceRecord>>> {
    let risk = state.engine.get_risk(&RiskId::new(id)).await?;
    Ok(Json(state.provenance.events_for(&risk.id).await))
}

/// Body of `PATCH /risks/{id}`.
///
/// Exactly one field must be present; an explicit `null` clears the role.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AssignRoleRequest {
    #[serde(default, deserialize_with = "present")]
    pub reporter_id: Option<Option<UserId>>,
    #[serde(default, deserialize_with = "present")]
    pub grc_sme_id: Option<Option<UserId>>,
    #[serde(default, deserialize_with = "present")]
    pub risk_assessor_id: Option<Option<UserId>>,
    #[serde(default, deserialize_with = "present")]
    pub risk_owner_id: Option<Option<UserId>>,
}

/// Distinguishes `"field": null` (Some(None)) from an absent field (None)
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl AssignRoleRequest {
    pub fn into_payload(self) -> ApiResult<AssignRolePayload> {
        let mut fields = [
            (Role::Reporter, self.reporter_id),
            (Role::GrcSme, self.grc_sme_id),
            (Role::RiskAssessor, self.risk_assessor_id),
            (Role::RiskOwner, self.risk_owner_id),
        ]
        .into_iter()
        .filter_map(|(role, value)| value.map(|user_id| AssignRolePayload { role, user_id }));

        match (fields.next(), fields.next()) {
            (Some(payload), None) => Ok(payload),
            (None, _) => Err(ApiError::BadRequest(
                "expected one of reporterId, grcSmeId, riskAssessorId, riskOwnerId".into(),
            )),
            (Some(_), Some(_)) => Err(ApiError::BadRequest(
                "only one role can be assigned per request".into(),
            )),
        }
    }
}

/// Assign or clear one role on a risk
pub async fn assign_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<VersionQuery>, QueryRejection>,
    headers: HeaderMap,
    payload: Result<Json<AssignRoleRequest>, JsonRejection>,
) -> ApiResult<Json<Risk>> {
    let Json(request) = payload?;
    let command = WorkflowCommand::AssignRole(request.into_payload()?);
    run_command(&state, id, query, &headers, command).await
}
