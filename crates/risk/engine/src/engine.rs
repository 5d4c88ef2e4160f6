//! Risk Workflow Engine: the main entry point
//!
//! The engine ties the pure state machine to its collaborators. For every
//! command it:
//! 1. Loads the Risk and checks the caller's expected version
//! 2. Checks the precondition, then the payload
//! 3. Resolves every referenced user through the directory
//! 4. Applies the transition to a copy and saves it with compare-and-swap
//! 5. Emits a [`WorkflowEvent`]
//!
//! A command either fully applies or fully rejects.

use crate::{
    actions, derive_phase, NotificationSink, RiskStore, StateMachine, UserDirectory,
    WorkflowEvent,
};
use chrono::Utc;
use risk_types::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Engine settings
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub phase_mode: PhaseMode,
}

/// Read-only snapshot of where a risk stands in the workflow
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowView {
    pub risk_id: RiskId,
    pub phase: Phase,
    pub phase_ordinal: Option<u8>,
    pub available_actions: Vec<ActionKey>,
    pub assignable_roles: Vec<Role>,
    /// For a decided treatment, whether the decision needs executive
    /// sign-off; before a decision, whether a non-mitigate decision would
    pub escalation_required: bool,
    pub version: u64,
}

/// The risk workflow engine
#[derive(Clone)]
pub struct RiskWorkflowEngine {
    store: Arc<dyn RiskStore>,
    directory: Arc<dyn UserDirectory>,
    sink: Arc<dyn NotificationSink>,
    state_machine: StateMachine,
    config: EngineConfig,
}

impl RiskWorkflowEngine {
    pub fn new(
        store: Arc<dyn RiskStore>,
        directory: Arc<dyn UserDirectory>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            store,
            directory,
            sink,
            state_machine: StateMachine::new(),
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub async fn get_risk(&self, id: &RiskId) -> WorkflowResult<Risk> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| WorkflowError::RiskNotFound(id.clone()))
    }

    pub async fn list_risks(&self) -> WorkflowResult<Vec<Risk>> {
        Ok(self.store.list().await?)
    }

    pub fn phase(&self, risk: &Risk) -> Phase {
        derive_phase(risk, self.config.phase_mode)
    }

    pub fn available_actions(&self, risk: &Risk) -> Vec<ActionKey> {
        actions::available_actions(risk)
    }

    pub fn workflow_view(&self, risk: &Risk) -> WorkflowView {
        let phase = self.phase(risk);
        let escalation_required = match risk.treatment.as_ref().and_then(|t| t.decision) {
            Some(decision) => risk.requires_executive_approval(decision),
            None => risk.inherent_risk.is_above_escalation_threshold(),
        };
        WorkflowView {
            risk_id: risk.id.clone(),
            phase,
            phase_ordinal: phase.ordinal(),
            available_actions: actions::available_actions(risk),
            assignable_roles: actions::assignable_roles(risk),
            escalation_required,
            version: risk.version,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Create a newly reported risk in `risk_identified`
    pub async fn create_risk(
        &self,
        payload: CreateRiskPayload,
        actor: Option<&UserId>,
    ) -> WorkflowResult<Risk> {
        payload.validate().map_err(WorkflowError::Validation)?;
        self.resolve_references(payload.user_references()).await?;

        let (Some(title), Some(inherent_risk)) = (payload.title, payload.inherent_risk) else {
            return Err(WorkflowError::Validation(ValidationErrors::new()));
        };
        let mut risk = Risk::new(title.trim(), inherent_risk);
        risk.description = payload.description;
        risk.reporter_id = payload.reporter_id.or_else(|| actor.cloned());
        risk.grc_sme_id = payload.grc_sme_id;

        let risk = self.store.insert(risk).await?;
        tracing::info!(
            risk_id = %risk.id,
            inherent_risk = %risk.inherent_risk,
            "Risk reported"
        );
        Ok(risk)
    }

    /// Run one workflow command against a stored risk.
    ///
    /// `expected_version`, when given, must equal the stored version.
    /// `actor` is recorded on the emitted event only.
    pub async fn execute(
        &self,
        risk_id: &RiskId,
        expected_version: Option<u64>,
        actor: Option<&UserId>,
        command: WorkflowCommand,
    ) -> WorkflowResult<Risk> {
        let action = command.action_key();
        match self
            .execute_inner(risk_id, expected_version, actor, &command)
            .await
        {
            Ok(risk) => Ok(risk),
            Err(err) => {
                tracing::warn!(
                    risk_id = %risk_id,
                    action = %action,
                    code = err.code(),
                    error = %err,
                    "Transition rejected"
                );
                Err(err)
            }
        }
    }

    async fn execute_inner(
        &self,
        risk_id: &RiskId,
        expected_version: Option<u64>,
        actor: Option<&UserId>,
        command: &WorkflowCommand,
    ) -> WorkflowResult<Risk> {
        let risk = self.get_risk(risk_id).await?;

        if let Some(expected) = expected_version {
            if expected != risk.version {
                return Err(WorkflowError::ConcurrentModification {
                    risk_id: risk_id.clone(),
                    expected,
                    actual: risk.version,
                });
            }
        }

        self.state_machine.check(&risk, command)?;
        self.resolve_references(command.user_references()).await?;

        let mut next = risk.clone();
        self.state_machine.apply(&mut next, command, Utc::now())?;
        let saved = self.store.save(next, risk.version).await?;

        let event = WorkflowEvent {
            risk_id: saved.id.clone(),
            action: command.action_key(),
            from: risk.state_summary(),
            to: saved.state_summary(),
            phase: self.phase(&saved),
            actor: actor.cloned(),
            occurred_at: saved.updated_at,
            version: saved.version,
        };
        tracing::info!(
            risk_id = %saved.id,
            action = %event.action,
            to = %event.to,
            version = saved.version,
            "Transition applied"
        );
        self.emit(&event).await;

        Ok(saved)
    }

    async fn resolve_references(&self, refs: Vec<(&'static str, &UserId)>) -> WorkflowResult<()> {
        for (field, user_id) in refs {
            if self.directory.resolve(user_id).await?.is_none() {
                return Err(WorkflowError::UnresolvedReference {
                    field: field.to_string(),
                    user_id: user_id.clone(),
                });
            }
        }
        Ok(())
    }

    async fn emit(&self, event: &WorkflowEvent) {
        if let Err(err) = self.sink.notify(event).await {
            tracing::warn!(
                risk_id = %event.risk_id,
                action = %event.action,
                error = %err,
                "Notification failed"
            );
        }
    }
}
