//! The Risk aggregate
//!
//! A Risk owns at most one Assessment and at most one Treatment. User
//! fields are weak references resolved through the directory on write.

use crate::{Assessment, InherentRisk, RiskId, RiskStatus, Role, Treatment, TreatmentDecision, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Root aggregate of the risk workflow
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Risk {
    pub id: RiskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: RiskStatus,
    pub inherent_risk: InherentRisk,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporter_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grc_sme_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_assessor_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_owner_id: Option<UserId>,

    /// Reason recorded by GRC at validation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment: Option<Assessment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment: Option<Treatment>,

    /// Optimistic concurrency token, bumped by the store on every save
    #[serde(default)]
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Risk {
    /// Create a freshly reported risk in `risk_identified`
    pub fn new(title: impl Into<String>, inherent_risk: InherentRisk) -> Self {
        let now = Utc::now();
        Self {
            id: RiskId::generate(),
            title: title.into(),
            description: None,
            status: RiskStatus::RiskIdentified,
            inherent_risk,
            reporter_id: None,
            grc_sme_id: None,
            risk_assessor_id: None,
            risk_owner_id: None,
            validation_reason: None,
            assessment: None,
            treatment: None,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(mut self, id: RiskId) -> Self {
        self.id = id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_reporter(mut self, reporter: UserId) -> Self {
        self.reporter_id = Some(reporter);
        self
    }

    pub fn with_grc_sme(mut self, grc_sme: UserId) -> Self {
        self.grc_sme_id = Some(grc_sme);
        self
    }

    /// User currently holding `role`
    pub fn role_holder(&self, role: Role) -> Option<&UserId> {
        match role {
            Role::Reporter => self.reporter_id.as_ref(),
            Role::GrcSme => self.grc_sme_id.as_ref(),
            Role::RiskAssessor => self.risk_assessor_id.as_ref(),
            Role::RiskOwner => self.risk_owner_id.as_ref(),
        }
    }

    /// Overwrite (or clear) the user holding `role`
    pub fn set_role_holder(&mut self, role: Role, user: Option<UserId>) {
        match role {
            Role::Reporter => self.reporter_id = user,
            Role::GrcSme => self.grc_sme_id = user,
            Role::RiskAssessor => self.risk_assessor_id = user,
            Role::RiskOwner => self.risk_owner_id = user,
        }
    }

    /// Whether `decision` on this risk needs executive sign-off
    pub fn requires_executive_approval(&self, decision: TreatmentDecision) -> bool {
        self.inherent_risk.is_above_escalation_threshold() && decision != TreatmentDecision::Mitigate
    }

    pub fn is_closed(&self) -> bool {
        self.status == RiskStatus::NotARisk
    }

    /// Compact description of the compound state, used in error messages
    pub fn state_summary(&self) -> String {
        let mut summary = format!("status={}", self.status);
        if let Some(assessment) = &self.assessment {
            summary.push_str(&format!(", assessment={}", assessment.status));
        }
        if let Some(treatment) = &self.treatment {
            summary.push_str(&format!(", treatment={}", treatment.status));
        }
        summary
    }

    /// Structural invariants that must hold after every transition.
    ///
    /// Returns a description of each violated invariant.
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();

        if self.is_closed() && self.assessment.is_some() {
            violations.push("assessment exists on a risk closed as not_a_risk".to_string());
        }

        if let Some(treatment) = &self.treatment {
            if treatment.status == crate::TreatmentStatus::ExecutiveApproval
                && treatment.executive_approver_id.is_none()
            {
                violations.push("executive_approval entered without an executive approver".to_string());
            }
            if self.assessment.as_ref().map_or(true, |a| !a.is_done()) {
                violations.push("treatment exists before the assessment is done".to_string());
            }
        }

        violations
    }
}
