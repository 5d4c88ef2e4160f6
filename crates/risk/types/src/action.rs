//! Action keys and assignable roles

use serde::{Deserialize, Serialize};

/// Every operator action the workflow understands.
///
/// Phase actions drive the state machine; the `Assign*` actions write role
/// fields directly and are gated by [`Role`] eligibility instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKey {
    Validate,
    StartAssessment,
    SubmitAssessment,
    ApproveAssessment,
    RequestRevision,
    CompleteRevision,
    SubmitTreatment,
    AssignApprover,
    ExecutiveApprove,
    ExecutiveDeny,
    UpdateMitigation,
    AssignReporter,
    AssignGrcSme,
    AssignAssessor,
    AssignOwner,
}

impl ActionKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKey::Validate => "validate",
            ActionKey::StartAssessment => "start_assessment",
            ActionKey::SubmitAssessment => "submit_assessment",
            ActionKey::ApproveAssessment => "approve_assessment",
            ActionKey::RequestRevision => "request_revision",
            ActionKey::CompleteRevision => "complete_revision",
            ActionKey::SubmitTreatment => "submit_treatment",
            ActionKey::AssignApprover => "assign_approver",
            ActionKey::ExecutiveApprove => "executive_approve",
            ActionKey::ExecutiveDeny => "executive_deny",
            ActionKey::UpdateMitigation => "update_mitigation",
            ActionKey::AssignReporter => "assign_reporter",
            ActionKey::AssignGrcSme => "assign_grc_sme",
            ActionKey::AssignAssessor => "assign_assessor",
            ActionKey::AssignOwner => "assign_owner",
        }
    }

    /// True for the direct role-field writes
    pub fn is_role_assignment(&self) -> bool {
        matches!(
            self,
            ActionKey::AssignReporter
                | ActionKey::AssignGrcSme
                | ActionKey::AssignAssessor
                | ActionKey::AssignOwner
        )
    }
}

impl std::fmt::Display for ActionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Roles held directly on the Risk record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Reporter,
    GrcSme,
    RiskAssessor,
    RiskOwner,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Reporter, Role::GrcSme, Role::RiskAssessor, Role::RiskOwner];

    pub fn action_key(&self) -> ActionKey {
        match self {
            Role::Reporter => ActionKey::AssignReporter,
            Role::GrcSme => ActionKey::AssignGrcSme,
            Role::RiskAssessor => ActionKey::AssignAssessor,
            Role::RiskOwner => ActionKey::AssignOwner,
        }
    }

    /// Name of the Risk field this role is stored in
    pub fn field_name(&self) -> &'static str {
        match self {
            Role::Reporter => "reporterId",
            Role::GrcSme => "grcSmeId",
            Role::RiskAssessor => "riskAssessorId",
            Role::RiskOwner => "riskOwnerId",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Reporter => "reporter",
            Role::GrcSme => "grc_sme",
            Role::RiskAssessor => "risk_assessor",
            Role::RiskOwner => "risk_owner",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
