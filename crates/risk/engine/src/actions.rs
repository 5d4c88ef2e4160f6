//! Action availability and role-assignment eligibility
//!
//! Both are pure functions of the Risk's compound state. The state machine
//! uses them as its preconditions, so an action is accepted exactly when it
//! is listed here.

use risk_types::{ActionKey, AssessmentStatus, Risk, RiskStatus, Role, TreatmentStatus};

/// Ordered list of phase actions currently permitted on `risk`.
///
/// Intake actions come first, then assessment actions (evaluated on the
/// Assessment alone), then treatment actions.
pub fn available_actions(risk: &Risk) -> Vec<ActionKey> {
    let mut actions = Vec::new();

    // Intake
    match risk.status {
        RiskStatus::RiskIdentified => actions.push(ActionKey::Validate),
        RiskStatus::ActualRisk if risk.assessment.is_none() => {
            actions.push(ActionKey::StartAssessment)
        }
        _ => {}
    }

    // Assessment
    if let Some(assessment) = &risk.assessment {
        match assessment.status {
            AssessmentStatus::RiskAssessorAnalysis => actions.push(ActionKey::SubmitAssessment),
            AssessmentStatus::GrcApproval => {
                actions.push(ActionKey::ApproveAssessment);
                actions.push(ActionKey::RequestRevision);
            }
            AssessmentStatus::GrcRevision => actions.push(ActionKey::CompleteRevision),
            AssessmentStatus::Done => {}
        }
    }

    // Treatment
    if let Some(treatment) = &risk.treatment {
        match treatment.status {
            TreatmentStatus::TreatmentDecisionReview => actions.push(ActionKey::SubmitTreatment),
            TreatmentStatus::IdentifyExecutiveApprover => actions.push(ActionKey::AssignApprover),
            TreatmentStatus::ExecutiveApproval => {
                actions.push(ActionKey::ExecutiveApprove);
                actions.push(ActionKey::ExecutiveDeny);
            }
            TreatmentStatus::RiskMitigationInProgress => actions.push(ActionKey::UpdateMitigation),
            _ => {}
        }
    }

    actions
}

/// Whether the holder of `role` may be changed in the current state
pub fn can_assign(risk: &Risk, role: Role) -> bool {
    match role {
        Role::Reporter | Role::GrcSme => !risk.is_closed(),
        Role::RiskAssessor => risk.status.is_early_intake(),
        Role::RiskOwner => risk.assessment.is_some(),
    }
}

/// Roles whose holder may currently be changed, in [`Role::ALL`] order
pub fn assignable_roles(risk: &Risk) -> Vec<Role> {
    Role::ALL
        .into_iter()
        .filter(|role| can_assign(risk, *role))
        .collect()
}

/// Whether `action` may be applied to `risk` right now
pub fn is_permitted(risk: &Risk, action: ActionKey) -> bool {
    match action {
        ActionKey::AssignReporter => can_assign(risk, Role::Reporter),
        ActionKey::AssignGrcSme => can_assign(risk, Role::GrcSme),
        ActionKey::AssignAssessor => can_assign(risk, Role::RiskAssessor),
        ActionKey::AssignOwner => can_assign(risk, Role::RiskOwner),
        phase_action => available_actions(risk).contains(&phase_action),
    }
}
