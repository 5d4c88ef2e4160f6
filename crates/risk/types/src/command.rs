//! Transition commands and their typed payloads
//!
//! Each [`WorkflowCommand`] variant maps one action key to its payload.
//! Required fields are modelled as `Option` so that a missing field turns
//! into a field-level [`ValidationErrors`] entry instead of a decode
//! failure.

use crate::{
    ActionKey, ImpactScore, InherentRisk, LikelihoodScore, MitigationStatus, Role,
    TreatmentDecision, UserId, ValidationErrors,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Payloads ─────────────────────────────────────────────────────────

/// GRC validation of a reported risk
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatePayload {
    #[serde(default)]
    pub approved: Option<bool>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub risk_assessor_id: Option<UserId>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartAssessmentPayload {
    #[serde(default)]
    pub risk_assessor_id: Option<UserId>,
}

/// Assessment fields, used in full by `submit_assessment` and as a patch
/// by `complete_revision`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentFields {
    #[serde(default)]
    pub threat_description: Option<String>,
    #[serde(default)]
    pub affected_assets: Option<Vec<String>>,
    #[serde(default)]
    pub existing_controls: Option<Vec<String>>,
    #[serde(default)]
    pub vulnerabilities: Option<String>,
    #[serde(default)]
    pub likelihood_score: Option<LikelihoodScore>,
    #[serde(default)]
    pub likelihood_rationale: Option<String>,
    #[serde(default)]
    pub impact_score: Option<ImpactScore>,
    #[serde(default)]
    pub impact_rationale: Option<String>,
    #[serde(default)]
    pub recommended_owner_id: Option<UserId>,
    #[serde(default)]
    pub assessment_notes: Option<String>,
    #[serde(default)]
    pub treatment_recommendation: Option<String>,
}

impl AssessmentFields {
    /// Every field the assessor must fill before GRC review
    fn validate_complete(&self, errors: &mut ValidationErrors) {
        errors.require_text("threatDescription", self.threat_description.as_deref());
        errors.require("likelihoodScore", self.likelihood_score.as_ref());
        errors.require_text("likelihoodRationale", self.likelihood_rationale.as_deref());
        errors.require("impactScore", self.impact_score.as_ref());
        errors.require_text("impactRationale", self.impact_rationale.as_deref());
        match &self.recommended_owner_id {
            Some(owner) if !owner.is_blank() => {}
            _ => errors.push("recommendedOwnerId", "is required"),
        }
    }

    /// A patch may omit anything but may not blank out a required field
    fn validate_patch(&self, errors: &mut ValidationErrors) {
        errors.reject_blank("threatDescription", self.threat_description.as_deref());
        errors.reject_blank("likelihoodRationale", self.likelihood_rationale.as_deref());
        errors.reject_blank("impactRationale", self.impact_rationale.as_deref());
        if self.recommended_owner_id.as_ref().is_some_and(|o| o.is_blank()) {
            errors.push("recommendedOwnerId", "must not be empty");
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &AssessmentFields::default()
    }
}

/// GRC review of a submitted assessment (one endpoint, two actions)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewAssessmentPayload {
    #[serde(default)]
    pub approved: Option<bool>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub declined_reason: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTreatmentPayload {
    #[serde(default)]
    pub decision: Option<TreatmentDecision>,
    #[serde(default)]
    pub justification: Option<String>,
    #[serde(default)]
    pub mitigation_plan: Option<String>,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub transfer_to: Option<String>,
    #[serde(default)]
    pub transfer_cost: Option<f64>,
    #[serde(default)]
    pub avoidance_strategy: Option<String>,
    #[serde(default)]
    pub acceptance_rationale: Option<String>,
    #[serde(default)]
    pub acceptance_expiry: Option<NaiveDate>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignApproverPayload {
    #[serde(default)]
    pub executive_approver_id: Option<UserId>,
}

/// Executive decision on an escalated treatment (one endpoint, two actions)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutiveReviewPayload {
    #[serde(default)]
    pub approved: Option<bool>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub denied_reason: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMitigationPayload {
    #[serde(default)]
    pub status: Option<MitigationStatus>,
    /// Percent complete, range-checked during validation
    #[serde(default)]
    pub progress: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub new_target_date: Option<NaiveDate>,
    #[serde(default)]
    pub delay_reason: Option<String>,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
    #[serde(default)]
    pub residual_likelihood: Option<LikelihoodScore>,
    #[serde(default)]
    pub residual_impact: Option<ImpactScore>,
}

/// Direct write of a role field; `user_id: None` clears the role
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRolePayload {
    pub role: Role,
    #[serde(default)]
    pub user_id: Option<UserId>,
}

/// Report of a new risk, created in `risk_identified`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRiskPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub inherent_risk: Option<InherentRisk>,
    #[serde(default)]
    pub reporter_id: Option<UserId>,
    #[serde(default)]
    pub grc_sme_id: Option<UserId>,
}

impl CreateRiskPayload {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("title", self.title.as_deref());
        errors.require("inherentRisk", self.inherent_risk.as_ref());
        if self.reporter_id.as_ref().is_some_and(|u| u.is_blank()) {
            errors.push("reporterId", "must not be empty");
        }
        if self.grc_sme_id.as_ref().is_some_and(|u| u.is_blank()) {
            errors.push("grcSmeId", "must not be empty");
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn user_references(&self) -> Vec<(&'static str, &UserId)> {
        let mut refs = Vec::new();
        if let Some(u) = &self.reporter_id {
            refs.push(("reporterId", u));
        }
        if let Some(u) = &self.grc_sme_id {
            refs.push(("grcSmeId", u));
        }
        refs
    }
}

// ── Command ──────────────────────────────────────────────────────────

/// A typed request to perform one workflow action
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "payload", rename_all = "snake_case")]
pub enum WorkflowCommand {
    Validate(ValidatePayload),
    StartAssessment(StartAssessmentPayload),
    SubmitAssessment(AssessmentFields),
    ApproveAssessment {
        #[serde(default)]
        notes: Option<String>,
    },
    RequestRevision {
        #[serde(default)]
        declined_reason: Option<String>,
    },
    CompleteRevision(AssessmentFields),
    SubmitTreatment(SubmitTreatmentPayload),
    AssignApprover(AssignApproverPayload),
    ExecutiveApprove {
        #[serde(default)]
        notes: Option<String>,
    },
    ExecutiveDeny {
        #[serde(default)]
        denied_reason: Option<String>,
    },
    UpdateMitigation(UpdateMitigationPayload),
    AssignRole(AssignRolePayload),
    /// A GRC or executive review sent without `approved`. It carries the
    /// approving action for the precondition check and never validates.
    #[serde(skip)]
    Undecided { action: ActionKey },
}

impl WorkflowCommand {
    /// Split a GRC review into approve / request-revision
    pub fn from_review(payload: ReviewAssessmentPayload) -> Self {
        match payload.approved {
            Some(true) => WorkflowCommand::ApproveAssessment {
                notes: payload.notes,
            },
            Some(false) => WorkflowCommand::RequestRevision {
                declined_reason: payload.declined_reason,
            },
            None => WorkflowCommand::Undecided {
                action: ActionKey::ApproveAssessment,
            },
        }
    }

    /// Split an executive review into approve / deny
    pub fn from_executive_review(payload: ExecutiveReviewPayload) -> Self {
        match payload.approved {
            Some(true) => WorkflowCommand::ExecutiveApprove {
                notes: payload.notes,
            },
            Some(false) => WorkflowCommand::ExecutiveDeny {
                denied_reason: payload.denied_reason,
            },
            None => WorkflowCommand::Undecided {
                action: ActionKey::ExecutiveApprove,
            },
        }
    }

    pub fn action_key(&self) -> ActionKey {
        match self {
            WorkflowCommand::Validate(_) => ActionKey::Validate,
            WorkflowCommand::StartAssessment(_) => ActionKey::StartAssessment,
            WorkflowCommand::SubmitAssessment(_) => ActionKey::SubmitAssessment,
            WorkflowCommand::ApproveAssessment { .. } => ActionKey::ApproveAssessment,
            WorkflowCommand::RequestRevision { .. } => ActionKey::RequestRevision,
            WorkflowCommand::CompleteRevision(_) => ActionKey::CompleteRevision,
            WorkflowCommand::SubmitTreatment(_) => ActionKey::SubmitTreatment,
            WorkflowCommand::AssignApprover(_) => ActionKey::AssignApprover,
            WorkflowCommand::ExecutiveApprove { .. } => ActionKey::ExecutiveApprove,
            WorkflowCommand::ExecutiveDeny { .. } => ActionKey::ExecutiveDeny,
            WorkflowCommand::UpdateMitigation(_) => ActionKey::UpdateMitigation,
            WorkflowCommand::AssignRole(p) => p.role.action_key(),
            WorkflowCommand::Undecided { action } => *action,
        }
    }

    /// Check required fields. State-independent: the payload alone decides.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        match self {
            WorkflowCommand::Validate(p) => match p.approved {
                None => errors.push("approved", "is required"),
                Some(false) => errors.require_text("reason", p.reason.as_deref()),
                Some(true) => {
                    if p.risk_assessor_id.as_ref().is_some_and(|u| u.is_blank()) {
                        errors.push("riskAssessorId", "must not be empty");
                    }
                }
            },

            WorkflowCommand::StartAssessment(p) => match &p.risk_assessor_id {
                Some(u) if !u.is_blank() => {}
                _ => errors.push("riskAssessorId", "is required"),
            },

            WorkflowCommand::SubmitAssessment(fields) => fields.validate_complete(&mut errors),

            WorkflowCommand::ApproveAssessment { .. } => {}

            WorkflowCommand::RequestRevision { declined_reason } => {
                errors.require_text("declinedReason", declined_reason.as_deref());
            }

            WorkflowCommand::CompleteRevision(fields) => fields.validate_patch(&mut errors),

            WorkflowCommand::SubmitTreatment(p) => validate_treatment(p, &mut errors),

            WorkflowCommand::AssignApprover(p) => match &p.executive_approver_id {
                Some(u) if !u.is_blank() => {}
                _ => errors.push("executiveApproverId", "is required"),
            },

            WorkflowCommand::ExecutiveApprove { .. } => {}

            WorkflowCommand::ExecutiveDeny { denied_reason } => {
                errors.require_text("deniedReason", denied_reason.as_deref());
            }

            WorkflowCommand::UpdateMitigation(p) => validate_mitigation(p, &mut errors),

            WorkflowCommand::AssignRole(p) => {
                if p.user_id.as_ref().is_some_and(|u| u.is_blank()) {
                    errors.push("userId", "must not be empty");
                }
            }

            WorkflowCommand::Undecided { .. } => errors.push("approved", "is required"),
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// User identifiers this command would write, paired with the field
    /// they land in. Each must resolve in the directory before applying.
    pub fn user_references(&self) -> Vec<(&'static str, &UserId)> {
        let mut refs = Vec::new();
        match self {
            WorkflowCommand::Validate(p) if p.approved == Some(true) => {
                if let Some(u) = &p.risk_assessor_id {
                    refs.push(("riskAssessorId", u));
                }
            }
            WorkflowCommand::StartAssessment(p) => {
                if let Some(u) = &p.risk_assessor_id {
                    refs.push(("riskAssessorId", u));
                }
            }
            WorkflowCommand::SubmitAssessment(f) | WorkflowCommand::CompleteRevision(f) => {
                if let Some(u) = &f.recommended_owner_id {
                    refs.push(("recommendedOwnerId", u));
                }
            }
            WorkflowCommand::AssignApprover(p) => {
                if let Some(u) = &p.executive_approver_id {
                    refs.push(("executiveApproverId", u));
                }
            }
            WorkflowCommand::AssignRole(p) => {
                if let Some(u) = &p.user_id {
                    refs.push((p.role.field_name(), u));
                }
            }
            _ => {}
        }
        refs
    }
}

fn validate_treatment(p: &SubmitTreatmentPayload, errors: &mut ValidationErrors) {
    errors.require("decision", p.decision.as_ref());
    errors.require_text("justification", p.justification.as_deref());

    match p.decision {
        Some(TreatmentDecision::Mitigate) => {
            errors.require_text("mitigationPlan", p.mitigation_plan.as_deref());
            errors.require("targetDate", p.target_date.as_ref());
        }
        Some(TreatmentDecision::Transfer) => {
            errors.require_text("transferTo", p.transfer_to.as_deref());
            if let Some(cost) = p.transfer_cost {
                if !cost.is_finite() || cost < 0.0 {
                    errors.push("transferCost", "must be a non-negative amount");
                }
            }
        }
        Some(TreatmentDecision::Avoid) => {
            errors.require_text("avoidanceStrategy", p.avoidance_strategy.as_deref());
        }
        Some(TreatmentDecision::Accept) => {
            errors.require_text("acceptanceRationale", p.acceptance_rationale.as_deref());
        }
        None => {}
    }
}

fn validate_mitigation(p: &UpdateMitigationPayload, errors: &mut ValidationErrors) {
    errors.require("status", p.status.as_ref());

    if p.progress.is_some_and(|progress| !(0..=100).contains(&progress)) {
        errors.push("progress", "must be between 0 and 100");
    }

    match p.status {
        Some(MitigationStatus::Delayed) => {
            errors.require("newTargetDate", p.new_target_date.as_ref());
            errors.require_text("delayReason", p.delay_reason.as_deref());
        }
        Some(MitigationStatus::Cancelled) => {
            errors.require_text("cancellationReason", p.cancellation_reason.as_deref());
        }
        Some(MitigationStatus::Done) => {
            errors.require("residualLikelihood", p.residual_likelihood.as_ref());
            errors.require("residualImpact", p.residual_impact.as_ref());
        }
        Some(MitigationStatus::OnTrack) | None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_assessment() -> AssessmentFields {
        AssessmentFields {
            threat_description: Some("Phishing of finance staff".into()),
            affected_assets: Some(vec!["ERP".into()]),
            existing_controls: Some(vec!["MFA".into()]),
            vulnerabilities: Some("No DMARC enforcement".into()),
            likelihood_score: Some(LikelihoodScore::Likely),
            likelihood_rationale: Some("Seen twice this quarter".into()),
            impact_score: Some(ImpactScore::Major),
            impact_rationale: Some("Wire fraud exposure".into()),
            recommended_owner_id: Some(UserId::new("cfo")),
            assessment_notes: None,
            treatment_recommendation: None,
        }
    }

    #[test]
    fn test_reject_requires_reason() {
        let cmd = WorkflowCommand::Validate(ValidatePayload {
            approved: Some(false),
            reason: None,
            risk_assessor_id: None,
        });
        let errors = cmd.validate().unwrap_err();
        assert!(errors.contains_field("reason"));

        let cmd = WorkflowCommand::Validate(ValidatePayload {
            approved: Some(true),
            ..Default::default()
        });
        assert!(cmd.validate().is_ok());
    }

    #[test]
    fn test_rejected_validation_ignores_assessor_reference() {
        let cmd = WorkflowCommand::Validate(ValidatePayload {
            approved: Some(false),
            reason: Some("duplicate".into()),
            risk_assessor_id: Some(UserId::new("u1")),
        });
        assert!(cmd.user_references().is_empty());
    }

    #[test]
    fn test_submit_assessment_requires_rationales() {
        assert!(WorkflowCommand::SubmitAssessment(full_assessment())
            .validate()
            .is_ok());

        let mut fields = full_assessment();
        fields.likelihood_rationale = Some(String::new());
        fields.impact_rationale = None;
        let errors = WorkflowCommand::SubmitAssessment(fields)
            .validate()
            .unwrap_err();
        assert!(errors.contains_field("likelihoodRationale"));
        assert!(errors.contains_field("impactRationale"));
    }

    #[test]
    fn test_submit_assessment_optional_fields() {
        let mut fields = full_assessment();
        fields.affected_assets = None;
        fields.existing_controls = None;
        fields.vulnerabilities = None;
        assert!(WorkflowCommand::SubmitAssessment(fields).validate().is_ok());
    }

    #[test]
    fn test_revision_patch_rules() {
        assert!(WorkflowCommand::CompleteRevision(AssessmentFields::default())
            .validate()
            .is_ok());

        let patch = AssessmentFields {
            threat_description: Some(" ".into()),
            ..Default::default()
        };
        let errors = WorkflowCommand::CompleteRevision(patch)
            .validate()
            .unwrap_err();
        assert!(errors.contains_field("threatDescription"));
    }

    #[test]
    fn test_treatment_decision_specific_fields() {
        let mitigate = SubmitTreatmentPayload {
            decision: Some(TreatmentDecision::Mitigate),
            justification: Some("Cheap fix".into()),
            ..Default::default()
        };
        let errors = WorkflowCommand::SubmitTreatment(mitigate)
            .validate()
            .unwrap_err();
        assert!(errors.contains_field("mitigationPlan"));
        assert!(errors.contains_field("targetDate"));

        let transfer = SubmitTreatmentPayload {
            decision: Some(TreatmentDecision::Transfer),
            justification: Some("Insurable".into()),
            transfer_to: Some("Cyber insurer".into()),
            transfer_cost: Some(-1.0),
            ..Default::default()
        };
        let errors = WorkflowCommand::SubmitTreatment(transfer)
            .validate()
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_field("transferCost"));

        let missing = SubmitTreatmentPayload::default();
        let errors = WorkflowCommand::SubmitTreatment(missing)
            .validate()
            .unwrap_err();
        assert!(errors.contains_field("decision"));
        assert!(errors.contains_field("justification"));
    }

    #[test]
    fn test_mitigation_status_dependent_fields() {
        let delayed = UpdateMitigationPayload {
            status: Some(MitigationStatus::Delayed),
            ..Default::default()
        };
        let errors = WorkflowCommand::UpdateMitigation(delayed)
            .validate()
            .unwrap_err();
        assert!(errors.contains_field("newTargetDate"));
        assert!(errors.contains_field("delayReason"));

        let done = UpdateMitigationPayload {
            status: Some(MitigationStatus::Done),
            residual_likelihood: Some(LikelihoodScore::Rare),
            ..Default::default()
        };
        let errors = WorkflowCommand::UpdateMitigation(done)
            .validate()
            .unwrap_err();
        assert!(errors.contains_field("residualImpact"));

        let cancelled = UpdateMitigationPayload {
            status: Some(MitigationStatus::Cancelled),
            ..Default::default()
        };
        let errors = WorkflowCommand::UpdateMitigation(cancelled)
            .validate()
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_field("cancellationReason"));

        for progress in [101, 300, -1] {
            let out_of_range = UpdateMitigationPayload {
                status: Some(MitigationStatus::OnTrack),
                progress: Some(progress),
                ..Default::default()
            };
            let errors = WorkflowCommand::UpdateMitigation(out_of_range)
                .validate()
                .unwrap_err();
            assert!(errors.contains_field("progress"), "progress {}", progress);
        }
    }

    #[test]
    fn test_progress_decodes_wide() {
        let payload: UpdateMitigationPayload =
            serde_json::from_value(serde_json::json!({ "status": "on_track", "progress": 300 }))
                .unwrap();
        assert_eq!(payload.progress, Some(300));
    }

    #[test]
    fn test_missing_decision_is_field_error() {
        let payload: ValidatePayload =
            serde_json::from_value(serde_json::json!({ "reason": "dup" })).unwrap();
        let errors = WorkflowCommand::Validate(payload).validate().unwrap_err();
        assert!(errors.contains_field("approved"));

        let review = WorkflowCommand::from_review(ReviewAssessmentPayload::default());
        assert_eq!(review.action_key(), ActionKey::ApproveAssessment);
        assert!(review.validate().unwrap_err().contains_field("approved"));
        assert!(review.user_references().is_empty());

        let executive = WorkflowCommand::from_executive_review(ExecutiveReviewPayload::default());
        assert_eq!(executive.action_key(), ActionKey::ExecutiveApprove);
        assert!(executive.validate().unwrap_err().contains_field("approved"));
    }

    #[test]
    fn test_review_split() {
        let approve = WorkflowCommand::from_review(ReviewAssessmentPayload {
            approved: Some(true),
            notes: Some("fine".into()),
            declined_reason: None,
        });
        assert_eq!(approve.action_key(), ActionKey::ApproveAssessment);

        let deny = WorkflowCommand::from_executive_review(ExecutiveReviewPayload {
            approved: Some(false),
            notes: None,
            denied_reason: Some("insufficient budget".into()),
        });
        assert_eq!(deny.action_key(), ActionKey::ExecutiveDeny);
        assert!(deny.validate().is_ok());
    }

    #[test]
    fn test_assign_role_references() {
        let cmd = WorkflowCommand::AssignRole(AssignRolePayload {
            role: Role::RiskOwner,
            user_id: Some(UserId::new("owner")),
        });
        assert_eq!(cmd.action_key(), ActionKey::AssignOwner);
        assert_eq!(cmd.user_references(), vec![("riskOwnerId", &UserId::new("owner"))]);

        let clear = WorkflowCommand::AssignRole(AssignRolePayload {
            role: Role::RiskOwner,
            user_id: None,
        });
        assert!(clear.user_references().is_empty());
        assert!(clear.validate().is_ok());
    }

    #[test]
    fn test_create_payload_validation() {
        let errors = CreateRiskPayload::default().validate().unwrap_err();
        assert!(errors.contains_field("title"));
        assert!(errors.contains_field("inherentRisk"));

        let payload = CreateRiskPayload {
            title: Some("Shared admin credentials".into()),
            inherent_risk: Some(InherentRisk::Medium),
            reporter_id: Some(UserId::new("rep")),
            ..Default::default()
        };
        assert!(payload.validate().is_ok());
        assert_eq!(payload.user_references().len(), 1);
    }

    #[test]
    fn test_command_wire_format() {
        let json = serde_json::json!({
            "action": "start_assessment",
            "payload": { "riskAssessorId": "u2" }
        });
        let cmd: WorkflowCommand = serde_json::from_value(json).unwrap();
        assert_eq!(
            cmd,
            WorkflowCommand::StartAssessment(StartAssessmentPayload {
                risk_assessor_id: Some(UserId::new("u2")),
            })
        );
    }
}
