//! State machine: precondition checks and transition effects
//!
//! The state machine is the heart of the workflow engine. It decides
//! whether a command may run against a Risk and, if so, mutates the Risk
//! in place. It performs no I/O; directory lookups and persistence are the
//! orchestrator's job.

use crate::actions;
use chrono::{DateTime, Utc};
use risk_types::*;

/// Applies workflow commands to Risk aggregates
#[derive(Clone, Debug, Default)]
pub struct StateMachine;

impl StateMachine {
    pub fn new() -> Self {
        Self
    }

    /// Check a command against the Risk without mutating anything.
    ///
    /// The precondition is checked before the payload so that a stale
    /// request is reported as such even when its payload is also invalid.
    pub fn check(&self, risk: &Risk, command: &WorkflowCommand) -> WorkflowResult<()> {
        let action = command.action_key();
        if !actions::is_permitted(risk, action) {
            return Err(WorkflowError::InvalidStateTransition {
                action,
                state: risk.state_summary(),
            });
        }
        command.validate().map_err(WorkflowError::Validation)
    }

    /// Apply a command to `risk`.
    ///
    /// On error the Risk is left untouched.
    pub fn apply(
        &self,
        risk: &mut Risk,
        command: &WorkflowCommand,
        now: DateTime<Utc>,
    ) -> WorkflowResult<()> {
        self.check(risk, command)?;

        let mut next = risk.clone();
        match command {
            WorkflowCommand::Validate(p) => self.validate(&mut next, p),
            WorkflowCommand::StartAssessment(p) => self.start_assessment(&mut next, p, now)?,
            WorkflowCommand::SubmitAssessment(fields) => {
                let assessment = assessment_mut(&mut next, command)?;
                fill_assessment(assessment, fields);
                assessment.status = AssessmentStatus::GrcApproval;
                assessment.submitted_at = Some(now);
            }
            WorkflowCommand::ApproveAssessment { notes } => {
                self.approve_assessment(&mut next, command, notes.clone(), now)?
            }
            WorkflowCommand::RequestRevision { declined_reason } => {
                let assessment = assessment_mut(&mut next, command)?;
                assessment.status = AssessmentStatus::GrcRevision;
                assessment.declined_reason = declined_reason.clone();
                assessment.revision_count += 1;
            }
            WorkflowCommand::CompleteRevision(fields) => {
                let assessment = assessment_mut(&mut next, command)?;
                fill_assessment(assessment, fields);
                assessment.declined_reason = None;
                assessment.status = AssessmentStatus::GrcApproval;
                assessment.submitted_at = Some(now);
            }
            WorkflowCommand::SubmitTreatment(p) => self.submit_treatment(&mut next, command, p, now)?,
            WorkflowCommand::AssignApprover(p) => {
                let treatment = treatment_mut(&mut next, command)?;
                treatment.executive_approver_id = p.executive_approver_id.clone();
                treatment.status = TreatmentStatus::ExecutiveApproval;
            }
            WorkflowCommand::ExecutiveApprove { notes } => {
                self.executive_approve(&mut next, command, notes.clone(), now)?
            }
            WorkflowCommand::ExecutiveDeny { denied_reason } => {
                let treatment = treatment_mut(&mut next, command)?;
                treatment.denied_reason = denied_reason.clone();
                treatment.status = TreatmentStatus::TreatmentDecisionReview;
            }
            WorkflowCommand::UpdateMitigation(p) => {
                self.update_mitigation(&mut next, command, p, now)?
            }
            WorkflowCommand::Undecided { .. } => return Err(missing_field("approved")),
            WorkflowCommand::AssignRole(p) => {
                next.set_role_holder(p.role, p.user_id.clone());
                if p.role == Role::RiskOwner {
                    if let Some(treatment) = next.treatment.as_mut() {
                        treatment.risk_owner_id = p.user_id.clone();
                    }
                }
            }
        }

        next.updated_at = now;
        *risk = next;
        Ok(())
    }

    // ── Intake ───────────────────────────────────────────────────────

    fn validate(&self, risk: &mut Risk, p: &ValidatePayload) {
        risk.validation_reason = p.reason.clone();
        if p.approved == Some(true) {
            risk.status = RiskStatus::ActualRisk;
            if let Some(assessor) = &p.risk_assessor_id {
                risk.risk_assessor_id = Some(assessor.clone());
            }
        } else {
            risk.status = RiskStatus::NotARisk;
        }
    }

    fn start_assessment(
        &self,
        risk: &mut Risk,
        p: &StartAssessmentPayload,
        now: DateTime<Utc>,
    ) -> WorkflowResult<()> {
        let assessor = p
            .risk_assessor_id
            .clone()
            .ok_or_else(|| missing_field("riskAssessorId"))?;
        risk.assessment = Some(Assessment::new(assessor.clone(), now));
        risk.risk_assessor_id = Some(assessor);
        risk.status = RiskStatus::RiskAnalysisInProgress;
        Ok(())
    }

    // ── Assessment ───────────────────────────────────────────────────

    fn approve_assessment(
        &self,
        risk: &mut Risk,
        command: &WorkflowCommand,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> WorkflowResult<()> {
        let assessment = assessment_mut(risk, command)?;
        assessment.status = AssessmentStatus::Done;
        assessment.review_notes = notes;
        assessment.completed_at = Some(now);
        let recommended = assessment.recommended_owner_id.clone();

        if risk.risk_owner_id.is_none() {
            risk.risk_owner_id = recommended;
        }
        risk.status = RiskStatus::RiskAnalyzed;
        risk.treatment = Some(Treatment::new(risk.risk_owner_id.clone(), now));
        Ok(())
    }

    // ── Treatment ────────────────────────────────────────────────────

    fn submit_treatment(
        &self,
        risk: &mut Risk,
        command: &WorkflowCommand,
        p: &SubmitTreatmentPayload,
        now: DateTime<Utc>,
    ) -> WorkflowResult<()> {
        let decision = p.decision.ok_or_else(|| missing_field("decision"))?;
        let escalate = risk.requires_executive_approval(decision);
        let treatment = treatment_mut(risk, command)?;

        treatment.decision = Some(decision);
        treatment.justification = p.justification.clone();
        treatment.details = DecisionDetails {
            mitigation_plan: p.mitigation_plan.clone(),
            target_date: p.target_date,
            transfer_to: p.transfer_to.clone(),
            transfer_cost: p.transfer_cost,
            avoidance_strategy: p.avoidance_strategy.clone(),
            acceptance_rationale: p.acceptance_rationale.clone(),
            acceptance_expiry: p.acceptance_expiry,
        };
        treatment.decided_at = Some(now);
        treatment.denied_reason = None;
        treatment.executive_approver_id = None;
        treatment.executive_notes = None;

        if escalate {
            treatment.status = TreatmentStatus::IdentifyExecutiveApprover;
        } else {
            enter_decision_status(treatment, decision.status_without_escalation(), now);
        }
        Ok(())
    }

    fn executive_approve(
        &self,
        risk: &mut Risk,
        command: &WorkflowCommand,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> WorkflowResult<()> {
        let state = risk.state_summary();
        let treatment = treatment_mut(risk, command)?;
        let decision = treatment
            .decision
            .ok_or_else(|| WorkflowError::InvalidStateTransition {
                action: command.action_key(),
                state,
            })?;
        treatment.executive_notes = notes;
        enter_decision_status(treatment, decision.status_after_executive_approval(), now);
        Ok(())
    }

    fn update_mitigation(
        &self,
        risk: &mut Risk,
        command: &WorkflowCommand,
        p: &UpdateMitigationPayload,
        now: DateTime<Utc>,
    ) -> WorkflowResult<()> {
        let status = p.status.ok_or_else(|| missing_field("status"))?;
        let treatment = treatment_mut(risk, command)?;

        let progress = match p.progress {
            Some(value) => Some(u8::try_from(value).map_err(|_| {
                let mut errors = ValidationErrors::new();
                errors.push("progress", "must be between 0 and 100");
                WorkflowError::Validation(errors)
            })?),
            None => None,
        };

        treatment.mitigation_status = Some(status);
        if let Some(progress) = progress {
            treatment.mitigation_progress = progress;
        }
        if let Some(notes) = &p.notes {
            treatment.mitigation_notes = Some(notes.clone());
        }

        match status {
            MitigationStatus::OnTrack => {}
            MitigationStatus::Delayed => {
                treatment.details.target_date = p.new_target_date;
                treatment.delay_reason = p.delay_reason.clone();
            }
            MitigationStatus::Cancelled => {
                treatment.cancellation_reason = p.cancellation_reason.clone();
            }
            MitigationStatus::Done => {
                treatment.residual_likelihood = p.residual_likelihood;
                treatment.residual_impact = p.residual_impact;
                treatment.mitigation_progress = 100;
                treatment.status = TreatmentStatus::RiskMitigationComplete;
                treatment.completed_at = Some(now);
            }
        }
        Ok(())
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

fn missing_field(field: &str) -> WorkflowError {
    let mut errors = ValidationErrors::new();
    errors.push(field, "is required");
    WorkflowError::Validation(errors)
}

fn assessment_mut<'a>(
    risk: &'a mut Risk,
    command: &WorkflowCommand,
) -> WorkflowResult<&'a mut Assessment> {
    let state = risk.state_summary();
    risk.assessment
        .as_mut()
        .ok_or(WorkflowError::InvalidStateTransition {
            action: command.action_key(),
            state,
        })
}

fn treatment_mut<'a>(
    risk: &'a mut Risk,
    command: &WorkflowCommand,
) -> WorkflowResult<&'a mut Treatment> {
    let state = risk.state_summary();
    risk.treatment
        .as_mut()
        .ok_or(WorkflowError::InvalidStateTransition {
            action: command.action_key(),
            state,
        })
}

/// Overwrite every assessment field present in `fields`
fn fill_assessment(assessment: &mut Assessment, fields: &AssessmentFields) {
    if let Some(v) = &fields.threat_description {
        assessment.threat_description = Some(v.clone());
    }
    if let Some(v) = &fields.affected_assets {
        assessment.affected_assets = v.clone();
    }
    if let Some(v) = &fields.existing_controls {
        assessment.existing_controls = v.clone();
    }
    if let Some(v) = &fields.vulnerabilities {
        assessment.vulnerabilities = Some(v.clone());
    }
    if let Some(v) = fields.likelihood_score {
        assessment.likelihood_score = Some(v);
    }
    if let Some(v) = &fields.likelihood_rationale {
        assessment.likelihood_rationale = Some(v.clone());
    }
    if let Some(v) = fields.impact_score {
        assessment.impact_score = Some(v);
    }
    if let Some(v) = &fields.impact_rationale {
        assessment.impact_rationale = Some(v.clone());
    }
    if let Some(v) = &fields.recommended_owner_id {
        assessment.recommended_owner_id = Some(v.clone());
    }
    if let Some(v) = &fields.assessment_notes {
        assessment.assessment_notes = Some(v.clone());
    }
    if let Some(v) = &fields.treatment_recommendation {
        assessment.treatment_recommendation = Some(v.clone());
    }
}

/// Move a decided treatment into its mitigation or terminal status
fn enter_decision_status(treatment: &mut Treatment, status: TreatmentStatus, now: DateTime<Utc>) {
    treatment.status = status;
    if status == TreatmentStatus::RiskMitigationInProgress {
        treatment.mitigation_status = Some(MitigationStatus::OnTrack);
        treatment.mitigation_progress = 0;
    } else if status.is_terminal() {
        treatment.completed_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn assessment_fields() -> AssessmentFields {
        AssessmentFields {
            threat_description: Some("Ransomware via exposed RDP".into()),
            affected_assets: Some(vec!["File servers".into()]),
            existing_controls: Some(vec!["Nightly backups".into()]),
            vulnerabilities: Some("RDP open to the internet".into()),
            likelihood_score: Some(LikelihoodScore::Possible),
            likelihood_rationale: Some("Scans observed daily".into()),
            impact_score: Some(ImpactScore::Severe),
            impact_rationale: Some("Full outage of shared drives".into()),
            recommended_owner_id: Some(UserId::new("owner")),
            assessment_notes: None,
            treatment_recommendation: Some("Close RDP, enforce VPN".into()),
        }
    }

    fn run(sm: &StateMachine, risk: &mut Risk, command: WorkflowCommand) {
        sm.apply(risk, &command, Utc::now()).unwrap();
    }

    /// Walk a risk up to `treatment_decision_review`
    fn analyzed_risk(inherent: InherentRisk) -> Risk {
        let sm = StateMachine::new();
        let mut risk = Risk::new("RDP exposure", inherent);
        run(
            &sm,
            &mut risk,
            WorkflowCommand::Validate(ValidatePayload {
                approved: Some(true),
                reason: None,
                risk_assessor_id: None,
            }),
        );
        run(
            &sm,
            &mut risk,
            WorkflowCommand::StartAssessment(StartAssessmentPayload {
                risk_assessor_id: Some(UserId::new("assessor")),
            }),
        );
        run(&sm, &mut risk, WorkflowCommand::SubmitAssessment(assessment_fields()));
        run(&sm, &mut risk, WorkflowCommand::ApproveAssessment { notes: None });
        risk
    }

    #[test]
    fn test_validate_approved_sets_assessor() {
        let sm = StateMachine::new();
        let mut risk = Risk::new("r", InherentRisk::Low);
        run(
            &sm,
            &mut risk,
            WorkflowCommand::Validate(ValidatePayload {
                approved: Some(true),
                reason: None,
                risk_assessor_id: Some(UserId::new("u1")),
            }),
        );
        assert_eq!(risk.status, RiskStatus::ActualRisk);
        assert_eq!(risk.risk_assessor_id, Some(UserId::new("u1")));
        assert!(risk.assessment.is_none());
    }

    #[test]
    fn test_validate_rejected_closes_risk() {
        let sm = StateMachine::new();
        let mut risk = Risk::new("r", InherentRisk::Low);
        risk.risk_assessor_id = Some(UserId::new("u1"));
        run(
            &sm,
            &mut risk,
            WorkflowCommand::Validate(ValidatePayload {
                approved: Some(false),
                reason: Some("Duplicate of an existing risk".into()),
                risk_assessor_id: None,
            }),
        );
        assert_eq!(risk.status, RiskStatus::NotARisk);
        assert!(risk.assessment.is_none());
        assert!(available_after(&risk).is_empty());
    }

    fn available_after(risk: &Risk) -> Vec<ActionKey> {
        actions::available_actions(risk)
    }

    #[test]
    fn test_start_assessment() {
        let sm = StateMachine::new();
        let mut risk = Risk::new("r", InherentRisk::Low);
        risk.status = RiskStatus::ActualRisk;
        run(
            &sm,
            &mut risk,
            WorkflowCommand::StartAssessment(StartAssessmentPayload {
                risk_assessor_id: Some(UserId::new("u2")),
            }),
        );
        assert_eq!(risk.status, RiskStatus::RiskAnalysisInProgress);
        let assessment = risk.assessment.as_ref().unwrap();
        assert_eq!(assessment.status, AssessmentStatus::RiskAssessorAnalysis);
        assert_eq!(assessment.risk_assessor_id, UserId::new("u2"));
        assert_eq!(risk.risk_assessor_id, Some(UserId::new("u2")));
    }

    #[test]
    fn test_wrong_state_is_rejected_without_mutation() {
        let sm = StateMachine::new();
        let mut risk = Risk::new("r", InherentRisk::Low);
        let before = risk.clone();
        let err = sm
            .apply(
                &mut risk,
                &WorkflowCommand::ApproveAssessment { notes: None },
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidStateTransition { .. }));
        assert_eq!(risk, before);
    }

    #[test]
    fn test_precondition_checked_before_payload() {
        let sm = StateMachine::new();
        let risk = Risk::new("r", InherentRisk::Low);
        let err = sm
            .check(
                &risk,
                &WorkflowCommand::SubmitAssessment(AssessmentFields::default()),
            )
            .unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidStateTransition { .. }));
    }

    #[test]
    fn test_approve_creates_treatment_for_recommended_owner() {
        let risk = analyzed_risk(InherentRisk::Medium);
        assert_eq!(risk.status, RiskStatus::RiskAnalyzed);
        assert!(risk.assessment.as_ref().unwrap().is_done());
        let treatment = risk.treatment.as_ref().unwrap();
        assert_eq!(treatment.status, TreatmentStatus::TreatmentDecisionReview);
        assert_eq!(treatment.risk_owner_id, Some(UserId::new("owner")));
        assert_eq!(risk.risk_owner_id, Some(UserId::new("owner")));
    }

    #[test]
    fn test_revision_cycle() {
        let sm = StateMachine::new();
        let mut risk = Risk::new("r", InherentRisk::Low);
        risk.status = RiskStatus::ActualRisk;
        run(
            &sm,
            &mut risk,
            WorkflowCommand::StartAssessment(StartAssessmentPayload {
                risk_assessor_id: Some(UserId::new("a")),
            }),
        );
        run(&sm, &mut risk, WorkflowCommand::SubmitAssessment(assessment_fields()));
        run(
            &sm,
            &mut risk,
            WorkflowCommand::RequestRevision {
                declined_reason: Some("Impact understated".into()),
            },
        );
        let assessment = risk.assessment.as_ref().unwrap();
        assert_eq!(assessment.status, AssessmentStatus::GrcRevision);
        assert_eq!(assessment.revision_count, 1);

        run(
            &sm,
            &mut risk,
            WorkflowCommand::CompleteRevision(AssessmentFields {
                impact_rationale: Some("Includes backup servers".into()),
                ..Default::default()
            }),
        );
        let assessment = risk.assessment.as_ref().unwrap();
        assert_eq!(assessment.status, AssessmentStatus::GrcApproval);
        assert_eq!(
            assessment.impact_rationale.as_deref(),
            Some("Includes backup servers")
        );
        assert_eq!(
            assessment.threat_description.as_deref(),
            Some("Ransomware via exposed RDP")
        );
        assert!(assessment.declined_reason.is_none());
    }

    #[test]
    fn test_high_risk_acceptance_escalates() {
        let sm = StateMachine::new();
        let mut risk = analyzed_risk(InherentRisk::High);
        run(
            &sm,
            &mut risk,
            WorkflowCommand::SubmitTreatment(SubmitTreatmentPayload {
                decision: Some(TreatmentDecision::Accept),
                justification: Some("Cost of fix exceeds exposure".into()),
                acceptance_rationale: Some("Legacy system retiring in Q3".into()),
                ..Default::default()
            }),
        );
        assert_eq!(
            risk.treatment.as_ref().unwrap().status,
            TreatmentStatus::IdentifyExecutiveApprover
        );

        run(
            &sm,
            &mut risk,
            WorkflowCommand::AssignApprover(AssignApproverPayload {
                executive_approver_id: Some(UserId::new("cio")),
            }),
        );
        assert!(risk.invariant_violations().is_empty());
        run(&sm, &mut risk, WorkflowCommand::ExecutiveApprove { notes: None });
        let treatment = risk.treatment.as_ref().unwrap();
        assert_eq!(treatment.status, TreatmentStatus::RiskAccept);
        assert!(treatment.completed_at.is_some());
    }

    #[test]
    fn test_low_risk_acceptance_is_auto_accepted() {
        let sm = StateMachine::new();
        let mut risk = analyzed_risk(InherentRisk::Low);
        run(
            &sm,
            &mut risk,
            WorkflowCommand::SubmitTreatment(SubmitTreatmentPayload {
                decision: Some(TreatmentDecision::Accept),
                justification: Some("Negligible exposure".into()),
                acceptance_rationale: Some("Within appetite".into()),
                ..Default::default()
            }),
        );
        assert_eq!(
            risk.treatment.as_ref().unwrap().status,
            TreatmentStatus::RiskAutoAccept
        );
    }

    #[test]
    fn test_executive_deny_returns_to_owner() {
        let sm = StateMachine::new();
        let mut risk = analyzed_risk(InherentRisk::VeryHigh);
        run(
            &sm,
            &mut risk,
            WorkflowCommand::SubmitTreatment(SubmitTreatmentPayload {
                decision: Some(TreatmentDecision::Transfer),
                justification: Some("Insurable".into()),
                transfer_to: Some("Cyber insurer".into()),
                ..Default::default()
            }),
        );
        run(
            &sm,
            &mut risk,
            WorkflowCommand::AssignApprover(AssignApproverPayload {
                executive_approver_id: Some(UserId::new("cfo")),
            }),
        );
        run(
            &sm,
            &mut risk,
            WorkflowCommand::ExecutiveDeny {
                denied_reason: Some("insufficient budget".into()),
            },
        );
        let treatment = risk.treatment.as_ref().unwrap();
        assert_eq!(treatment.status, TreatmentStatus::TreatmentDecisionReview);
        assert_eq!(treatment.denied_reason.as_deref(), Some("insufficient budget"));
    }

    #[test]
    fn test_mitigation_lifecycle() {
        let sm = StateMachine::new();
        let mut risk = analyzed_risk(InherentRisk::High);
        let target = NaiveDate::from_ymd_opt(2026, 12, 1).unwrap();
        run(
            &sm,
            &mut risk,
            WorkflowCommand::SubmitTreatment(SubmitTreatmentPayload {
                decision: Some(TreatmentDecision::Mitigate),
                justification: Some("Fix is cheap".into()),
                mitigation_plan: Some("Close RDP".into()),
                target_date: Some(target),
                ..Default::default()
            }),
        );
        let treatment = risk.treatment.as_ref().unwrap();
        assert_eq!(treatment.status, TreatmentStatus::RiskMitigationInProgress);
        assert_eq!(treatment.mitigation_status, Some(MitigationStatus::OnTrack));

        let new_target = NaiveDate::from_ymd_opt(2027, 2, 1).unwrap();
        run(
            &sm,
            &mut risk,
            WorkflowCommand::UpdateMitigation(UpdateMitigationPayload {
                status: Some(MitigationStatus::Delayed),
                progress: Some(40),
                new_target_date: Some(new_target),
                delay_reason: Some("Vendor patch late".into()),
                ..Default::default()
            }),
        );
        let treatment = risk.treatment.as_ref().unwrap();
        assert_eq!(treatment.details.target_date, Some(new_target));
        assert_eq!(treatment.effective_progress(), Some(40));

        run(
            &sm,
            &mut risk,
            WorkflowCommand::UpdateMitigation(UpdateMitigationPayload {
                status: Some(MitigationStatus::Done),
                residual_likelihood: Some(LikelihoodScore::Rare),
                residual_impact: Some(ImpactScore::Minor),
                ..Default::default()
            }),
        );
        let treatment = risk.treatment.as_ref().unwrap();
        assert_eq!(treatment.status, TreatmentStatus::RiskMitigationComplete);
        assert_eq!(treatment.mitigation_progress, 100);
        assert_eq!(treatment.residual_impact, Some(ImpactScore::Minor));
    }

    #[test]
    fn test_cancelled_mitigation_records_reason() {
        let sm = StateMachine::new();
        let mut risk = analyzed_risk(InherentRisk::High);
        run(
            &sm,
            &mut risk,
            WorkflowCommand::SubmitTreatment(SubmitTreatmentPayload {
                decision: Some(TreatmentDecision::Mitigate),
                justification: Some("Fix is cheap".into()),
                mitigation_plan: Some("Close RDP".into()),
                target_date: NaiveDate::from_ymd_opt(2026, 12, 1),
                ..Default::default()
            }),
        );
        run(
            &sm,
            &mut risk,
            WorkflowCommand::UpdateMitigation(UpdateMitigationPayload {
                status: Some(MitigationStatus::OnTrack),
                progress: Some(30),
                ..Default::default()
            }),
        );

        let before = risk.clone();
        let err = sm
            .apply(
                &mut risk,
                &WorkflowCommand::UpdateMitigation(UpdateMitigationPayload {
                    status: Some(MitigationStatus::Cancelled),
                    ..Default::default()
                }),
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(ref e) if e.contains_field("cancellationReason")));
        assert_eq!(risk, before);

        run(
            &sm,
            &mut risk,
            WorkflowCommand::UpdateMitigation(UpdateMitigationPayload {
                status: Some(MitigationStatus::Cancelled),
                cancellation_reason: Some("Server decommissioned".into()),
                ..Default::default()
            }),
        );
        let treatment = risk.treatment.as_ref().unwrap();
        assert_eq!(treatment.status, TreatmentStatus::RiskMitigationInProgress);
        assert_eq!(treatment.mitigation_status, Some(MitigationStatus::Cancelled));
        assert_eq!(
            treatment.cancellation_reason.as_deref(),
            Some("Server decommissioned")
        );
        assert_eq!(treatment.effective_progress(), None);
        assert!(treatment.completed_at.is_none());
        assert!(available_after(&risk).contains(&ActionKey::UpdateMitigation));
    }

    #[test]
    fn test_progress_out_of_range_rejected() {
        let sm = StateMachine::new();
        let mut risk = analyzed_risk(InherentRisk::Low);
        run(
            &sm,
            &mut risk,
            WorkflowCommand::SubmitTreatment(SubmitTreatmentPayload {
                decision: Some(TreatmentDecision::Mitigate),
                justification: Some("Fix is cheap".into()),
                mitigation_plan: Some("Close RDP".into()),
                target_date: NaiveDate::from_ymd_opt(2026, 12, 1),
                ..Default::default()
            }),
        );
        let before = risk.clone();
        let err = sm
            .apply(
                &mut risk,
                &WorkflowCommand::UpdateMitigation(UpdateMitigationPayload {
                    status: Some(MitigationStatus::OnTrack),
                    progress: Some(300),
                    ..Default::default()
                }),
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(ref e) if e.contains_field("progress")));
        assert_eq!(risk, before);
    }

    #[test]
    fn test_resubmission_after_denial_clears_executive_fields() {
        let sm = StateMachine::new();
        let mut risk = analyzed_risk(InherentRisk::VeryHigh);
        run(
            &sm,
            &mut risk,
            WorkflowCommand::SubmitTreatment(SubmitTreatmentPayload {
                decision: Some(TreatmentDecision::Accept),
                justification: Some("Cheaper to absorb".into()),
                acceptance_rationale: Some("Insured elsewhere".into()),
                ..Default::default()
            }),
        );
        run(
            &sm,
            &mut risk,
            WorkflowCommand::AssignApprover(AssignApproverPayload {
                executive_approver_id: Some(UserId::new("cfo")),
            }),
        );
        run(
            &sm,
            &mut risk,
            WorkflowCommand::ExecutiveDeny {
                denied_reason: Some("Exposure too large".into()),
            },
        );
        run(
            &sm,
            &mut risk,
            WorkflowCommand::SubmitTreatment(SubmitTreatmentPayload {
                decision: Some(TreatmentDecision::Mitigate),
                justification: Some("Executive asked for a fix".into()),
                mitigation_plan: Some("Close RDP".into()),
                target_date: NaiveDate::from_ymd_opt(2026, 12, 1),
                ..Default::default()
            }),
        );

        let treatment = risk.treatment.as_ref().unwrap();
        assert_eq!(treatment.status, TreatmentStatus::RiskMitigationInProgress);
        assert!(treatment.executive_approver_id.is_none());
        assert!(treatment.executive_notes.is_none());
        assert!(treatment.denied_reason.is_none());
        assert!(risk.invariant_violations().is_empty());
    }

    #[test]
    fn test_assign_owner_syncs_treatment() {
        let sm = StateMachine::new();
        let mut risk = analyzed_risk(InherentRisk::Low);
        run(
            &sm,
            &mut risk,
            WorkflowCommand::AssignRole(AssignRolePayload {
                role: Role::RiskOwner,
                user_id: Some(UserId::new("new-owner")),
            }),
        );
        assert_eq!(risk.risk_owner_id, Some(UserId::new("new-owner")));
        assert_eq!(
            risk.treatment.as_ref().unwrap().risk_owner_id,
            Some(UserId::new("new-owner"))
        );
    }

    #[test]
    fn test_assessor_assignment_closed_after_intake() {
        let sm = StateMachine::new();
        let mut risk = analyzed_risk(InherentRisk::Low);
        let err = sm
            .apply(
                &mut risk,
                &WorkflowCommand::AssignRole(AssignRolePayload {
                    role: Role::RiskAssessor,
                    user_id: None,
                }),
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::InvalidStateTransition {
                action: ActionKey::AssignAssessor,
                ..
            }
        ));
    }
}
