//! Status enums for each workflow phase, and the derived phase itself
//!
//! Each phase has exactly one authoritative enum. Lists of valid values
//! for external validation come from the `ALL` constants, never from
//! hand-maintained string arrays.

use serde::{Deserialize, Serialize};

// ── Intake ───────────────────────────────────────────────────────────

/// Status carried on the Risk record itself
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskStatus {
    /// Reported, awaiting GRC validation
    RiskIdentified,
    /// GRC decided the report is not a risk (terminal)
    NotARisk,
    /// GRC confirmed the risk
    ActualRisk,
    /// Assessment has been started
    RiskAnalysisInProgress,
    /// Assessment approved by GRC
    RiskAnalyzed,
}

impl RiskStatus {
    pub const ALL: [RiskStatus; 5] = [
        RiskStatus::RiskIdentified,
        RiskStatus::NotARisk,
        RiskStatus::ActualRisk,
        RiskStatus::RiskAnalysisInProgress,
        RiskStatus::RiskAnalyzed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskStatus::RiskIdentified => "risk_identified",
            RiskStatus::NotARisk => "not_a_risk",
            RiskStatus::ActualRisk => "actual_risk",
            RiskStatus::RiskAnalysisInProgress => "risk_analysis_in_progress",
            RiskStatus::RiskAnalyzed => "risk_analyzed",
        }
    }

    /// Statuses in which the risk is still being triaged
    pub fn is_early_intake(&self) -> bool {
        matches!(self, RiskStatus::RiskIdentified | RiskStatus::ActualRisk)
    }
}

impl std::fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Assessment ───────────────────────────────────────────────────────

/// Status of the Assessment sub-object
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    RiskAssessorAnalysis,
    GrcApproval,
    GrcRevision,
    Done,
}

impl AssessmentStatus {
    pub const ALL: [AssessmentStatus; 4] = [
        AssessmentStatus::RiskAssessorAnalysis,
        AssessmentStatus::GrcApproval,
        AssessmentStatus::GrcRevision,
        AssessmentStatus::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentStatus::RiskAssessorAnalysis => "risk_assessor_analysis",
            AssessmentStatus::GrcApproval => "grc_approval",
            AssessmentStatus::GrcRevision => "grc_revision",
            AssessmentStatus::Done => "done",
        }
    }
}

impl std::fmt::Display for AssessmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Treatment ────────────────────────────────────────────────────────

/// Status of the Treatment sub-object
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentStatus {
    TreatmentDecisionReview,
    IdentifyExecutiveApprover,
    ExecutiveApproval,
    RiskMitigationInProgress,
    RiskMitigationComplete,
    RiskAccept,
    RiskTransfer,
    RiskAvoid,
    RiskAutoAccept,
}

impl TreatmentStatus {
    pub const ALL: [TreatmentStatus; 9] = [
        TreatmentStatus::TreatmentDecisionReview,
        TreatmentStatus::IdentifyExecutiveApprover,
        TreatmentStatus::ExecutiveApproval,
        TreatmentStatus::RiskMitigationInProgress,
        TreatmentStatus::RiskMitigationComplete,
        TreatmentStatus::RiskAccept,
        TreatmentStatus::RiskTransfer,
        TreatmentStatus::RiskAvoid,
        TreatmentStatus::RiskAutoAccept,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TreatmentStatus::TreatmentDecisionReview => "treatment_decision_review",
            TreatmentStatus::IdentifyExecutiveApprover => "identify_executive_approver",
            TreatmentStatus::ExecutiveApproval => "executive_approval",
            TreatmentStatus::RiskMitigationInProgress => "risk_mitigation_in_progress",
            TreatmentStatus::RiskMitigationComplete => "risk_mitigation_complete",
            TreatmentStatus::RiskAccept => "risk_accept",
            TreatmentStatus::RiskTransfer => "risk_transfer",
            TreatmentStatus::RiskAvoid => "risk_avoid",
            TreatmentStatus::RiskAutoAccept => "risk_auto_accept",
        }
    }

    /// No further workflow action is possible from a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TreatmentStatus::RiskMitigationComplete
                | TreatmentStatus::RiskAccept
                | TreatmentStatus::RiskTransfer
                | TreatmentStatus::RiskAvoid
                | TreatmentStatus::RiskAutoAccept
        )
    }
}

impl std::fmt::Display for TreatmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Phase ────────────────────────────────────────────────────────────

/// Workflow phase derived from a Risk's compound state.
///
/// Never stored; always recomputed from status and sub-object presence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Intake,
    Assessment,
    /// Assessment is done but no Treatment exists yet
    AwaitingTreatment,
    Treatment,
    Closed,
}

impl Phase {
    /// Position in the progress display; closed risks have none
    pub fn ordinal(&self) -> Option<u8> {
        match self {
            Phase::Intake => Some(0),
            Phase::Assessment => Some(1),
            Phase::AwaitingTreatment | Phase::Treatment => Some(2),
            Phase::Closed => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Intake => "intake",
            Phase::Assessment => "assessment",
            Phase::AwaitingTreatment => "awaiting_treatment",
            Phase::Treatment => "treatment",
            Phase::Closed => "closed",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How phase derivation treats a done Assessment with no Treatment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseMode {
    /// Report the gap as [`Phase::AwaitingTreatment`]
    #[default]
    Explicit,
    /// Fall back to [`Phase::Intake`], matching records persisted by
    /// earlier deployments
    Legacy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_lists_are_complete() {
        for status in RiskStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        for status in AssessmentStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        for status in TreatmentStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn test_terminal_treatment_statuses() {
        let terminal: Vec<_> = TreatmentStatus::ALL
            .iter()
            .filter(|s| s.is_terminal())
            .collect();
        assert_eq!(terminal.len(), 5);
        assert!(!TreatmentStatus::ExecutiveApproval.is_terminal());
        assert!(!TreatmentStatus::RiskMitigationInProgress.is_terminal());
    }

    #[test]
    fn test_early_intake() {
        assert!(RiskStatus::RiskIdentified.is_early_intake());
        assert!(RiskStatus::ActualRisk.is_early_intake());
        assert!(!RiskStatus::RiskAnalyzed.is_early_intake());
        assert!(!RiskStatus::NotARisk.is_early_intake());
    }

    #[test]
    fn test_phase_ordinals() {
        assert_eq!(Phase::Intake.ordinal(), Some(0));
        assert_eq!(Phase::AwaitingTreatment.ordinal(), Phase::Treatment.ordinal());
        assert_eq!(Phase::Closed.ordinal(), None);
    }

    #[test]
    fn test_phase_mode_default() {
        assert_eq!(PhaseMode::default(), PhaseMode::Explicit);
        assert_eq!(
            serde_json::from_str::<PhaseMode>("\"legacy\"").unwrap(),
            PhaseMode::Legacy
        );
    }
}
