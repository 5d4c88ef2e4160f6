//! Treatment: how the organization addresses an assessed risk

use crate::{ImpactScore, LikelihoodScore, TreatmentStatus, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The Risk Owner's treatment decision
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentDecision {
    Mitigate,
    Accept,
    Transfer,
    Avoid,
}

impl TreatmentDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            TreatmentDecision::Mitigate => "mitigate",
            TreatmentDecision::Accept => "accept",
            TreatmentDecision::Transfer => "transfer",
            TreatmentDecision::Avoid => "avoid",
        }
    }

    /// Status entered when the decision needs no executive sign-off.
    ///
    /// An acceptance below the escalation threshold is recorded as
    /// `risk_auto_accept` so it stays distinguishable from an
    /// executive-approved acceptance.
    pub fn status_without_escalation(&self) -> TreatmentStatus {
        match self {
            TreatmentDecision::Mitigate => TreatmentStatus::RiskMitigationInProgress,
            TreatmentDecision::Accept => TreatmentStatus::RiskAutoAccept,
            TreatmentDecision::Transfer => TreatmentStatus::RiskTransfer,
            TreatmentDecision::Avoid => TreatmentStatus::RiskAvoid,
        }
    }

    /// Status entered once an executive approves the decision
    pub fn status_after_executive_approval(&self) -> TreatmentStatus {
        match self {
            TreatmentDecision::Mitigate => TreatmentStatus::RiskMitigationInProgress,
            TreatmentDecision::Accept => TreatmentStatus::RiskAccept,
            TreatmentDecision::Transfer => TreatmentStatus::RiskTransfer,
            TreatmentDecision::Avoid => TreatmentStatus::RiskAvoid,
        }
    }
}

impl std::fmt::Display for TreatmentDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress state of a mitigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MitigationStatus {
    OnTrack,
    Delayed,
    Cancelled,
    Done,
}

impl MitigationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MitigationStatus::OnTrack => "on_track",
            MitigationStatus::Delayed => "delayed",
            MitigationStatus::Cancelled => "cancelled",
            MitigationStatus::Done => "done",
        }
    }
}

impl std::fmt::Display for MitigationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision-specific fields captured by `submit_treatment`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mitigation_plan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avoidance_strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceptance_rationale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceptance_expiry: Option<NaiveDate>,
}

/// Treatment value object, owned by its Risk
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Treatment {
    pub status: TreatmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<TreatmentDecision>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
    #[serde(default)]
    pub details: DecisionDetails,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_owner_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executive_approver_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executive_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub denied_reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mitigation_status: Option<MitigationStatus>,
    #[serde(default)]
    pub mitigation_progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mitigation_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residual_likelihood: Option<LikelihoodScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residual_impact: Option<ImpactScore>,

    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Treatment {
    /// Open a treatment awaiting the Risk Owner's decision
    pub fn new(risk_owner_id: Option<UserId>, created_at: DateTime<Utc>) -> Self {
        Self {
            status: TreatmentStatus::TreatmentDecisionReview,
            decision: None,
            justification: None,
            details: DecisionDetails::default(),
            risk_owner_id,
            executive_approver_id: None,
            executive_notes: None,
            denied_reason: None,
            mitigation_status: None,
            mitigation_progress: 0,
            mitigation_notes: None,
            delay_reason: None,
            cancellation_reason: None,
            residual_likelihood: None,
            residual_impact: None,
            created_at,
            decided_at: None,
            completed_at: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Mitigation progress, or `None` while the mitigation is cancelled
    /// or not yet started
    pub fn effective_progress(&self) -> Option<u8> {
        match self.mitigation_status {
            Some(MitigationStatus::Cancelled) | None => None,
            Some(_) => Some(self.mitigation_progress),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping_without_escalation() {
        assert_eq!(
            TreatmentDecision::Mitigate.status_without_escalation(),
            TreatmentStatus::RiskMitigationInProgress
        );
        assert_eq!(
            TreatmentDecision::Accept.status_without_escalation(),
            TreatmentStatus::RiskAutoAccept
        );
        assert_eq!(
            TreatmentDecision::Transfer.status_without_escalation(),
            TreatmentStatus::RiskTransfer
        );
        assert_eq!(
            TreatmentDecision::Avoid.status_without_escalation(),
            TreatmentStatus::RiskAvoid
        );
    }

    #[test]
    fn test_status_mapping_after_executive_approval() {
        assert_eq!(
            TreatmentDecision::Accept.status_after_executive_approval(),
            TreatmentStatus::RiskAccept
        );
        assert_eq!(
            TreatmentDecision::Mitigate.status_after_executive_approval(),
            TreatmentStatus::RiskMitigationInProgress
        );
    }

    #[test]
    fn test_effective_progress() {
        let mut t = Treatment::new(None, Utc::now());
        assert_eq!(t.effective_progress(), None);

        t.mitigation_status = Some(MitigationStatus::OnTrack);
        t.mitigation_progress = 40;
        assert_eq!(t.effective_progress(), Some(40));

        t.mitigation_status = Some(MitigationStatus::Cancelled);
        assert_eq!(t.effective_progress(), None);
    }

    #[test]
    fn test_details_dates_roundtrip_as_iso() {
        let details = DecisionDetails {
            target_date: NaiveDate::from_ymd_opt(2026, 12, 31),
            ..Default::default()
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["targetDate"], "2026-12-31");
    }
}
