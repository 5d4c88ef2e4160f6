//! Assessment: the assessor's analysis of a confirmed risk
//!
//! An Assessment is owned by its Risk and exists from `start_assessment`
//! onwards. Revisions mutate it in place; there is no history of prior
//! values, only a revision counter.

use crate::{AssessmentStatus, ImpactScore, LikelihoodScore, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Assessment value object
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub status: AssessmentStatus,
    pub risk_assessor_id: UserId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threat_description: Option<String>,
    #[serde(default)]
    pub affected_assets: Vec<String>,
    #[serde(default)]
    pub existing_controls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vulnerabilities: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likelihood_score: Option<LikelihoodScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likelihood_rationale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_score: Option<ImpactScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_rationale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_owner_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment_recommendation: Option<String>,

    /// Notes left by GRC when approving
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_notes: Option<String>,
    /// Reason GRC sent the assessment back, cleared on resubmission
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declined_reason: Option<String>,
    /// Number of times GRC requested a revision
    #[serde(default)]
    pub revision_count: u32,

    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Assessment {
    /// Start a new assessment in `risk_assessor_analysis`
    pub fn new(risk_assessor_id: UserId, started_at: DateTime<Utc>) -> Self {
        Self {
            status: AssessmentStatus::RiskAssessorAnalysis,
            risk_assessor_id,
            threat_description: None,
            affected_assets: Vec::new(),
            existing_controls: Vec::new(),
            vulnerabilities: None,
            likelihood_score: None,
            likelihood_rationale: None,
            impact_score: None,
            impact_rationale: None,
            recommended_owner_id: None,
            assessment_notes: None,
            treatment_recommendation: None,
            review_notes: None,
            declined_reason: None,
            revision_count: 0,
            started_at,
            submitted_at: None,
            completed_at: None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == AssessmentStatus::Done
    }

    /// True once all fields required for GRC review are filled in
    pub fn is_complete(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        filled(&self.threat_description)
            && self.likelihood_score.is_some()
            && filled(&self.likelihood_rationale)
            && self.impact_score.is_some()
            && filled(&self.impact_rationale)
            && self.recommended_owner_id.is_some()
    }
}
