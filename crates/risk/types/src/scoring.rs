//! Severity and scoring scales

use serde::{Deserialize, Serialize};

/// Severity of a risk before any controls are applied.
///
/// Only used to decide whether a treatment decision needs executive
/// sign-off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InherentRisk {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl InherentRisk {
    /// High and very high inherent risk are above the escalation threshold
    pub fn is_above_escalation_threshold(&self) -> bool {
        matches!(self, InherentRisk::High | InherentRisk::VeryHigh)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InherentRisk::Low => "low",
            InherentRisk::Medium => "medium",
            InherentRisk::High => "high",
            InherentRisk::VeryHigh => "very_high",
        }
    }
}

impl std::fmt::Display for InherentRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Likelihood scale used by assessments and residual scoring
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LikelihoodScore {
    Rare,
    Unlikely,
    Possible,
    Likely,
    AlmostCertain,
}

impl LikelihoodScore {
    pub fn as_str(&self) -> &'static str {
        match self {
            LikelihoodScore::Rare => "rare",
            LikelihoodScore::Unlikely => "unlikely",
            LikelihoodScore::Possible => "possible",
            LikelihoodScore::Likely => "likely",
            LikelihoodScore::AlmostCertain => "almost_certain",
        }
    }
}

impl std::fmt::Display for LikelihoodScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Impact scale used by assessments and residual scoring
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactScore {
    Negligible,
    Minor,
    Moderate,
    Major,
    Severe,
}

impl ImpactScore {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactScore::Negligible => "negligible",
            ImpactScore::Minor => "minor",
            ImpactScore::Moderate => "moderate",
            ImpactScore::Major => "major",
            ImpactScore::Severe => "severe",
        }
    }
}

impl std::fmt::Display for ImpactScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
