//! Phase derivation from a Risk's compound state

use risk_types::{Phase, PhaseMode, Risk, RiskStatus};

/// Derive the current phase of `risk`.
///
/// Precedence, first match wins:
/// 1. `not_a_risk` is closed.
/// 2. `risk_identified` / `actual_risk` is intake.
/// 3. `risk_analysis_in_progress`, or an Assessment that is not done, is
///    assessment.
/// 4. A present Treatment is treatment.
/// 5. Otherwise intake, unless `mode` is [`PhaseMode::Explicit`] and the
///    Assessment is done, which is awaiting treatment.
pub fn derive_phase(risk: &Risk, mode: PhaseMode) -> Phase {
    if risk.status == RiskStatus::NotARisk {
        return Phase::Closed;
    }

    if risk.status.is_early_intake() {
        return Phase::Intake;
    }

    let assessment_open = risk.assessment.as_ref().is_some_and(|a| !a.is_done());
    if risk.status == RiskStatus::RiskAnalysisInProgress || assessment_open {
        return Phase::Assessment;
    }

    if risk.treatment.is_some() {
        return Phase::Treatment;
    }

    let assessment_done = risk.assessment.as_ref().is_some_and(|a| a.is_done());
    match mode {
        PhaseMode::Explicit if assessment_done => Phase::AwaitingTreatment,
        _ => Phase::Intake,
    }
}
