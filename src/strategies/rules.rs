use std::collections::BTreeSet;

use crate::{decision::types::RiskCode, signals::SignalBundle};

const RECOVERY_FLOOR: f64 = 0.45;
const COMPLIANCE_FLOOR: f64 = 0.65;
const VOLATILITY_CEILING: f64 = 0.10;
const OVERLOAD_FLOOR: f64 = 0.5;

/// Goal-independent rules on raw signal values. Absent signals never trigger.
pub fn detect_additional_risks(signals: &SignalBundle) -> Vec<RiskCode> {
    let mut risks = BTreeSet::new();
    if signals.recovery_index().is_some_and(|v| v < RECOVERY_FLOOR) {
        risks.insert(RiskCode::RecoveryDrop);
    }
    if signals.compliance_ratio().is_some_and(|v| v < COMPLIANCE_FLOOR) {
        risks.insert(RiskCode::ComplianceDrop);
    }
    if signals
        .volatility_index()
        .is_some_and(|v| v > VOLATILITY_CEILING)
    {
        risks.insert(RiskCode::VolatilitySpike);
    }
    if signals
        .progressive_overload_score()
        .is_some_and(|v| v < OVERLOAD_FLOOR)
    {
        risks.insert(RiskCode::StallRisk);
    }
    risks.into_iter().collect()
}
