use alignment_engine::{
    decision::types::RiskCode,
    signals::{SignalBundle, SignalName},
    strategies::detect_additional_risks,
};

use crate::bundle;

#[test]
fn given_absent_signals_when_detect_additional_risks_then_nothing_fires() {
    assert!(detect_additional_risks(&SignalBundle::empty()).is_empty());
}

#[test]
fn given_poor_signals_when_detect_additional_risks_then_sorted_unique_codes() {
    let signals = bundle(&[
        (SignalName::VolatilityIndex, 0.2),
        (SignalName::RecoveryIndex, 0.3),
        (SignalName::ComplianceRatio, 0.5),
        (SignalName::ProgressiveOverloadScore, 0.1),
    ]);

    assert_eq!(
        detect_additional_risks(&signals),
        vec![
            RiskCode::ComplianceDrop,
            RiskCode::RecoveryDrop,
            RiskCode::StallRisk,
            RiskCode::VolatilitySpike,
        ]
    );
}
