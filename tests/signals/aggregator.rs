use alignment_engine::{
    engine::SignalSource,
    signals::{ObservationLogs, SignalConfig, SignalName, WeightLog, compute_signals},
};

use crate::{AS_OF, day, session, two_week_logs};

fn config() -> SignalConfig {
    SignalConfig {
        as_of: Some(AS_OF),
        ..SignalConfig::default()
    }
}

#[test]
fn given_no_logs_when_compute_signals_then_every_signal_is_insufficient() {
    let bundle = compute_signals(&ObservationLogs::default(), &SignalConfig::default());

    assert_eq!(bundle.missing_count(), SignalName::ALL.len());
    for name in SignalName::ALL {
        assert_eq!(bundle.get(name), None);
    }
    assert!(bundle.sufficiency().values().all(|ok| !ok));
    assert_eq!(bundle.observed_days(), 0);
}

#[test]
fn given_two_weeks_of_logs_when_compute_signals_then_all_signals_present() {
    let bundle = compute_signals(&two_week_logs(), &config());

    assert_eq!(bundle.missing_count(), 0);
    let slope = bundle.trend_slope().expect("trend slope");
    assert!((slope + 0.1).abs() < 1e-9, "slope={slope}");
    assert_eq!(bundle.compliance_ratio(), Some(1.0));
    assert!(bundle.volatility_index().is_some_and(|v| v > 0.0 && v < 0.05));
    assert!(
        bundle
            .recovery_index()
            .is_some_and(|v| (0.0..=1.0).contains(&v))
    );
    assert_eq!(bundle.observed_days(), 14);
}

#[test]
fn given_logs_outside_lookback_when_compute_signals_then_they_are_ignored() {
    let mut logs = two_week_logs();
    logs.weight_logs.push(WeightLog {
        log_date: day(60),
        weight_kg: 120.0,
    });
    logs.training_sessions.push(session(day(45), "push", 1.0, 9.5));

    let with_stale = compute_signals(&logs, &config());
    let without_stale = compute_signals(&two_week_logs(), &config());

    assert_eq!(with_stale.signal_payload(), without_stale.signal_payload());
    assert_eq!(with_stale.window().weight_log_count, 14);
    assert_eq!(with_stale.window().start, Some(day(27)));
}

#[test]
fn given_unordered_logs_when_compute_signals_then_result_matches_ordered_input() {
    let ordered = two_week_logs();
    let mut shuffled = ordered.clone();
    shuffled.weight_logs.reverse();
    shuffled.training_sessions.reverse();

    assert_eq!(
        compute_signals(&ordered, &config()),
        compute_signals(&shuffled, &config())
    );
}

#[test]
fn given_sessions_without_plan_when_compute_signals_then_compliance_is_missing() {
    let mut logs = two_week_logs();
    for session in &mut logs.training_sessions {
        session.planned_flag = false;
    }

    let bundle = compute_signals(&logs, &config());
    assert_eq!(bundle.compliance_ratio(), None);
    assert_eq!(bundle.sufficiency().get("compliance_ratio"), Some(&false));
}

#[test]
fn given_sessions_before_recovery_window_when_compute_signals_then_excluded_from_recovery() {
    let logs = ObservationLogs {
        training_sessions: vec![
            session(day(20), "push", 5000.0, 9.0),
            session(day(15), "pull", 5100.0, 9.0),
            session(day(10), "legs", 5200.0, 9.0),
            session(day(2), "core", 5300.0, 7.0),
            session(day(1), "push", 5400.0, 7.0),
        ],
        ..ObservationLogs::default()
    };

    let bundle = compute_signals(&logs, &config());

    // only the last two sessions fall inside the seven-day recovery window
    let recovery = bundle.recovery_index().expect("recovery");
    assert!((recovery - 0.8571428571428572).abs() < 1e-12, "recovery={recovery}");
    assert_eq!(bundle.window().training_session_count, 5);
}
