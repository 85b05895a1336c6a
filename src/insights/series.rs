use crate::decision::record::DecisionRecord;

/// Values of one trace signal across `runs` (newest first), oldest first.
/// Runs where the signal was not computed are skipped.
pub fn signal_series(runs: &[DecisionRecord], name: &str) -> Vec<f64> {
    runs.iter()
        .rev()
        .filter_map(|run| run.signal_value(name))
        .collect()
}
