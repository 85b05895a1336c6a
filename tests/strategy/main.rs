mod rules;

use alignment_engine::signals::{SignalBundle, SignalName};

pub fn bundle(values: &[(SignalName, f64)]) -> SignalBundle {
    SignalBundle::from_signals(values.iter().map(|(name, value)| (*name, Some(*value))))
}
