pub mod aggregator;
pub mod balance;
pub mod compliance;
pub mod overload;
pub mod recovery;
pub mod trend;
pub mod types;
pub mod volatility;

pub use aggregator::{SignalConfig, compute_signals};
pub use balance::{MuscleGroup, muscle_balance_index};
pub use compliance::compliance_ratio;
pub use overload::progressive_overload_score;
pub use recovery::{recovery_from_sessions, recovery_index};
pub use trend::linear_regression_slope;
pub use types::{
    IntakeLog, ObservationLogs, ObservationWindow, SignalBundle, SignalName, TrainingSession,
    WeightLog,
};
pub use volatility::coefficient_of_variation;
