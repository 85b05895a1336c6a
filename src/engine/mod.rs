pub mod contracts;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod runner;

pub use contracts::{
    DomainConfig, DomainDefinition, GoalStrategy, SignalSource, validate_domain_definition,
};
pub use error::{EngineError, EngineErrorKind};
pub use pipeline::{RunInputs, evaluate_and_decide, resolve_thresholds};
pub use ports::{DecisionStore, InMemoryDecisionStore};
pub use runner::{
    ActiveGoal, RunRequest, RunSettings, run_and_persist, run_decision, thresholds_from_target,
};
