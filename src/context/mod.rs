pub mod cycle;
pub mod registry;
pub mod types;

pub use cycle::{CycleContext, CyclePhase};
pub use registry::apply_context;
pub use types::{
    CONTEXT_VERSION, ContextInput, ContextModulator, ContextResult, PRIORITY_SCORE_SCALE,
};
