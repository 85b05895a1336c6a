pub mod determinism;
pub mod diff;
pub mod hashing;
pub mod history;

pub use determinism::{
    Baseline, DeterminismReason, GovernanceRecord, find_baseline, verify_determinism,
};
pub use diff::{RunDiff, diff_runs};
pub use hashing::{canonical_hash, canonical_json};
pub use history::{HistorySummary, summarize_history};
