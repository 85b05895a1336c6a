pub mod trace;

pub use trace::{RankingTraceEntry, Trace, TraceSources, build_trace};
