pub mod ranker;
pub mod record;
pub mod types;

pub use ranker::{rank, ranking_score};
pub use record::{DecisionRecord, DecisionResult, GovernedDecision};
pub use types::{Evaluation, Recommendation, RecommendationCategory, RiskCode, Thresholds};
