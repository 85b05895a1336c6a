pub mod plan;
pub mod series;
pub mod stagnation;
pub mod weekly;

pub use plan::{PlanSeverity, TomorrowPlan, build_tomorrow_plan};
pub use series::signal_series;
pub use stagnation::{
    DEFAULT_MIN_POINTS, STAGNATION_VERSION, Severity, StagnationAlert, detect_stagnation_alerts,
};
pub use weekly::{Direction, VolatilityDirection, WeeklyInsight, build_weekly_insight};
