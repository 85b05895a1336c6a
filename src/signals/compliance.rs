use crate::{math::clamp01, signals::types::TrainingSession};

pub fn compliance_ratio(completed: usize, planned: usize) -> Option<f64> {
    if planned == 0 {
        return None;
    }
    Some(clamp01(completed as f64 / planned as f64))
}

/// Completed share of planned sessions. Unplanned sessions are ignored.
pub fn compliance_from_sessions(sessions: &[&TrainingSession]) -> Option<f64> {
    let planned: Vec<_> = sessions.iter().filter(|s| s.planned_flag).collect();
    let completed = planned.iter().filter(|s| s.completed_flag).count();
    compliance_ratio(completed, planned.len())
}
