use crate::{math::clamp01, signals::types::TrainingSession};

const HIGH_INTENSITY_STREAK_SPAN: f64 = 3.0;
const CONTINUOUS_STREAK_GRACE_SESSIONS: usize = 2;
const CONTINUOUS_STREAK_SPAN: f64 = 5.0;

/// Recovery index from already-normalized load terms. Higher is better.
pub fn recovery_index(
    session_density: f64,
    high_intensity_streak: f64,
    continuous_streak_penalty: f64,
) -> f64 {
    let risk = 0.5 * clamp01(session_density)
        + 0.3 * clamp01(high_intensity_streak)
        + 0.2 * clamp01(continuous_streak_penalty);
    clamp01(1.0 - risk)
}

/// Recovery index over date-ordered `sessions` from a `window_days` window.
///
/// Every session in the window extends the training streak, rest days included.
pub fn recovery_from_sessions(
    sessions: &[&TrainingSession],
    window_days: u32,
    high_intensity_rpe: f64,
) -> Option<f64> {
    if sessions.is_empty() {
        return None;
    }

    let density = sessions.len() as f64 / f64::from(window_days.max(1));

    let mut longest_high = 0usize;
    let mut current_high = 0usize;
    for session in sessions {
        if session
            .avg_rpe
            .is_some_and(|rpe| rpe >= high_intensity_rpe)
        {
            current_high += 1;
            longest_high = longest_high.max(current_high);
        } else {
            current_high = 0;
        }
    }
    let high_streak_norm = (longest_high as f64 / HIGH_INTENSITY_STREAK_SPAN).min(1.0);

    let training_streak = sessions.len().saturating_sub(CONTINUOUS_STREAK_GRACE_SESSIONS);
    let continuous_penalty = (training_streak as f64 / CONTINUOUS_STREAK_SPAN).min(1.0);

    Some(recovery_index(density, high_streak_norm, continuous_penalty))
}
