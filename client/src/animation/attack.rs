//! One-shot attack swing driven by `AnimationState::attack_timer`.

use super::state::AnimationState;
use super::tuning::AttackTuning;
use std::f32::consts::PI;

/// Remaining time below which the timer snaps to zero, absorbing the rounding
/// left by summing fixed frame deltas.
const TIMER_SNAP: f32 = 1e-4;

/// Arm and weapon offsets of an active swing (radians).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SwingPose {
    pub shoulder: f32,
    pub elbow: f32,
    pub weapon: f32,
}

/// Starts a swing, restarting any swing already in progress.
pub fn trigger(state: &mut AnimationState, tuning: &AttackTuning) {
    state.attack_timer = tuning.duration;
}

/// Counts the swing timer down by one frame, flooring at zero.
pub fn tick(state: &mut AnimationState, delta_time: f32) {
    if state.attack_timer <= 0.0 {
        return;
    }
    let remaining = state.attack_timer - delta_time;
    state.attack_timer = if remaining <= TIMER_SNAP { 0.0 } else { remaining };
}

/// Swing progress in `[0, 1]`; 1 once the timer has run out.
pub fn progress(attack_timer: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return 1.0;
    }
    (1.0 - attack_timer / duration).clamp(0.0, 1.0)
}

/// Swing magnitude: rises then falls, zero at both ends.
pub fn magnitude(progress: f32) -> f32 {
    (progress * PI).sin().max(0.0)
}

/// Offsets of the current swing, or `None` when no swing is active.
pub fn swing_pose(state: &AnimationState, tuning: &AttackTuning) -> Option<SwingPose> {
    if !state.is_swinging() {
        return None;
    }
    let strength = magnitude(progress(state.attack_timer, tuning.duration));
    Some(SwingPose {
        shoulder: strength * tuning.shoulder_swing,
        elbow: strength * tuning.elbow_swing,
        weapon: strength * tuning.weapon_swing,
    })
}
