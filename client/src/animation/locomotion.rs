//! Phase-driven locomotion cycle.
//!
//! Angles are flexion magnitudes in radians: positive hip and shoulder values
//! swing the limb forward, knee values bend the shin backward and never go
//! negative.

use super::tuning::LocomotionTuning;
use std::f32::consts::TAU;

/// Baseline angles produced by the locomotion cycle for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocomotionPose {
    pub left_hip: f32,
    pub right_hip: f32,
    pub left_knee: f32,
    pub right_knee: f32,
    pub left_foot: f32,
    pub right_foot: f32,
    pub left_shoulder: f32,
    pub right_shoulder: f32,
}

/// Phase advance per second for the given movement signals.
pub fn cycle_rate(speed: f32, grounded: bool, tuning: &LocomotionTuning) -> f32 {
    if !grounded {
        return tuning.airborne_rate;
    }
    let speed = speed.max(0.0);
    (speed * tuning.rate_per_speed + tuning.base_rate).clamp(tuning.min_rate, tuning.max_rate)
}

/// Advances `phase` by one frame and wraps it into `[0, 2π)`.
pub fn advance_phase(
    phase: f32,
    delta_time: f32,
    speed: f32,
    grounded: bool,
    tuning: &LocomotionTuning,
) -> f32 {
    (phase + delta_time * cycle_rate(speed, grounded, tuning)).rem_euclid(TAU)
}

/// Stride amplitude in `[idle_amplitude, 1]`. Standing actors keep the idle
/// floor, so the cycle never stops.
pub fn stride_amplitude(speed: f32, tuning: &LocomotionTuning) -> f32 {
    let stride = (speed.max(0.0) / tuning.stride_speed_cap).min(1.0);
    stride.max(tuning.idle_amplitude)
}

/// Samples the cycle at `phase`. Airborne actors hold the falling pose.
pub fn locomotion_pose(
    phase: f32,
    speed: f32,
    grounded: bool,
    tuning: &LocomotionTuning,
) -> LocomotionPose {
    if !grounded {
        let falling = &tuning.falling;
        return LocomotionPose {
            left_hip: falling.left_hip,
            right_hip: falling.right_hip,
            left_knee: falling.left_knee,
            right_knee: falling.right_knee,
            left_foot: falling.feet,
            right_foot: falling.feet,
            left_shoulder: falling.shoulders,
            right_shoulder: falling.shoulders,
        };
    }

    let swing = phase.sin() * stride_amplitude(speed, tuning);

    LocomotionPose {
        left_hip: swing * tuning.hip_swing,
        right_hip: -swing * tuning.hip_swing,
        left_knee: (swing * tuning.knee_bend).max(0.0),
        right_knee: (-swing * tuning.knee_bend).max(0.0),
        left_foot: (-swing * tuning.foot_flex).max(0.0),
        right_foot: (swing * tuning.foot_flex).max(0.0),
        // Arms counter-swing against the leg on the same side.
        left_shoulder: -swing * tuning.arm_swing,
        right_shoulder: swing * tuning.arm_swing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn tuning() -> LocomotionTuning {
        LocomotionTuning::default()
    }

    #[test]
    fn rate_is_clamped() {
        let tuning = tuning();
        assert_eq!(cycle_rate(0.0, true, &tuning), tuning.base_rate.max(tuning.min_rate));
        assert_eq!(cycle_rate(1000.0, true, &tuning), tuning.max_rate);
        assert_eq!(cycle_rate(1000.0, false, &tuning), tuning.airborne_rate);
    }

    #[test]
    fn idle_actor_still_cycles() {
        let tuning = tuning();
        let phase = advance_phase(0.0, 0.5, 0.0, true, &tuning);
        assert!(phase > 0.0);

        let pose = locomotion_pose(FRAC_PI_2, 0.0, true, &tuning);
        assert!(pose.left_hip > 0.0);
        assert!(pose.left_hip <= tuning.idle_amplitude);
    }

    #[test]
    fn amplitude_saturates_at_speed_cap() {
        let tuning = tuning();
        assert_eq!(stride_amplitude(tuning.stride_speed_cap * 3.0, &tuning), 1.0);
        assert!((stride_amplitude(tuning.stride_speed_cap * 0.5, &tuning) - 0.5).abs() < 1e-6);
        assert_eq!(stride_amplitude(0.0, &tuning), tuning.idle_amplitude);
    }

    #[test]
    fn legs_are_mirrored_and_knees_only_bend_one_way() {
        let tuning = tuning();
        for step in 0..64 {
            let phase = step as f32 / 64.0 * TAU;
            let pose = locomotion_pose(phase, 3.0, true, &tuning);
            assert!((pose.left_hip + pose.right_hip).abs() < 1e-6);
            assert!(pose.left_knee >= 0.0 && pose.right_knee >= 0.0);
            assert!(pose.left_foot >= 0.0 && pose.right_foot >= 0.0);
            assert!(pose.left_shoulder * pose.left_hip <= 0.0);
        }
    }

    #[test]
    fn airborne_holds_falling_pose_while_phase_advances() {
        let tuning = tuning();
        let first = locomotion_pose(0.3, 5.0, false, &tuning);
        let second = locomotion_pose(2.1, 5.0, false, &tuning);
        assert_eq!(first, second);
        assert_eq!(first.left_hip, tuning.falling.left_hip);
        assert!(advance_phase(0.3, 0.1, 5.0, false, &tuning) > 0.3);
    }

    #[test]
    fn phase_wraps_and_pose_is_periodic() {
        let tuning = tuning();
        let speed = 2.0;
        let rate = cycle_rate(speed, true, &tuning);
        let start = 0.4;
        let before = locomotion_pose(start, speed, true, &tuning);

        // Four quarter-turns of constant rate bring the phase back around.
        let delta_time = TAU / rate / 4.0;
        let mut phase = start;
        for _ in 0..8 {
            phase = advance_phase(phase, delta_time, speed, true, &tuning);
            assert!((0.0..TAU).contains(&phase));
        }
        let after = locomotion_pose(phase, speed, true, &tuning);

        assert!((phase - start).abs() < 1e-4, "phase={phase}");
        assert!((after.left_hip - before.left_hip).abs() < 1e-4);
        assert!((after.right_knee - before.right_knee).abs() < 1e-4);
    }
}
