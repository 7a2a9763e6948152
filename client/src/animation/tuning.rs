use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected tuning values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TuningError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must lie in [0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f32 },

    #[error("locomotion rate range is inverted: min={min} max={max}")]
    InvertedRateRange { min: f32, max: f32 },
}

/// Fixed pose held while the actor is airborne (radians).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallingPose {
    pub left_hip: f32,
    pub right_hip: f32,
    pub left_knee: f32,
    pub right_knee: f32,
    pub feet: f32,
    pub shoulders: f32,
}

impl Default for FallingPose {
    fn default() -> Self {
        Self {
            left_hip: 0.45,
            right_hip: -0.25,
            left_knee: 0.7,
            right_knee: 0.35,
            feet: 0.15,
            shoulders: -0.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionTuning {
    /// Cycle rate gained per unit of speed (rad/s per unit/s).
    pub rate_per_speed: f32,
    /// Grounded cycle rate at zero speed (rad/s).
    pub base_rate: f32,
    pub min_rate: f32,
    pub max_rate: f32,
    pub airborne_rate: f32,
    /// Speed at which the stride reaches full amplitude.
    pub stride_speed_cap: f32,
    /// Amplitude floor so an idle actor keeps a faint sway.
    pub idle_amplitude: f32,
    pub hip_swing: f32,
    pub knee_bend: f32,
    pub foot_flex: f32,
    pub arm_swing: f32,
    pub idle_elbow_bend: f32,
    pub falling: FallingPose,
}

impl Default for LocomotionTuning {
    fn default() -> Self {
        Self {
            rate_per_speed: 1.8,
            base_rate: 1.2,
            min_rate: 1.0,
            max_rate: 12.0,
            airborne_rate: 2.0,
            stride_speed_cap: 4.5,
            idle_amplitude: 0.05,
            hip_swing: 0.7,
            knee_bend: 0.9,
            foot_flex: 0.35,
            arm_swing: 0.55,
            idle_elbow_bend: 0.15,
            falling: FallingPose::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackTuning {
    /// Length of one swing (seconds).
    pub duration: f32,
    pub shoulder_swing: f32,
    pub elbow_swing: f32,
    pub weapon_swing: f32,
}

impl Default for AttackTuning {
    fn default() -> Self {
        Self {
            duration: 0.55,
            shoulder_swing: 1.9,
            elbow_swing: 0.7,
            weapon_swing: 1.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AimTuning {
    /// IK influence used when neither the context nor the archetype gives one.
    pub default_strength: f32,
    /// Per-frame exponential smoothing factor of the blend weight.
    pub blend_smoothing: f32,
    /// Blend weight lost per second while no valid aim exists.
    pub blend_decay_rate: f32,
    /// Margin kept from the reach limits and the degenerate-target threshold.
    pub reach_epsilon: f32,
    /// Preferred elbow hinge axis in body space.
    pub bend_hint: [f32; 3],
    /// Wrist flexion as a fraction of the elbow bend.
    pub hand_flex_ratio: f32,
}

impl Default for AimTuning {
    fn default() -> Self {
        Self {
            default_strength: 0.75,
            blend_smoothing: 0.25,
            blend_decay_rate: 2.0,
            reach_epsilon: 1e-3,
            bend_hint: [1.0, 0.0, 0.0],
            hand_flex_ratio: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookTuning {
    pub head_yaw_limit: f32,
    pub head_pitch_limit: f32,
    /// Downward head lean per unit of speed.
    pub lean_per_speed: f32,
    pub max_lean: f32,
    /// Torso yaw opposing the head yaw, scaled by the aim blend.
    pub torso_counter_ratio: f32,
    pub torso_smoothing: f32,
}

impl Default for LookTuning {
    fn default() -> Self {
        Self {
            head_yaw_limit: 1.1,
            head_pitch_limit: 0.9,
            lean_per_speed: 0.02,
            max_lean: 0.15,
            torso_counter_ratio: 0.25,
            torso_smoothing: 0.15,
        }
    }
}

/// Every tuning constant of the procedural animation engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationTuning {
    pub locomotion: LocomotionTuning,
    pub attack: AttackTuning,
    pub aim: AimTuning,
    pub look: LookTuning,
}

impl AnimationTuning {
    pub fn validate(&self) -> Result<(), TuningError> {
        let locomotion = &self.locomotion;
        for (field, value) in [
            ("locomotion.min_rate", locomotion.min_rate),
            ("locomotion.max_rate", locomotion.max_rate),
            ("locomotion.airborne_rate", locomotion.airborne_rate),
            ("locomotion.stride_speed_cap", locomotion.stride_speed_cap),
            ("attack.duration", self.attack.duration),
            ("aim.reach_epsilon", self.aim.reach_epsilon),
            ("look.head_yaw_limit", self.look.head_yaw_limit),
            ("look.head_pitch_limit", self.look.head_pitch_limit),
        ] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        if locomotion.min_rate > locomotion.max_rate {
            return Err(TuningError::InvertedRateRange {
                min: locomotion.min_rate,
                max: locomotion.max_rate,
            });
        }

        for (field, value) in [
            ("aim.default_strength", self.aim.default_strength),
            ("aim.blend_smoothing", self.aim.blend_smoothing),
            ("look.torso_smoothing", self.look.torso_smoothing),
            ("locomotion.idle_amplitude", locomotion.idle_amplitude),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::OutOfUnitRange { field, value });
            }
        }

        Ok(())
    }
}
