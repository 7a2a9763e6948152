use super::math::FORWARD;
use bevy::math::Vec3;
use std::f32::consts::TAU;

/// Per-actor animation state. Owned by the actor and mutated only by the
/// animation engine.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    /// Locomotion phase in radians, kept in `[0, 2π)`.
    pub(crate) move_phase: f32,
    /// Seconds left in the current attack swing; never negative.
    pub(crate) attack_timer: f32,
    /// Last resolved aim direction (unit, world space).
    pub(crate) aim_direction_world: Vec3,
    /// Smoothed IK influence in `[0, 1]`.
    pub(crate) aim_blend: f32,
    /// Smoothed torso counter-rotation (radians).
    pub(crate) torso_yaw: f32,
}

impl AnimationState {
    pub fn new(initial_phase: f32) -> Self {
        Self {
            move_phase: initial_phase.rem_euclid(TAU),
            attack_timer: 0.0,
            aim_direction_world: FORWARD,
            aim_blend: 0.0,
            torso_yaw: 0.0,
        }
    }

    pub fn move_phase(&self) -> f32 {
        self.move_phase
    }

    pub fn attack_timer(&self) -> f32 {
        self.attack_timer
    }

    pub fn aim_direction_world(&self) -> Vec3 {
        self.aim_direction_world
    }

    pub fn aim_blend(&self) -> f32 {
        self.aim_blend
    }

    pub fn torso_yaw(&self) -> f32 {
        self.torso_yaw
    }

    pub fn is_swinging(&self) -> bool {
        self.attack_timer > 0.0
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new(0.0)
    }
}
