use crate::animation::{AimRequest, AnimatedActor, FrameContext};
use bevy::prelude::*;
use common::Joint;

/// Animation driver of one actor: the engine-side actor plus the entities of
/// its rig joints.
#[derive(Component, Debug, Clone)]
pub struct ActorAnimator {
    pub actor: AnimatedActor,
    joints: [Option<Entity>; Joint::COUNT],
}

impl ActorAnimator {
    pub fn with_joints(actor: AnimatedActor, joints: [Option<Entity>; Joint::COUNT]) -> Self {
        Self { actor, joints }
    }

    pub fn joint_entity(&self, joint: Joint) -> Option<Entity> {
        self.joints[joint.index()]
    }
}

/// Per-frame signals for an actor, written by whoever moves it (input for
/// the local player, network snapshots for remote players and mobs).
///
/// Aim fields are optional and loosely populated; they are folded into one
/// [`AimRequest`] each frame.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ActorAnimationInput {
    pub speed: f32,
    pub grounded: bool,
    pub aim_target: Option<Vec3>,
    pub aim_origin: Option<Vec3>,
    pub aim_direction: Option<Vec3>,
    pub aim_heading: Option<f32>,
    pub aim_pitch: Option<f32>,
    pub aim_distance: Option<f32>,
    pub aim_strength: Option<f32>,
}

impl Default for ActorAnimationInput {
    fn default() -> Self {
        Self {
            speed: 0.0,
            grounded: true,
            aim_target: None,
            aim_origin: None,
            aim_direction: None,
            aim_heading: None,
            aim_pitch: None,
            aim_distance: None,
            aim_strength: None,
        }
    }
}

impl ActorAnimationInput {
    pub fn aim_request(&self) -> AimRequest {
        AimRequest::from_optional_fields(
            self.aim_target,
            self.aim_origin,
            self.aim_direction,
            self.aim_heading,
            self.aim_pitch,
        )
    }

    pub fn clear_aim(&mut self) {
        self.aim_target = None;
        self.aim_origin = None;
        self.aim_direction = None;
        self.aim_heading = None;
        self.aim_pitch = None;
        self.aim_distance = None;
    }

    pub fn frame_context(&self, delta_time: f32) -> FrameContext {
        FrameContext {
            delta_time,
            speed: self.speed,
            grounded: self.grounded,
            aim: self.aim_request(),
            aim_distance: self.aim_distance,
            aim_strength: self.aim_strength,
        }
    }
}
