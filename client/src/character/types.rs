use bevy::prelude::*;
use common::Joint;

/// Marks the root entity of an animated actor.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorRoot;

/// Who drives an actor.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorKind {
    LocalPlayer,
    RemotePlayer,
    Mob,
}

impl ActorKind {
    pub fn name(&self) -> &'static str {
        match self {
            ActorKind::LocalPlayer => "LocalPlayer",
            ActorKind::RemotePlayer => "RemotePlayer",
            ActorKind::Mob => "Mob",
        }
    }
}

/// Joint entity of an actor's rig. Its `Transform` rotation is written by
/// the animation systems every frame.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RigJoint {
    pub joint: Joint,
    pub owner: Entity,
}
