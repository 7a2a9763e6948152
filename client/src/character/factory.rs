use super::controller::{ActorAnimationInput, ActorAnimator};
use super::types::{ActorKind, ActorRoot, RigJoint};
use crate::animation::{AnimatedActor, RigError};
use crate::settings::AnimationSettings;
use bevy::prelude::*;
use common::{Joint, RigArchetype};
use rand::Rng;
use std::f32::consts::TAU;

pub struct ActorFactory;

impl ActorFactory {
    /// Spawns an actor root with one child entity per rig joint, nested the
    /// way the archetype's descriptor nests them. Meshes are attached by the
    /// scene side; this only builds the animatable hierarchy.
    pub fn spawn(
        commands: &mut Commands,
        kind: ActorKind,
        archetype: RigArchetype,
        transform: Transform,
        start_phase: f32,
    ) -> Result<Entity, RigError> {
        let actor = AnimatedActor::from_archetype(archetype, start_phase).inspect_err(|error| {
            warn!("Refusing to spawn {} actor: {}", archetype, error);
        })?;

        let root = commands
            .spawn((
                transform,
                ActorRoot,
                kind,
                ActorAnimationInput::default(),
                Name::new(format!("{} ({})", archetype, kind.name())),
            ))
            .id();

        let mut joints = [None; Joint::COUNT];
        if let Some(rig) = actor.rig() {
            let mut slot_entities: Vec<Entity> = Vec::with_capacity(rig.layout().slots().len());
            for slot in rig.layout().slots() {
                let parent = slot.parent.map_or(root, |parent| slot_entities[parent]);
                let entity = commands
                    .spawn((
                        Transform::from_translation(slot.offset),
                        RigJoint {
                            joint: slot.joint,
                            owner: root,
                        },
                        Name::new(slot.joint.name()),
                        ChildOf(parent),
                    ))
                    .id();
                slot_entities.push(entity);
                joints[slot.joint.index()] = Some(entity);
            }
            debug!("{} rig: {} joint(s)", archetype, slot_entities.len());
        }

        commands
            .entity(root)
            .insert(ActorAnimator::with_joints(actor, joints));

        info!("Spawned {} actor as {}", archetype, kind.name());
        Ok(root)
    }

    /// Uniform locomotion phase in `[0, 2π)`.
    pub fn random_start_phase() -> f32 {
        rand::thread_rng().gen_range(0.0..TAU)
    }

    pub fn start_phase(settings: &AnimationSettings) -> f32 {
        if settings.randomize_start_phase {
            Self::random_start_phase()
        } else {
            0.0
        }
    }
}
