use super::controller::{ActorAnimationInput, ActorAnimator};
use super::types::{ActorRoot, RigJoint};
use crate::animation::JointWorld;
use crate::settings::SettingsResource;
use bevy::prelude::*;

/// Starts (or restarts) the attack swing of an actor.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerAttack(pub Entity);

pub fn apply_attack_triggers(
    mut triggers: MessageReader<TriggerAttack>,
    settings: Res<SettingsResource>,
    mut actors: Query<&mut ActorAnimator>,
) {
    for TriggerAttack(entity) in triggers.read() {
        match actors.get_mut(*entity) {
            Ok(mut animator) => animator.actor.trigger_attack(&settings.tuning().attack),
            Err(_) => debug!("Ignoring attack trigger for {entity:?}: not an animated actor"),
        }
    }
}

/// Advances every actor by one frame. Actors are independent, so they are
/// processed in parallel.
pub fn advance_actor_animation(
    time: Res<Time>,
    settings: Res<SettingsResource>,
    mut actors: Query<(&Transform, &ActorAnimationInput, &mut ActorAnimator), With<ActorRoot>>,
) {
    let delta_time = time.delta_secs();
    if delta_time <= 0.0 {
        return;
    }
    let tuning = settings.tuning();

    actors
        .par_iter_mut()
        .for_each(|(transform, input, mut animator)| {
            animator
                .actor
                .set_root(JointWorld::new(transform.translation, transform.rotation));
            animator
                .actor
                .update_animation(&input.frame_context(delta_time), tuning);
        });
}

/// Copies joint-local rotations from each updated actor onto its joint
/// entities.
pub fn write_joint_rotations(
    actors: Query<&ActorAnimator, Changed<ActorAnimator>>,
    mut joints: Query<&mut Transform, With<RigJoint>>,
) {
    for animator in &actors {
        let Some(rig) = animator.actor.rig() else {
            continue;
        };
        for (joint, rotation) in rig.local_rotations() {
            let Some(entity) = animator.joint_entity(joint) else {
                continue;
            };
            if let Ok(mut transform) = joints.get_mut(entity) {
                transform.rotation = rotation;
            }
        }
    }
}
