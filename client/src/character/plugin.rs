use super::animation::{
    TriggerAttack, advance_actor_animation, apply_attack_triggers, write_joint_rotations,
};
use crate::settings::SettingsResource;
use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ActorAnimationPipeline {
    Triggers,
    Animate,
    WriteJoints,
}

/// Runs the procedural animation of every spawned actor in `Update`.
///
/// Uses the [`SettingsResource`] already in the app (see
/// [`SettingsPlugin`](crate::settings::SettingsPlugin)) or default tuning.
pub struct ActorAnimationPlugin;

impl Plugin for ActorAnimationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SettingsResource>()
            .add_message::<TriggerAttack>()
            .configure_sets(
                Update,
                (
                    ActorAnimationPipeline::Triggers,
                    ActorAnimationPipeline::Animate,
                    ActorAnimationPipeline::WriteJoints,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    apply_attack_triggers.in_set(ActorAnimationPipeline::Triggers),
                    advance_actor_animation.in_set(ActorAnimationPipeline::Animate),
                    write_joint_rotations.in_set(ActorAnimationPipeline::WriteJoints),
                ),
            );
    }
}
