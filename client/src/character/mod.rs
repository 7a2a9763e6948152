pub mod animation;
pub mod controller;
pub mod factory;
pub mod plugin;
pub mod types;

pub use animation::{
    TriggerAttack, advance_actor_animation, apply_attack_triggers, write_joint_rotations,
};
pub use controller::{ActorAnimationInput, ActorAnimator};
pub use factory::ActorFactory;
pub use plugin::{ActorAnimationPipeline, ActorAnimationPlugin};
pub use types::{ActorKind, ActorRoot, RigJoint};
