#![allow(clippy::too_many_arguments, clippy::type_complexity)]

pub mod animation;
pub mod character;
pub mod settings;

pub use animation::{AnimatedActor, AnimationTuning, FrameContext};
pub use character::{ActorAnimationPlugin, ActorFactory, TriggerAttack};
pub use settings::{AnimationSettings, SettingsPlugin};
