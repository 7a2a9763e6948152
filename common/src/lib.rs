//! Shared rig definitions for animated actors.
//!
//! This crate defines the humanoid joint catalog and the rig archetypes that
//! players and mobs are built from. Everything here is plain data: the client
//! turns a [`RigDescriptor`] into a joint hierarchy and animates it, while the
//! descriptor itself is never mutated after construction.

pub mod archetype;
pub mod descriptor;
pub mod joint;

pub use archetype::{MobArchetype, PlayerArchetype, RigArchetype};
pub use descriptor::{JointDef, LimbDef, RigDescriptor};
pub use joint::Joint;
