use bevy::math::{Quat, Vec3};
use common::{Joint, RigDescriptor};
use std::sync::Arc;
use thiserror::Error;

/// Rest direction of a bone that has no measurable child offset.
pub const REST_BONE_AXIS: Vec3 = Vec3::NEG_Y;
/// Reference "sideways" axis of a bone in its own space; the elbow hinge.
pub const REST_SIDE_AXIS: Vec3 = Vec3::X;

/// Errors produced while validating a rig descriptor.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RigError {
    #[error("rig '{rig}' declares no joints")]
    Empty { rig: &'static str },

    #[error("rig '{rig}' declares joint {joint} more than once")]
    DuplicateJoint { rig: &'static str, joint: Joint },

    #[error("rig '{rig}': joint {joint} is declared before its parent {parent}")]
    ParentOutOfOrder {
        rig: &'static str,
        joint: Joint,
        parent: Joint,
    },

    #[error("rig '{rig}': limb bone {bone} has invalid length {length}")]
    DegenerateBone {
        rig: &'static str,
        bone: &'static str,
        length: f32,
    },
}

/// World-space position and orientation of a joint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointWorld {
    pub position: Vec3,
    pub rotation: Quat,
}

impl JointWorld {
    pub const IDENTITY: JointWorld = JointWorld {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// World transform of a child with the given rest offset and local rotation.
    pub fn child(&self, offset: Vec3, local_rotation: Quat) -> JointWorld {
        JointWorld {
            position: self.position + self.rotation * offset,
            rotation: self.rotation * local_rotation,
        }
    }
}

impl Default for JointWorld {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Joint hierarchy the animation engine reads from and writes into.
///
/// Implemented by [`RigPose`]; any scene representation exposing per-joint
/// local rotations and world transforms can stand in for it.
pub trait JointHierarchy {
    fn contains(&self, joint: Joint) -> bool;

    fn local_rotation(&self, joint: Joint) -> Option<Quat>;

    /// Returns `false` when the rig has no such joint.
    fn set_local_rotation(&mut self, joint: Joint, rotation: Quat) -> bool;

    fn world_transform(&self, joint: Joint) -> Option<JointWorld>;

    /// World rotation of the joint's parent (the actor root for top-level joints).
    fn parent_world_rotation(&self, joint: Joint) -> Option<Quat>;

    /// World transform of the actor body.
    fn root(&self) -> JointWorld;
}

/// Validated joint slot of a [`RigLayout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointSlot {
    pub joint: Joint,
    pub parent: Option<usize>,
    pub offset: Vec3,
}

/// The IK arm of a rig, resolved against the layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmChain {
    pub shoulder: Joint,
    pub elbow: Joint,
    pub hand: Joint,
    pub upper_length: f32,
    pub lower_length: f32,
    /// Rest direction of the upper bone in the shoulder's local space.
    pub upper_axis: Vec3,
    /// Rest direction of the lower bone in the elbow's local space.
    pub lower_axis: Vec3,
}

/// Runtime form of a [`RigDescriptor`]: joints in parent-first order with
/// dense lookup by [`Joint`].
#[derive(Debug, Clone, PartialEq)]
pub struct RigLayout {
    name: &'static str,
    slots: Vec<JointSlot>,
    by_joint: [Option<usize>; Joint::COUNT],
    arm: Option<ArmChain>,
}

impl RigLayout {
    pub fn build(descriptor: &RigDescriptor) -> Result<Self, RigError> {
        let rig = descriptor.name();
        if descriptor.joints().is_empty() {
            return Err(RigError::Empty { rig });
        }

        let mut slots = Vec::with_capacity(descriptor.joints().len());
        let mut by_joint = [None; Joint::COUNT];

        for def in descriptor.joints() {
            if by_joint[def.joint.index()].is_some() {
                return Err(RigError::DuplicateJoint {
                    rig,
                    joint: def.joint,
                });
            }

            let parent = match def.parent {
                Some(parent) => match by_joint[parent.index()] {
                    Some(slot) => Some(slot),
                    None => {
                        return Err(RigError::ParentOutOfOrder {
                            rig,
                            joint: def.joint,
                            parent,
                        });
                    }
                },
                None => None,
            };

            by_joint[def.joint.index()] = Some(slots.len());
            slots.push(JointSlot {
                joint: def.joint,
                parent,
                offset: Vec3::from_array(def.offset),
            });
        }

        let mut layout = Self {
            name: rig,
            slots,
            by_joint,
            arm: None,
        };

        if let Some(limb) = descriptor.limb() {
            for (bone, length) in [("upper", limb.upper_length), ("lower", limb.lower_length)] {
                if !(length > 0.0) || !length.is_finite() {
                    return Err(RigError::DegenerateBone { rig, bone, length });
                }
            }

            layout.arm = Some(ArmChain {
                shoulder: limb.shoulder,
                elbow: limb.elbow,
                hand: limb.hand,
                upper_length: limb.upper_length,
                lower_length: limb.lower_length,
                upper_axis: layout.rest_axis(limb.elbow),
                lower_axis: layout.rest_axis(limb.hand),
            });
        }

        Ok(layout)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn slots(&self) -> &[JointSlot] {
        &self.slots
    }

    pub fn arm(&self) -> Option<&ArmChain> {
        self.arm.as_ref()
    }

    pub fn slot_index(&self, joint: Joint) -> Option<usize> {
        self.by_joint[joint.index()]
    }

    pub fn contains(&self, joint: Joint) -> bool {
        self.slot_index(joint).is_some()
    }

    /// Direction from a joint's parent to the joint at rest, in parent space.
    fn rest_axis(&self, child: Joint) -> Vec3 {
        self.slot_index(child)
            .and_then(|slot| self.slots[slot].offset.try_normalize())
            .unwrap_or(REST_BONE_AXIS)
    }
}

/// In-memory joint hierarchy: a layout plus one local rotation per joint and
/// the actor root transform.
#[derive(Debug, Clone, PartialEq)]
pub struct RigPose {
    layout: Arc<RigLayout>,
    locals: Vec<Quat>,
    root: JointWorld,
}

impl RigPose {
    pub fn new(layout: Arc<RigLayout>) -> Self {
        let locals = vec![Quat::IDENTITY; layout.slots().len()];
        Self {
            layout,
            locals,
            root: JointWorld::IDENTITY,
        }
    }

    pub fn layout(&self) -> &Arc<RigLayout> {
        &self.layout
    }

    pub fn set_root(&mut self, root: JointWorld) {
        self.root = root;
    }

    /// Local rotations paired with their joints, in layout order.
    pub fn local_rotations(&self) -> impl Iterator<Item = (Joint, Quat)> + '_ {
        self.layout
            .slots()
            .iter()
            .zip(self.locals.iter())
            .map(|(slot, rotation)| (slot.joint, *rotation))
    }

    fn world_of(&self, slot: usize) -> JointWorld {
        let joint = &self.layout.slots()[slot];
        let parent = match joint.parent {
            Some(parent) => self.world_of(parent),
            None => self.root,
        };
        parent.child(joint.offset, self.locals[slot])
    }
}

impl JointHierarchy for RigPose {
    fn contains(&self, joint: Joint) -> bool {
        self.layout.contains(joint)
    }

    fn local_rotation(&self, joint: Joint) -> Option<Quat> {
        self.layout.slot_index(joint).map(|slot| self.locals[slot])
    }

    fn set_local_rotation(&mut self, joint: Joint, rotation: Quat) -> bool {
        match self.layout.slot_index(joint) {
            Some(slot) => {
                self.locals[slot] = rotation;
                true
            }
            None => false,
        }
    }

    fn world_transform(&self, joint: Joint) -> Option<JointWorld> {
        self.layout.slot_index(joint).map(|slot| self.world_of(slot))
    }

    fn parent_world_rotation(&self, joint: Joint) -> Option<Quat> {
        let slot = self.layout.slot_index(joint)?;
        Some(match self.layout.slots()[slot].parent {
            Some(parent) => self.world_of(parent).rotation,
            None => self.root.rotation,
        })
    }

    fn root(&self) -> JointWorld {
        self.root
    }
}
