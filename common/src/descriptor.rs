use crate::joint::Joint;

/// One joint of a rig: its parent link and rest offset in the parent's space.
///
/// A `None` parent attaches the joint to the actor root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointDef {
    pub joint: Joint,
    pub parent: Option<Joint>,
    pub offset: [f32; 3],
}

impl JointDef {
    pub const fn new(joint: Joint, parent: Option<Joint>, offset: [f32; 3]) -> Self {
        Self {
            joint,
            parent,
            offset,
        }
    }
}

/// The IK-enabled arm of a rig with its two measured bone lengths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimbDef {
    pub shoulder: Joint,
    pub elbow: Joint,
    pub hand: Joint,
    /// Shoulder to elbow.
    pub upper_length: f32,
    /// Elbow to hand.
    pub lower_length: f32,
}

/// Immutable description of a rig archetype.
///
/// Joints are ordered so that every parent precedes its children. Built once
/// when an actor's representation is created and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RigDescriptor {
    name: &'static str,
    joints: Vec<JointDef>,
    limb: Option<LimbDef>,
}

impl RigDescriptor {
    pub fn new(name: &'static str, joints: Vec<JointDef>, limb: Option<LimbDef>) -> Self {
        Self {
            name,
            joints,
            limb,
        }
    }

    /// Builds a descriptor whose IK limb lengths are measured from the rest
    /// offsets of the elbow and hand joints.
    ///
    /// Falls back to no IK limb when either joint is absent.
    pub fn measured(
        name: &'static str,
        joints: Vec<JointDef>,
        shoulder: Joint,
        elbow: Joint,
        hand: Joint,
    ) -> Self {
        let upper = joints
            .iter()
            .find(|def| def.joint == elbow)
            .map(|def| offset_length(def.offset));
        let lower = joints
            .iter()
            .find(|def| def.joint == hand)
            .map(|def| offset_length(def.offset));

        let limb = match (upper, lower) {
            (Some(upper_length), Some(lower_length)) => Some(LimbDef {
                shoulder,
                elbow,
                hand,
                upper_length,
                lower_length,
            }),
            _ => None,
        };

        Self::new(name, joints, limb)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn joints(&self) -> &[JointDef] {
        &self.joints
    }

    pub fn limb(&self) -> Option<&LimbDef> {
        self.limb.as_ref()
    }

    pub fn joint(&self, joint: Joint) -> Option<&JointDef> {
        self.joints.iter().find(|def| def.joint == joint)
    }

    pub fn contains(&self, joint: Joint) -> bool {
        self.joint(joint).is_some()
    }
}

fn offset_length(offset: [f32; 3]) -> f32 {
    (offset[0] * offset[0] + offset[1] * offset[1] + offset[2] * offset[2]).sqrt()
}
