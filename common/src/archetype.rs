use crate::descriptor::{JointDef, LimbDef, RigDescriptor};
use crate::joint::Joint;

/// Construction parameters of a player rig.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerArchetype {
    /// Uniform scale applied to every rest offset.
    pub body_scale: f32,
    /// Whether the right hand carries a weapon pivot.
    pub armed: bool,
}

impl Default for PlayerArchetype {
    fn default() -> Self {
        Self {
            body_scale: 1.0,
            armed: true,
        }
    }
}

/// Mob rig variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MobArchetype {
    /// Long unarmed arms, slow reach
    Zombie,
    /// Thin frame carrying a weapon
    Skeleton,
    /// Heavy frame with fused arms (no elbow joints)
    Golem,
}

impl MobArchetype {
    pub const ALL: &'static [MobArchetype] = &[
        MobArchetype::Zombie,
        MobArchetype::Skeleton,
        MobArchetype::Golem,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MobArchetype::Zombie => "zombie",
            MobArchetype::Skeleton => "skeleton",
            MobArchetype::Golem => "golem",
        }
    }
}

/// Tagged rig archetype an actor's visual representation is built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RigArchetype {
    Player(PlayerArchetype),
    Mob(MobArchetype),
}

impl Default for RigArchetype {
    fn default() -> Self {
        RigArchetype::Player(PlayerArchetype::default())
    }
}

/// Body measurements (metres) a humanoid rig is laid out from.
#[derive(Debug, Clone, Copy)]
struct Proportions {
    hip_height: f32,
    torso_height: f32,
    neck_height: f32,
    shoulder_height: f32,
    shoulder_half_width: f32,
    upper_arm: f32,
    forearm: f32,
    grip: f32,
    hip_half_width: f32,
    thigh: f32,
    shin: f32,
}

impl Proportions {
    const PLAYER: Proportions = Proportions {
        hip_height: 0.92,
        torso_height: 0.12,
        neck_height: 0.48,
        shoulder_height: 0.40,
        shoulder_half_width: 0.22,
        upper_arm: 0.28,
        forearm: 0.26,
        grip: 0.07,
        hip_half_width: 0.10,
        thigh: 0.44,
        shin: 0.42,
    };

    const ZOMBIE: Proportions = Proportions {
        hip_height: 0.90,
        torso_height: 0.12,
        neck_height: 0.46,
        shoulder_height: 0.38,
        shoulder_half_width: 0.23,
        upper_arm: 0.32,
        forearm: 0.30,
        grip: 0.07,
        hip_half_width: 0.10,
        thigh: 0.43,
        shin: 0.41,
    };

    const SKELETON: Proportions = Proportions {
        hip_height: 0.95,
        torso_height: 0.13,
        neck_height: 0.47,
        shoulder_height: 0.40,
        shoulder_half_width: 0.19,
        upper_arm: 0.29,
        forearm: 0.27,
        grip: 0.06,
        hip_half_width: 0.09,
        thigh: 0.46,
        shin: 0.44,
    };

    const GOLEM: Proportions = Proportions {
        hip_height: 1.05,
        torso_height: 0.18,
        neck_height: 0.62,
        shoulder_height: 0.55,
        shoulder_half_width: 0.38,
        upper_arm: 0.40,
        forearm: 0.38,
        grip: 0.0,
        hip_half_width: 0.16,
        thigh: 0.50,
        shin: 0.48,
    };

    fn scaled(self, scale: f32) -> Proportions {
        Proportions {
            hip_height: self.hip_height * scale,
            torso_height: self.torso_height * scale,
            neck_height: self.neck_height * scale,
            shoulder_height: self.shoulder_height * scale,
            shoulder_half_width: self.shoulder_half_width * scale,
            upper_arm: self.upper_arm * scale,
            forearm: self.forearm * scale,
            grip: self.grip * scale,
            hip_half_width: self.hip_half_width * scale,
            thigh: self.thigh * scale,
            shin: self.shin * scale,
        }
    }
}

impl RigArchetype {
    pub fn name(&self) -> &'static str {
        match self {
            RigArchetype::Player(_) => "player",
            RigArchetype::Mob(mob) => mob.name(),
        }
    }

    /// IK influence used when the per-frame context does not supply one.
    pub fn default_aim_strength(&self) -> f32 {
        match self {
            RigArchetype::Player(_) => 0.85,
            RigArchetype::Mob(MobArchetype::Zombie) => 0.5,
            RigArchetype::Mob(MobArchetype::Skeleton) => 0.65,
            RigArchetype::Mob(MobArchetype::Golem) => 0.5,
        }
    }

    pub fn is_armed(&self) -> bool {
        match self {
            RigArchetype::Player(player) => player.armed,
            RigArchetype::Mob(MobArchetype::Skeleton) => true,
            RigArchetype::Mob(MobArchetype::Zombie | MobArchetype::Golem) => false,
        }
    }

    /// Builds the immutable rig descriptor for this archetype.
    pub fn descriptor(&self) -> RigDescriptor {
        match self {
            RigArchetype::Player(player) => {
                let proportions = Proportions::PLAYER.scaled(player.body_scale);
                measured_humanoid(self.name(), proportions, player.armed)
            }
            RigArchetype::Mob(MobArchetype::Zombie) => {
                measured_humanoid(self.name(), Proportions::ZOMBIE, false)
            }
            RigArchetype::Mob(MobArchetype::Skeleton) => {
                measured_humanoid(self.name(), Proportions::SKELETON, true)
            }
            RigArchetype::Mob(MobArchetype::Golem) => golem(self.name(), Proportions::GOLEM),
        }
    }
}

impl std::fmt::Display for RigArchetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn measured_humanoid(name: &'static str, p: Proportions, armed: bool) -> RigDescriptor {
    let mut joints = body_and_legs(p);

    for (shoulder, elbow, hand, side) in [
        (Joint::LeftShoulder, Joint::LeftElbow, Joint::LeftHand, -1.0),
        (Joint::RightShoulder, Joint::RightElbow, Joint::RightHand, 1.0),
    ] {
        joints.push(JointDef::new(
            shoulder,
            Some(Joint::Torso),
            [side * p.shoulder_half_width, p.shoulder_height, 0.0],
        ));
        joints.push(JointDef::new(elbow, Some(shoulder), [0.0, -p.upper_arm, 0.0]));
        joints.push(JointDef::new(hand, Some(elbow), [0.0, -p.forearm, 0.0]));
    }

    if armed {
        joints.push(JointDef::new(
            Joint::WeaponPivot,
            Some(Joint::RightHand),
            [0.0, -p.grip, 0.0],
        ));
    }

    RigDescriptor::measured(
        name,
        joints,
        Joint::RightShoulder,
        Joint::RightElbow,
        Joint::RightHand,
    )
}

/// Golem arms have no elbow: the hand hangs straight off the shoulder. The
/// limb is still declared so the solver reports the missing elbow instead of
/// silently skipping the arm.
fn golem(name: &'static str, p: Proportions) -> RigDescriptor {
    let mut joints = body_and_legs(p);

    for (shoulder, hand, side) in [
        (Joint::LeftShoulder, Joint::LeftHand, -1.0),
        (Joint::RightShoulder, Joint::RightHand, 1.0),
    ] {
        joints.push(JointDef::new(
            shoulder,
            Some(Joint::Torso),
            [side * p.shoulder_half_width, p.shoulder_height, 0.0],
        ));
        joints.push(JointDef::new(
            hand,
            Some(shoulder),
            [0.0, -(p.upper_arm + p.forearm), 0.0],
        ));
    }

    let limb = LimbDef {
        shoulder: Joint::RightShoulder,
        elbow: Joint::RightElbow,
        hand: Joint::RightHand,
        upper_length: p.upper_arm,
        lower_length: p.forearm,
    };

    RigDescriptor::new(name, joints, Some(limb))
}

fn body_and_legs(p: Proportions) -> Vec<JointDef> {
    let mut joints = vec![
        JointDef::new(Joint::Hips, None, [0.0, p.hip_height, 0.0]),
        JointDef::new(Joint::Torso, Some(Joint::Hips), [0.0, p.torso_height, 0.0]),
        JointDef::new(Joint::Head, Some(Joint::Torso), [0.0, p.neck_height, 0.0]),
    ];

    for (hip, knee, foot, side) in [
        (Joint::LeftHip, Joint::LeftKnee, Joint::LeftFoot, -1.0),
        (Joint::RightHip, Joint::RightKnee, Joint::RightFoot, 1.0),
    ] {
        joints.push(JointDef::new(
            hip,
            Some(Joint::Hips),
            [side * p.hip_half_width, -0.04, 0.0],
        ));
        joints.push(JointDef::new(knee, Some(hip), [0.0, -p.thigh, 0.0]));
        joints.push(JointDef::new(foot, Some(knee), [0.0, -p.shin, 0.0]));
    }

    joints
}
