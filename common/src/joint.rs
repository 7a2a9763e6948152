/// Every joint a humanoid rig may carry.
///
/// Rig variants are free to omit joints (a golem has no elbows, a zombie
/// carries no weapon), so consumers must treat every joint as optional.
/// Discriminants are dense and double as array indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Joint {
    /// Pelvis, direct child of the actor root
    Hips = 0,
    /// Upper body, child of the hips
    Torso = 1,
    Head = 2,

    // ==================== Arms ====================
    LeftShoulder = 3,
    LeftElbow = 4,
    LeftHand = 5,
    RightShoulder = 6,
    RightElbow = 7,
    RightHand = 8,
    /// Pivot of the held weapon, child of the right hand
    WeaponPivot = 9,

    // ==================== Legs ====================
    LeftHip = 10,
    LeftKnee = 11,
    LeftFoot = 12,
    RightHip = 13,
    RightKnee = 14,
    RightFoot = 15,
}

impl Joint {
    pub const COUNT: usize = 16;

    pub const ALL: [Joint; Joint::COUNT] = [
        Joint::Hips,
        Joint::Torso,
        Joint::Head,
        Joint::LeftShoulder,
        Joint::LeftElbow,
        Joint::LeftHand,
        Joint::RightShoulder,
        Joint::RightElbow,
        Joint::RightHand,
        Joint::WeaponPivot,
        Joint::LeftHip,
        Joint::LeftKnee,
        Joint::LeftFoot,
        Joint::RightHip,
        Joint::RightKnee,
        Joint::RightFoot,
    ];

    /// Dense index usable for per-joint lookup tables.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            Joint::Hips => "hips",
            Joint::Torso => "torso",
            Joint::Head => "head",
            Joint::LeftShoulder => "shoulder_l",
            Joint::LeftElbow => "elbow_l",
            Joint::LeftHand => "hand_l",
            Joint::RightShoulder => "shoulder_r",
            Joint::RightElbow => "elbow_r",
            Joint::RightHand => "hand_r",
            Joint::WeaponPivot => "weapon_pivot",
            Joint::LeftHip => "hip_l",
            Joint::LeftKnee => "knee_l",
            Joint::LeftFoot => "foot_l",
            Joint::RightHip => "hip_r",
            Joint::RightKnee => "knee_r",
            Joint::RightFoot => "foot_r",
        }
    }

    pub fn from_name(name: &str) -> Option<Joint> {
        Joint::ALL.iter().copied().find(|joint| joint.name() == name)
    }

    pub fn from_index(index: usize) -> Option<Joint> {
        Joint::ALL.get(index).copied()
    }

    /// Joints driven by the locomotion cycle regardless of aim or attack.
    pub fn is_leg(&self) -> bool {
        matches!(
            self,
            Joint::LeftHip
                | Joint::LeftKnee
                | Joint::LeftFoot
                | Joint::RightHip
                | Joint::RightKnee
                | Joint::RightFoot
        )
    }
}

impl std::fmt::Display for Joint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
