//! Procedural humanoid animation: locomotion cycle, attack swing, aim
//! resolution, two-bone arm IK with twist correction, and the compositor
//! that merges them into joint-local rotations.

pub mod actor;
pub mod aim;
pub mod attack;
pub mod compositor;
pub mod ik;
pub mod locomotion;
pub mod math;
pub mod rig;
pub mod state;
pub mod tuning;
pub mod twist;

pub use actor::AnimatedActor;
pub use aim::{AimError, AimFrame, AimRequest, AimSource, ResolvedAim, resolve_aim};
pub use attack::SwingPose;
pub use compositor::{FrameContext, PoseReport, compose};
pub use ik::{IkError, IkSolution, TwoBoneChain, solve_arm, solve_two_bone};
pub use locomotion::LocomotionPose;
pub use rig::{ArmChain, JointHierarchy, JointWorld, RigError, RigLayout, RigPose};
pub use state::AnimationState;
pub use tuning::{
    AimTuning, AnimationTuning, AttackTuning, FallingPose, LocomotionTuning, LookTuning,
    TuningError,
};
pub use twist::correct_twist;
