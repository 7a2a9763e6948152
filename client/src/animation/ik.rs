//! Analytic two-bone IK for the shoulder, elbow and hand chain.
//!
//! The solver works in world space with the law of cosines, then converts the
//! resulting bone directions to parent-relative joint rotations. Targets
//! outside the reachable shell are clamped onto it, so the arm stretches
//! toward them instead of failing.

use super::math::reject;
use super::rig::{ArmChain, JointHierarchy, REST_SIDE_AXIS};
use super::twist::{correct_twist, side_axis_for};
use bevy::math::{Quat, Vec3};
use common::Joint;
use std::f32::consts::PI;
use thiserror::Error;

/// `|cos|` above which a bend hint counts as parallel to the reach direction.
const PARALLEL_LIMIT: f32 = 0.95;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum IkError {
    #[error("target coincides with the shoulder")]
    TargetAtShoulder,

    #[error("bone lengths must be positive (upper={upper}, lower={lower})")]
    InvalidBoneLengths { upper: f32, lower: f32 },

    #[error("rig has no {0} joint")]
    MissingJoint(Joint),
}

/// World-space description of a two-bone chain at solve time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoBoneChain {
    pub shoulder: Vec3,
    /// World rotation of the shoulder's parent.
    pub parent_rotation: Quat,
    pub upper_length: f32,
    pub lower_length: f32,
    /// Rest direction of the upper bone in shoulder space.
    pub upper_axis: Vec3,
    /// Rest direction of the lower bone in elbow space.
    pub lower_axis: Vec3,
}

/// Output of one solve. Never cached across frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IkSolution {
    pub shoulder_local: Quat,
    pub elbow_local: Quat,
    pub shoulder_world: Quat,
    pub elbow_world: Quat,
    pub elbow_position: Vec3,
    pub hand_position: Vec3,
    /// Shoulder-to-hand distance after clamping.
    pub reach: f32,
    /// Elbow flexion (0 = straight arm).
    pub elbow_angle: f32,
    /// Normal of the bend plane; the elbow hinge axis.
    pub plane_right: Vec3,
}

/// Solves the chain so the hand lands on `target`, or as close as the bone
/// lengths allow.
///
/// `bend_hint` is the preferred bend-plane normal in world space.
pub fn solve_two_bone(
    chain: &TwoBoneChain,
    target: Vec3,
    bend_hint: Vec3,
    epsilon: f32,
) -> Result<IkSolution, IkError> {
    let upper = chain.upper_length;
    let lower = chain.lower_length;
    if !(upper > 0.0) || !(lower > 0.0) {
        return Err(IkError::InvalidBoneLengths { upper, lower });
    }

    let to_target = target - chain.shoulder;
    let distance = to_target.length();
    if !(distance >= epsilon) || !distance.is_finite() {
        return Err(IkError::TargetAtShoulder);
    }
    let direction = to_target / distance;

    let min_reach = (upper - lower).abs() + epsilon;
    let max_reach = (upper + lower - epsilon).max(min_reach);
    let reach = distance.clamp(min_reach, max_reach);

    let plane_right = bend_axis(direction, bend_hint, chain.parent_rotation);
    let plane_up = direction.cross(plane_right);

    let cos_shoulder = ((upper * upper + reach * reach - lower * lower) / (2.0 * upper * reach))
        .clamp(-1.0, 1.0);
    let shoulder_angle = cos_shoulder.acos();
    let cos_elbow =
        ((upper * upper + lower * lower - reach * reach) / (2.0 * upper * lower)).clamp(-1.0, 1.0);
    let elbow_angle = PI - cos_elbow.acos();

    let elbow_position = chain.shoulder
        + direction * (shoulder_angle.cos() * upper)
        + plane_up * (shoulder_angle.sin() * upper);
    let hand_position = chain.shoulder + direction * reach;

    let upper_direction = (elbow_position - chain.shoulder) / upper;
    let lower_direction = (hand_position - elbow_position)
        .try_normalize()
        .unwrap_or(direction);

    let upper_side = side_axis_for(chain.upper_axis, REST_SIDE_AXIS);
    let rest_upper = chain.parent_rotation * chain.upper_axis;
    let shoulder_world = correct_twist(
        Quat::from_rotation_arc(rest_upper.normalize(), upper_direction.normalize())
            * chain.parent_rotation,
        chain.upper_axis,
        upper_side,
        plane_right,
    );

    let lower_side = side_axis_for(chain.lower_axis, REST_SIDE_AXIS);
    let rest_lower = shoulder_world * chain.lower_axis;
    let elbow_world = correct_twist(
        Quat::from_rotation_arc(rest_lower.normalize(), lower_direction) * shoulder_world,
        chain.lower_axis,
        lower_side,
        plane_right,
    );

    Ok(IkSolution {
        shoulder_local: (chain.parent_rotation.inverse() * shoulder_world).normalize(),
        elbow_local: (shoulder_world.inverse() * elbow_world).normalize(),
        shoulder_world,
        elbow_world,
        elbow_position,
        hand_position,
        reach,
        elbow_angle,
        plane_right,
    })
}

/// Solves the rig's IK arm against `target`, reading joint world transforms
/// from `rig`. Fails without touching the rig when a chain joint is missing.
pub fn solve_arm<H: JointHierarchy + ?Sized>(
    rig: &H,
    arm: &ArmChain,
    target: Vec3,
    bend_hint: Vec3,
    epsilon: f32,
) -> Result<IkSolution, IkError> {
    for joint in [arm.shoulder, arm.elbow, arm.hand] {
        if !rig.contains(joint) {
            return Err(IkError::MissingJoint(joint));
        }
    }

    let shoulder = rig
        .world_transform(arm.shoulder)
        .ok_or(IkError::MissingJoint(arm.shoulder))?;
    let parent_rotation = rig
        .parent_world_rotation(arm.shoulder)
        .unwrap_or(rig.root().rotation);

    let chain = TwoBoneChain {
        shoulder: shoulder.position,
        parent_rotation,
        upper_length: arm.upper_length,
        lower_length: arm.lower_length,
        upper_axis: arm.upper_axis,
        lower_axis: arm.lower_axis,
    };
    solve_two_bone(&chain, target, bend_hint, epsilon)
}

/// Picks the bend-plane normal: the hint, else the parent's side axis, else
/// world up, whichever is first to be usefully non-parallel to `direction`.
fn bend_axis(direction: Vec3, hint: Vec3, parent_rotation: Quat) -> Vec3 {
    [hint, parent_rotation * Vec3::X, Vec3::Y]
        .into_iter()
        .find_map(|candidate| perpendicular_part(direction, candidate))
        .unwrap_or_else(|| direction.any_orthonormal_vector())
}

fn perpendicular_part(direction: Vec3, candidate: Vec3) -> Option<Vec3> {
    let candidate = candidate.try_normalize()?;
    if candidate.dot(direction).abs() > PARALLEL_LIMIT {
        return None;
    }
    reject(candidate, direction).try_normalize()
}
