//! Roll correction for shortest-arc bone rotations.
//!
//! A shortest-arc rotation fixes where a bone points but leaves its roll
//! around that direction undefined. The correction pins the roll by turning
//! the bone's side axis onto the bend plane's right vector.

use super::math::signed_angle_around;
use bevy::math::{Quat, Vec3};

/// Side axis of a bone in its own space: the preferred side axis with the
/// bone-axis component removed.
pub fn side_axis_for(bone_axis: Vec3, preferred_side: Vec3) -> Vec3 {
    (preferred_side - bone_axis * preferred_side.dot(bone_axis))
        .try_normalize()
        .unwrap_or_else(|| bone_axis.any_orthonormal_vector())
}

/// Signed roll (radians) still separating the bone's side axis from
/// `desired_side` under `rotation`.
pub fn twist_angle(rotation: Quat, bone_axis: Vec3, side_axis: Vec3, desired_side: Vec3) -> f32 {
    let forward = (rotation * bone_axis).normalize();
    let side = rotation * side_axis;
    signed_angle_around(side, desired_side, forward)
}

/// Applies the roll that aligns the bone's side axis with `desired_side`,
/// rotating about the bone's own world direction.
///
/// Reapplying to an already corrected rotation is a near no-op.
pub fn correct_twist(rotation: Quat, bone_axis: Vec3, side_axis: Vec3, desired_side: Vec3) -> Quat {
    let forward = (rotation * bone_axis).normalize();
    let angle = twist_angle(rotation, bone_axis, side_axis, desired_side);
    (Quat::from_axis_angle(forward, angle) * rotation).normalize()
}
