//! Vector and quaternion helpers shared by the solver and the compositor.
//!
//! Everything here is a pure function over stack values; nothing keeps
//! scratch state between calls, so actors can be animated on any thread.

use bevy::math::{Quat, Vec3};

/// Squared length below which a direction is treated as degenerate.
pub const NEAR_ZERO_SQUARED: f32 = 1e-6;

/// Body-space forward. Actors face `-Z`, matching `Transform::forward`.
pub const FORWARD: Vec3 = Vec3::NEG_Z;

/// Normalizes `vector`, rejecting near-zero and non-finite input.
pub fn normalize_or_none(vector: Vec3) -> Option<Vec3> {
    let length_squared = vector.length_squared();
    if !(length_squared >= NEAR_ZERO_SQUARED) || !length_squared.is_finite() {
        return None;
    }
    Some(vector / length_squared.sqrt())
}

/// Component of `vector` orthogonal to the unit `axis`.
pub fn reject(vector: Vec3, axis: Vec3) -> Vec3 {
    vector - axis * vector.dot(axis)
}

/// Signed angle that rotates `from` onto `to` around the unit `axis`.
///
/// Both vectors are projected onto the plane orthogonal to `axis` first. Uses
/// `atan2` so the result stays accurate near zero.
pub fn signed_angle_around(from: Vec3, to: Vec3, axis: Vec3) -> f32 {
    let from = reject(from, axis);
    let to = reject(to, axis);
    let sine = from.cross(to).dot(axis);
    let cosine = from.dot(to);
    if sine == 0.0 && cosine == 0.0 {
        return 0.0;
    }
    sine.atan2(cosine)
}

/// Shortest-arc rotation taking direction `from` onto direction `to`.
pub fn shortest_arc(from: Vec3, to: Vec3) -> Quat {
    match (normalize_or_none(from), normalize_or_none(to)) {
        (Some(from), Some(to)) => Quat::from_rotation_arc(from, to),
        _ => Quat::IDENTITY,
    }
}

/// Yaw (around +Y, positive turns left) and pitch (positive looks up) of a
/// direction expressed in a frame whose forward is `-Z`.
pub fn yaw_pitch(direction: Vec3) -> (f32, f32) {
    let yaw = (-direction.x).atan2(-direction.z);
    let horizontal = (direction.x * direction.x + direction.z * direction.z).sqrt();
    let pitch = direction.y.atan2(horizontal);
    (yaw, pitch)
}

/// Inverse of [`yaw_pitch`]: unit direction for the given angles.
pub fn direction_from_yaw_pitch(yaw: f32, pitch: f32) -> Vec3 {
    Quat::from_rotation_y(yaw) * Quat::from_rotation_x(pitch) * FORWARD
}

/// One exponential smoothing step of `current` toward `target`.
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor.clamp(0.0, 1.0)
}

/// Moves `current` toward `target` by at most `max_step`.
pub fn step_toward(current: f32, target: f32, max_step: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= max_step {
        target
    } else {
        current + max_step.copysign(delta)
    }
}

/// Angle of the rotation `q` (radians, in `[0, π]`).
///
/// `atan2` keeps near-identity rotations exact where `acos(w)` would not.
pub fn rotation_angle(q: Quat) -> f32 {
    2.0 * q.xyz().length().atan2(q.w.abs())
}
