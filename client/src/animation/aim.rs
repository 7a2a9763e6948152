//! Aim resolution: turns caller intent into one canonical world-space aim.

use super::math::{direction_from_yaw_pitch, normalize_or_none};
use super::state::AnimationState;
use bevy::math::Vec3;
use thiserror::Error;

/// Caller-supplied aim intent for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum AimRequest {
    /// No aim; the actor looks along its own facing.
    #[default]
    None,
    /// Aim at a world-space point.
    Target(Vec3),
    /// Aim along a world-space direction, optionally from an explicit origin.
    Direction {
        origin: Option<Vec3>,
        direction: Vec3,
    },
    /// Aim along world heading/pitch angles (radians), optionally from an
    /// explicit origin.
    Angles {
        origin: Option<Vec3>,
        heading: f32,
        pitch: f32,
    },
}

impl AimRequest {
    /// Builds a request from loosely populated optional fields, as they arrive
    /// from network snapshots or input state.
    ///
    /// Priority: target point, then direction, then heading (pitch defaults to
    /// level), then nothing.
    pub fn from_optional_fields(
        target: Option<Vec3>,
        origin: Option<Vec3>,
        direction: Option<Vec3>,
        heading: Option<f32>,
        pitch: Option<f32>,
    ) -> Self {
        if let Some(target) = target {
            return AimRequest::Target(target);
        }
        if let Some(direction) = direction {
            return AimRequest::Direction { origin, direction };
        }
        if let Some(heading) = heading {
            return AimRequest::Angles {
                origin,
                heading,
                pitch: pitch.unwrap_or(0.0),
            };
        }
        AimRequest::None
    }

    /// Whether the caller actually asked for aiming (drives the IK blend).
    pub fn is_explicit(&self) -> bool {
        !matches!(self, AimRequest::None)
    }
}

/// Which input produced a [`ResolvedAim`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AimSource {
    Target,
    Direction,
    Angles,
    Facing,
}

/// Canonical aim: origin, unit direction and target point, all world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedAim {
    pub origin: Vec3,
    pub direction: Vec3,
    pub target: Vec3,
    pub source: AimSource,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AimError {
    #[error("aim direction is degenerate")]
    DegenerateDirection,
}

/// Actor-side inputs the resolver needs besides the request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimFrame {
    /// World position of the aiming shoulder.
    pub shoulder: Vec3,
    /// Body forward (unit, world space).
    pub forward: Vec3,
    /// Full reach of the arm (upper + lower length).
    pub reach: f32,
}

/// Resolves `request` and, on success, records the direction in
/// `state.aim_direction_world`.
///
/// `distance` overrides the arm reach for direction-style requests. On failure
/// the state is left untouched.
pub fn resolve_aim(
    state: &mut AnimationState,
    request: &AimRequest,
    frame: &AimFrame,
    distance: Option<f32>,
) -> Result<ResolvedAim, AimError> {
    let reach = distance
        .filter(|distance| *distance > 0.0 && distance.is_finite())
        .unwrap_or(frame.reach);

    let resolved = match *request {
        AimRequest::Target(target) => {
            let direction =
                normalize_or_none(target - frame.shoulder).ok_or(AimError::DegenerateDirection)?;
            ResolvedAim {
                origin: frame.shoulder,
                direction,
                target,
                source: AimSource::Target,
            }
        }
        AimRequest::Direction { origin, direction } => {
            let direction = normalize_or_none(direction).ok_or(AimError::DegenerateDirection)?;
            along(origin.unwrap_or(frame.shoulder), direction, reach, AimSource::Direction)
        }
        AimRequest::Angles {
            origin,
            heading,
            pitch,
        } => {
            let direction = normalize_or_none(direction_from_yaw_pitch(heading, pitch))
                .ok_or(AimError::DegenerateDirection)?;
            along(origin.unwrap_or(frame.shoulder), direction, reach, AimSource::Angles)
        }
        AimRequest::None => {
            let direction =
                normalize_or_none(frame.forward).ok_or(AimError::DegenerateDirection)?;
            along(frame.shoulder, direction, reach, AimSource::Facing)
        }
    };

    state.aim_direction_world = resolved.direction;
    Ok(resolved)
}

fn along(origin: Vec3, direction: Vec3, reach: f32, source: AimSource) -> ResolvedAim {
    ResolvedAim {
        origin,
        direction,
        target: origin + direction * reach,
        source,
    }
}
