//! Pose compositor: merges the locomotion cycle, the attack swing and the aim
//! IK into joint-local rotations, then layers the head, torso and weapon
//! overlays on top.
//!
//! This is the only code that writes joint rotations. A frame runs as:
//!
//! 1. advance the locomotion phase and tick the swing timer;
//! 2. write the leg baseline;
//! 3. smooth the torso toward the held aim and write it;
//! 4. resolve the aim from the turned shoulder and derive head yaw/pitch;
//! 5. write the arm baseline (swing drives the weapon arm while active);
//! 6. solve the arm IK for explicit aims and blend it in by `aim_blend`;
//! 7. write head and weapon pivot.

use super::aim::{AimError, AimFrame, AimRequest, ResolvedAim, resolve_aim};
use super::attack::{self, SwingPose};
use super::ik::{IkError, IkSolution, solve_arm};
use super::locomotion::{LocomotionPose, advance_phase, locomotion_pose};
use super::math::{FORWARD, approach, shortest_arc, step_toward, yaw_pitch};
use super::rig::{ArmChain, JointHierarchy, REST_BONE_AXIS};
use super::state::AnimationState;
use super::tuning::AnimationTuning;
use bevy::log::trace;
use bevy::math::{EulerRot, Quat, Vec3};
use common::Joint;

/// Per-frame signals supplied by the world/actor side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Seconds since the previous frame. Non-positive values skip the frame.
    pub delta_time: f32,
    /// Horizontal movement speed (units/s).
    pub speed: f32,
    pub grounded: bool,
    pub aim: AimRequest,
    /// Overrides the full-reach distance for direction-style aims.
    pub aim_distance: Option<f32>,
    /// Overrides the actor's default IK strength (`0..=1`).
    pub aim_strength: Option<f32>,
}

impl FrameContext {
    pub fn new(delta_time: f32) -> Self {
        Self {
            delta_time,
            ..Self::default()
        }
    }
}

impl Default for FrameContext {
    fn default() -> Self {
        Self {
            delta_time: 0.0,
            speed: 0.0,
            grounded: true,
            aim: AimRequest::None,
            aim_distance: None,
            aim_strength: None,
        }
    }
}

/// What happened during one composed frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PoseReport {
    /// `false` when the frame was skipped (invalid delta time).
    pub composed: bool,
    pub aim: Option<ResolvedAim>,
    pub aim_error: Option<AimError>,
    pub ik: Option<IkSolution>,
    pub ik_error: Option<IkError>,
    pub swinging: bool,
    /// Clamped head yaw relative to the body (radians).
    pub head_yaw: f32,
    /// Clamped head pitch including the speed lean (radians).
    pub head_pitch: f32,
}

/// Runs one frame for one actor and writes the result into `rig`.
///
/// `arm` is the rig's IK chain, if it has one. `default_strength` is the IK
/// strength used when the context does not carry one.
pub fn compose<H: JointHierarchy + ?Sized>(
    state: &mut AnimationState,
    rig: &mut H,
    arm: Option<&ArmChain>,
    ctx: &FrameContext,
    default_strength: f32,
    tuning: &AnimationTuning,
) -> PoseReport {
    let mut report = PoseReport {
        swinging: state.is_swinging(),
        ..PoseReport::default()
    };
    let delta_time = ctx.delta_time;
    if !(delta_time > 0.0) || !delta_time.is_finite() {
        return report;
    }
    report.composed = true;

    let speed = if ctx.speed.is_finite() { ctx.speed.max(0.0) } else { 0.0 };

    state.move_phase = advance_phase(
        state.move_phase,
        delta_time,
        speed,
        ctx.grounded,
        &tuning.locomotion,
    );
    let locomotion = locomotion_pose(state.move_phase, speed, ctx.grounded, &tuning.locomotion);

    attack::tick(state, delta_time);
    let swing = attack::swing_pose(state, &tuning.attack);
    report.swinging = swing.is_some();

    write_legs(rig, &locomotion);

    let root = rig.root();
    let (held_yaw, _) = head_angles(state, root.rotation, speed, tuning);
    let torso_target = -held_yaw * state.aim_blend * tuning.look.torso_counter_ratio;
    state.torso_yaw = approach(state.torso_yaw, torso_target, tuning.look.torso_smoothing);
    rig.set_local_rotation(Joint::Torso, Quat::from_rotation_y(state.torso_yaw));

    let reach = arm.map_or(0.0, |arm| arm.upper_length + arm.lower_length);
    let shoulder = arm
        .and_then(|arm| rig.world_transform(arm.shoulder))
        .map_or(root.position, |shoulder| shoulder.position);
    let frame = AimFrame {
        shoulder,
        forward: root.rotation * FORWARD,
        reach,
    };
    match resolve_aim(state, &ctx.aim, &frame, ctx.aim_distance) {
        Ok(resolved) => report.aim = Some(resolved),
        Err(err) => {
            trace!("aim skipped: {err}");
            report.aim_error = Some(err);
        }
    }

    let (head_yaw, head_pitch) = head_angles(state, root.rotation, speed, tuning);
    report.head_yaw = head_yaw;
    report.head_pitch = head_pitch;

    write_arm_baseline(rig, &locomotion, swing.as_ref(), tuning);

    let mut solution = None;
    if let (Some(aim), Some(arm), true) = (report.aim, arm, ctx.aim.is_explicit()) {
        let bend_hint = root.rotation * Vec3::from_array(tuning.aim.bend_hint);
        match solve_arm(&*rig, arm, aim.target, bend_hint, tuning.aim.reach_epsilon) {
            Ok(solved) => solution = Some(solved),
            Err(err) => {
                trace!("arm IK skipped: {err}");
                report.ik_error = Some(err);
            }
        }
    }

    let strength = ctx
        .aim_strength
        .filter(|strength| strength.is_finite())
        .unwrap_or(default_strength)
        .clamp(0.0, 1.0);
    state.aim_blend = if solution.is_some() {
        let target = if report.swinging { 1.0 } else { strength };
        approach(state.aim_blend, target, tuning.aim.blend_smoothing)
    } else {
        step_toward(state.aim_blend, 0.0, tuning.aim.blend_decay_rate * delta_time)
    }
    .clamp(0.0, 1.0);

    if let (Some(solved), Some(arm)) = (solution.as_ref(), arm) {
        blend_arm(rig, arm, solved, state.aim_blend, tuning);
    }
    report.ik = solution;

    rig.set_local_rotation(
        Joint::Head,
        Quat::from_euler(EulerRot::YXZ, head_yaw - state.torso_yaw, head_pitch, 0.0),
    );

    let weapon = match swing {
        Some(swing) => Quat::from_rotation_x(swing.weapon),
        None => weapon_follow(&*rig, state.aim_direction_world, state.aim_blend),
    };
    rig.set_local_rotation(Joint::WeaponPivot, weapon);

    report
}

fn write_legs<H: JointHierarchy + ?Sized>(rig: &mut H, pose: &LocomotionPose) {
    rig.set_local_rotation(Joint::LeftHip, Quat::from_rotation_x(pose.left_hip));
    rig.set_local_rotation(Joint::RightHip, Quat::from_rotation_x(pose.right_hip));
    // Knees fold the shin backward.
    rig.set_local_rotation(Joint::LeftKnee, Quat::from_rotation_x(-pose.left_knee));
    rig.set_local_rotation(Joint::RightKnee, Quat::from_rotation_x(-pose.right_knee));
    rig.set_local_rotation(Joint::LeftFoot, Quat::from_rotation_x(pose.left_foot));
    rig.set_local_rotation(Joint::RightFoot, Quat::from_rotation_x(pose.right_foot));
}

fn write_arm_baseline<H: JointHierarchy + ?Sized>(
    rig: &mut H,
    pose: &LocomotionPose,
    swing: Option<&SwingPose>,
    tuning: &AnimationTuning,
) {
    let idle_elbow = Quat::from_rotation_x(tuning.locomotion.idle_elbow_bend);

    rig.set_local_rotation(Joint::LeftShoulder, Quat::from_rotation_x(pose.left_shoulder));
    rig.set_local_rotation(Joint::LeftElbow, idle_elbow);
    rig.set_local_rotation(Joint::LeftHand, Quat::IDENTITY);

    let (shoulder, elbow) = match swing {
        Some(swing) => (
            Quat::from_rotation_x(swing.shoulder),
            Quat::from_rotation_x(tuning.locomotion.idle_elbow_bend + swing.elbow),
        ),
        None => (Quat::from_rotation_x(pose.right_shoulder), idle_elbow),
    };
    rig.set_local_rotation(Joint::RightShoulder, shoulder);
    rig.set_local_rotation(Joint::RightElbow, elbow);
    rig.set_local_rotation(Joint::RightHand, Quat::IDENTITY);
}

/// Slerps the arm from the baseline already written toward the solved pose.
fn blend_arm<H: JointHierarchy + ?Sized>(
    rig: &mut H,
    arm: &ArmChain,
    solution: &IkSolution,
    blend: f32,
    tuning: &AnimationTuning,
) {
    let hand_flex = Quat::from_rotation_x(solution.elbow_angle * tuning.aim.hand_flex_ratio);
    for (joint, solved) in [
        (arm.shoulder, solution.shoulder_local),
        (arm.elbow, solution.elbow_local),
        (arm.hand, hand_flex),
    ] {
        let baseline = rig.local_rotation(joint).unwrap_or(Quat::IDENTITY);
        rig.set_local_rotation(joint, baseline.slerp(solved, blend).normalize());
    }
}

/// Weapon pivot rotation that turns the weapon from its holder's current
/// frame toward `aim_direction`, scaled by `blend`. Rest at zero blend.
fn weapon_follow<H: JointHierarchy + ?Sized>(rig: &H, aim_direction: Vec3, blend: f32) -> Quat {
    if !(blend > 0.0) {
        return Quat::IDENTITY;
    }
    let Some(holder) = rig.parent_world_rotation(Joint::WeaponPivot) else {
        return Quat::IDENTITY;
    };
    let turn = shortest_arc(holder * REST_BONE_AXIS, aim_direction);
    let local = holder.inverse() * turn * holder;
    Quat::IDENTITY.slerp(local, blend.min(1.0)).normalize()
}

/// Head yaw/pitch toward the last aim direction, in body space, clamped.
fn head_angles(
    state: &AnimationState,
    body_rotation: Quat,
    speed: f32,
    tuning: &AnimationTuning,
) -> (f32, f32) {
    let look = &tuning.look;
    let local = body_rotation.inverse() * state.aim_direction_world;
    let (yaw, pitch) = yaw_pitch(local);
    let lean = (speed * look.lean_per_speed).min(look.max_lean);
    (
        yaw.clamp(-look.head_yaw_limit, look.head_yaw_limit),
        (pitch.clamp(-look.head_pitch_limit, look.head_pitch_limit) - lean)
            .clamp(-look.head_pitch_limit, look.head_pitch_limit),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::attack::trigger;
    use crate::animation::math::{direction_from_yaw_pitch, rotation_angle};
    use crate::animation::rig::{JointWorld, RigLayout, RigPose};
    use common::{MobArchetype, PlayerArchetype, RigArchetype};
    use std::sync::Arc;

    const DT: f32 = 1.0 / 60.0;
    const EPSILON: f32 = 1e-4;

    fn pose_for(archetype: RigArchetype) -> (RigPose, Option<ArmChain>) {
        let layout = Arc::new(RigLayout::build(&archetype.descriptor()).unwrap());
        let arm = layout.arm().copied();
        (RigPose::new(layout), arm)
    }

    fn player() -> (RigPose, Option<ArmChain>) {
        pose_for(RigArchetype::Player(PlayerArchetype::default()))
    }

    fn local(pose: &RigPose, joint: Joint) -> Quat {
        pose.local_rotation(joint).unwrap()
    }

    #[test]
    fn idle_actor_breathes_and_recenters() {
        let tuning = AnimationTuning::default();
        let (mut pose, arm) = player();
        let mut state = AnimationState::new(0.3);
        state.aim_blend = 0.6;
        state.aim_direction_world = Vec3::new(0.5, 0.3, -0.8).normalize();

        let hip_limit = tuning.locomotion.idle_amplitude * tuning.locomotion.hip_swing + 1e-5;
        let knee_limit = tuning.locomotion.idle_amplitude * tuning.locomotion.knee_bend + 1e-5;
        let mut hip_angles = Vec::new();
        let mut report = PoseReport::default();
        for _ in 0..60 {
            report = compose(
                &mut state,
                &mut pose,
                arm.as_ref(),
                &FrameContext::new(DT),
                0.85,
                &tuning,
            );
            assert!(report.composed);
            assert!(rotation_angle(local(&pose, Joint::LeftHip)) <= hip_limit);
            assert!(rotation_angle(local(&pose, Joint::RightKnee)) <= knee_limit);
            hip_angles.push(rotation_angle(local(&pose, Joint::LeftHip)));
        }

        assert!(hip_angles.iter().any(|angle| (angle - hip_angles[0]).abs() > 1e-4));
        assert_eq!(report.head_yaw, 0.0);
        assert_eq!(report.head_pitch, 0.0);
        assert_eq!(state.aim_blend(), 0.0);
        assert!(report.ik.is_none());
        assert!(rotation_angle(local(&pose, Joint::Head) * local(&pose, Joint::Torso)) < 0.01);
    }

    #[test]
    fn weapon_returns_to_rest_after_swing() {
        let tuning = AnimationTuning::default();
        let (mut pose, arm) = player();
        let mut state = AnimationState::default();
        trigger(&mut state, &tuning.attack);

        let steps = (tuning.attack.duration / DT).round() as usize;
        let mut peak = 0.0_f32;
        for step in 0..steps {
            let report = compose(
                &mut state,
                &mut pose,
                arm.as_ref(),
                &FrameContext::new(DT),
                0.85,
                &tuning,
            );
            peak = peak.max(rotation_angle(local(&pose, Joint::WeaponPivot)));
            if step + 1 < steps {
                assert!(report.swinging);
            }
        }

        assert!(peak > tuning.attack.weapon_swing * 0.9);
        assert!(!state.is_swinging());
        assert!(rotation_angle(local(&pose, Joint::WeaponPivot)) < EPSILON);
    }

    #[test]
    fn swing_replaces_weapon_arm_only() {
        let tuning = AnimationTuning::default();
        let (mut pose, arm) = player();
        let mut state = AnimationState::new(1.0);
        trigger(&mut state, &tuning.attack);

        let ctx = FrameContext {
            speed: 3.0,
            ..FrameContext::new(DT)
        };
        for _ in 0..10 {
            compose(&mut state, &mut pose, arm.as_ref(), &ctx, 0.85, &tuning);
        }

        let swing = attack::swing_pose(&state, &tuning.attack).unwrap();
        let expected = Quat::from_rotation_x(swing.shoulder);
        assert!(rotation_angle(local(&pose, Joint::RightShoulder).inverse() * expected) < EPSILON);

        let locomotion = locomotion_pose(state.move_phase(), 3.0, true, &tuning.locomotion);
        let left = Quat::from_rotation_x(locomotion.left_shoulder);
        assert!(rotation_angle(local(&pose, Joint::LeftShoulder).inverse() * left) < EPSILON);
        let hip = Quat::from_rotation_x(locomotion.left_hip);
        assert!(rotation_angle(local(&pose, Joint::LeftHip).inverse() * hip) < EPSILON);
    }

    #[test]
    fn swing_layers_on_idle_elbow_bend() {
        let tuning = AnimationTuning::default();
        let (mut pose, arm) = player();
        let mut state = AnimationState::default();
        let ctx = FrameContext::new(DT);

        compose(&mut state, &mut pose, arm.as_ref(), &ctx, 0.85, &tuning);
        let before = local(&pose, Joint::RightElbow);
        let idle = Quat::from_rotation_x(tuning.locomotion.idle_elbow_bend);
        assert!(rotation_angle(before.inverse() * idle) < EPSILON);

        trigger(&mut state, &tuning.attack);
        compose(&mut state, &mut pose, arm.as_ref(), &ctx, 0.85, &tuning);
        let swing = attack::swing_pose(&state, &tuning.attack).unwrap();
        let after = local(&pose, Joint::RightElbow);

        let expected = Quat::from_rotation_x(tuning.locomotion.idle_elbow_bend + swing.elbow);
        assert!(rotation_angle(after.inverse() * expected) < EPSILON);
        let jump = rotation_angle(before.inverse() * after);
        assert!(jump <= swing.elbow.abs() + EPSILON, "elbow jumped {jump}");
    }

    #[test]
    fn weapon_points_along_aim_under_solved_hand() {
        let tuning = AnimationTuning::default();
        let (mut pose, arm) = player();
        let mut state = AnimationState::default();
        let aim = direction_from_yaw_pitch(0.0, 0.5);
        let ctx = FrameContext {
            aim: AimRequest::Direction {
                origin: None,
                direction: aim,
            },
            aim_strength: Some(1.0),
            ..FrameContext::new(DT)
        };

        let mut report = PoseReport::default();
        for _ in 0..200 {
            report = compose(&mut state, &mut pose, arm.as_ref(), &ctx, 0.85, &tuning);
        }

        assert!(report.ik.is_some());
        assert!(state.aim_blend() > 0.999);
        let weapon = pose.world_transform(Joint::WeaponPivot).unwrap().rotation * REST_BONE_AXIS;
        assert!(weapon.angle_between(aim) < 1e-2, "weapon {weapon:?} aim {aim:?}");
    }

    #[test]
    fn hand_flex_scales_with_elbow_bend_and_blend() {
        let tuning = AnimationTuning::default();
        let (mut pose, arm) = player();
        let shoulder = pose.world_transform(Joint::RightShoulder).unwrap().position;
        let mut state = AnimationState::default();
        let ctx = FrameContext {
            aim: AimRequest::Target(shoulder + Vec3::new(0.05, -0.05, -0.35)),
            aim_strength: Some(0.6),
            ..FrameContext::new(DT)
        };

        let mut report = PoseReport::default();
        for _ in 0..120 {
            report = compose(&mut state, &mut pose, arm.as_ref(), &ctx, 0.85, &tuning);
        }

        let solved = report.ik.unwrap();
        assert!(solved.elbow_angle > 0.1);
        assert!((state.aim_blend() - 0.6).abs() < 1e-3);
        let expected = solved.elbow_angle * tuning.aim.hand_flex_ratio * state.aim_blend();
        let hand = rotation_angle(local(&pose, Joint::RightHand));
        assert!((hand - expected).abs() < 1e-4, "hand {hand} expected {expected}");
    }

    #[test]
    fn aim_origin_follows_turning_torso() {
        let tuning = AnimationTuning::default();
        let (mut pose, arm) = player();
        let mut state = AnimationState::default();
        let ctx = FrameContext {
            aim: AimRequest::Direction {
                origin: None,
                direction: Vec3::new(-1.0, 0.0, -0.3),
            },
            aim_strength: Some(1.0),
            ..FrameContext::new(DT)
        };

        for _ in 0..10 {
            let report = compose(&mut state, &mut pose, arm.as_ref(), &ctx, 0.85, &tuning);
            let origin = report.aim.unwrap().origin;
            let shoulder = pose.world_transform(Joint::RightShoulder).unwrap().position;
            assert!(origin.distance(shoulder) < 1e-5, "origin {origin:?} shoulder {shoulder:?}");
        }
        assert!(state.torso_yaw() < 0.0);
    }

    #[test]
    fn full_strength_aim_places_hand_on_target() {
        let tuning = AnimationTuning::default();
        let (mut pose, arm) = player();
        pose.set_root(JointWorld::new(Vec3::new(3.0, 0.0, 1.0), Quat::from_rotation_y(0.4)));
        let arm_chain = arm.unwrap();
        let shoulder = pose.world_transform(arm_chain.shoulder).unwrap().position;
        let target = shoulder + Quat::from_rotation_y(0.4) * Vec3::new(0.05, -0.05, -0.4);

        let mut state = AnimationState::default();
        let ctx = FrameContext {
            aim: AimRequest::Target(target),
            aim_strength: Some(1.0),
            ..FrameContext::new(DT)
        };
        let mut report = PoseReport::default();
        for _ in 0..120 {
            report = compose(&mut state, &mut pose, arm.as_ref(), &ctx, 0.5, &tuning);
        }

        assert!(report.ik.is_some());
        assert!(state.aim_blend() > 0.999);
        let hand = pose.world_transform(arm_chain.hand).unwrap().position;
        assert!(hand.distance(target) < 1e-2, "hand {hand:?} target {target:?}");
    }

    #[test]
    fn blend_follows_caller_strength_and_decays_without_aim() {
        let tuning = AnimationTuning::default();
        let (mut pose, arm) = player();
        let mut state = AnimationState::default();

        let aiming = FrameContext {
            aim: AimRequest::Direction {
                origin: None,
                direction: Vec3::new(0.2, 0.1, -1.0),
            },
            ..FrameContext::new(DT)
        };
        compose(&mut state, &mut pose, arm.as_ref(), &aiming, 0.6, &tuning);
        assert!((state.aim_blend() - 0.6 * tuning.aim.blend_smoothing).abs() < 1e-6);

        for _ in 0..60 {
            compose(&mut state, &mut pose, arm.as_ref(), &aiming, 0.6, &tuning);
        }
        assert!((state.aim_blend() - 0.6).abs() < 1e-3);

        let idle = FrameContext::new(DT);
        let before = state.aim_blend();
        compose(&mut state, &mut pose, arm.as_ref(), &idle, 0.6, &tuning);
        let expected = before - tuning.aim.blend_decay_rate * DT;
        assert!((state.aim_blend() - expected).abs() < 1e-6);
    }

    #[test]
    fn degenerate_aim_keeps_direction_and_skips_ik() {
        let tuning = AnimationTuning::default();
        let (mut pose, arm) = player();
        let mut state = AnimationState::default();
        let previous = Vec3::new(0.0, 0.2, -1.0).normalize();
        state.aim_direction_world = previous;

        let ctx = FrameContext {
            aim: AimRequest::Direction {
                origin: None,
                direction: Vec3::ZERO,
            },
            ..FrameContext::new(DT)
        };
        let report = compose(&mut state, &mut pose, arm.as_ref(), &ctx, 0.85, &tuning);

        assert_eq!(report.aim_error, Some(AimError::DegenerateDirection));
        assert!(report.ik.is_none());
        assert_eq!(state.aim_direction_world(), previous);
        assert_eq!(state.aim_blend(), 0.0);
    }

    #[test]
    fn missing_elbow_leaves_baseline_arm() {
        let tuning = AnimationTuning::default();
        let (mut pose, arm) = pose_for(RigArchetype::Mob(MobArchetype::Golem));
        let mut state = AnimationState::new(0.5);
        let shoulder = pose.world_transform(Joint::RightShoulder).unwrap().position;

        let ctx = FrameContext {
            aim: AimRequest::Target(shoulder + Vec3::new(0.0, 0.0, -1.0)),
            ..FrameContext::new(DT)
        };
        let report = compose(&mut state, &mut pose, arm.as_ref(), &ctx, 0.5, &tuning);

        assert_eq!(report.ik_error, Some(IkError::MissingJoint(Joint::RightElbow)));
        let locomotion = locomotion_pose(state.move_phase(), 0.0, true, &tuning.locomotion);
        let expected = Quat::from_rotation_x(locomotion.right_shoulder);
        assert!(rotation_angle(local(&pose, Joint::RightShoulder).inverse() * expected) < EPSILON);
        assert_eq!(state.aim_blend(), 0.0);
    }

    #[test]
    fn head_yaw_is_clamped_and_torso_counter_rotates() {
        let tuning = AnimationTuning::default();
        let (mut pose, arm) = player();
        let mut state = AnimationState::default();
        let ctx = FrameContext {
            aim: AimRequest::Direction {
                origin: None,
                direction: Vec3::new(-1.0, 0.0, 0.3),
            },
            aim_strength: Some(1.0),
            ..FrameContext::new(DT)
        };

        let mut report = PoseReport::default();
        for _ in 0..30 {
            report = compose(&mut state, &mut pose, arm.as_ref(), &ctx, 0.85, &tuning);
        }

        assert_eq!(report.head_yaw, tuning.look.head_yaw_limit);
        assert!(state.torso_yaw() < 0.0);
        assert!(state.torso_yaw() > -tuning.look.head_yaw_limit * tuning.look.torso_counter_ratio - EPSILON);

        // Head world yaw is the clamped yaw, regardless of torso counter-rotation.
        let head = pose.world_transform(Joint::Head).unwrap().rotation;
        let (world_yaw, _) = yaw_pitch(head * FORWARD);
        assert!((world_yaw - tuning.look.head_yaw_limit).abs() < EPSILON);
    }

    #[test]
    fn airborne_actor_holds_falling_pose() {
        let tuning = AnimationTuning::default();
        let (mut pose, arm) = player();
        let mut state = AnimationState::default();
        let ctx = FrameContext {
            speed: 4.0,
            grounded: false,
            ..FrameContext::new(DT)
        };
        compose(&mut state, &mut pose, arm.as_ref(), &ctx, 0.85, &tuning);
        let expected = Quat::from_rotation_x(tuning.locomotion.falling.left_hip);
        assert!(rotation_angle(local(&pose, Joint::LeftHip).inverse() * expected) < EPSILON);
    }

    #[test]
    fn non_positive_delta_is_a_no_op() {
        let tuning = AnimationTuning::default();
        let (mut pose, arm) = player();
        let mut state = AnimationState::new(1.0);
        let before_state = state.clone();
        let before_pose = pose.clone();

        for delta_time in [0.0, -0.1, f32::NAN] {
            let report = compose(
                &mut state,
                &mut pose,
                arm.as_ref(),
                &FrameContext::new(delta_time),
                0.85,
                &tuning,
            );
            assert!(!report.composed);
        }
        assert_eq!(state, before_state);
        assert_eq!(pose, before_pose);
    }
}
