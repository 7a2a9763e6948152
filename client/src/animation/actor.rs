use super::attack;
use super::compositor::{FrameContext, PoseReport, compose};
use super::rig::{JointWorld, RigError, RigLayout, RigPose};
use super::state::AnimationState;
use super::tuning::{AnimationTuning, AttackTuning};
use common::RigArchetype;
use std::sync::Arc;

/// One animated actor: its private animation state plus the rig it drives.
///
/// Actors never read each other, so any number of them can be updated in
/// parallel as long as each one is handled by a single thread per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedActor {
    archetype: Option<RigArchetype>,
    state: AnimationState,
    rig: Option<RigPose>,
    default_aim_strength: Option<f32>,
}

impl AnimatedActor {
    /// Actor without archetype defaults. `rig` may be `None` while the
    /// visual representation is not built yet.
    pub fn new(state: AnimationState, rig: Option<RigPose>) -> Self {
        Self {
            archetype: None,
            state,
            rig,
            default_aim_strength: None,
        }
    }

    pub fn from_archetype(archetype: RigArchetype, initial_phase: f32) -> Result<Self, RigError> {
        let layout = RigLayout::build(&archetype.descriptor())?;
        Ok(Self {
            archetype: Some(archetype),
            state: AnimationState::new(initial_phase),
            rig: Some(RigPose::new(Arc::new(layout))),
            default_aim_strength: Some(archetype.default_aim_strength()),
        })
    }

    pub fn archetype(&self) -> Option<RigArchetype> {
        self.archetype
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn rig(&self) -> Option<&RigPose> {
        self.rig.as_ref()
    }

    pub fn has_rig(&self) -> bool {
        self.rig.is_some()
    }

    /// Places the actor body in the world before the next update.
    pub fn set_root(&mut self, root: JointWorld) {
        if let Some(rig) = self.rig.as_mut() {
            rig.set_root(root);
        }
    }

    pub fn trigger_attack(&mut self, tuning: &AttackTuning) {
        attack::trigger(&mut self.state, tuning);
    }

    /// Per-frame entry point: advances the animation and writes joint
    /// rotations into the rig. A no-op for actors without a rig.
    pub fn update_animation(&mut self, ctx: &FrameContext, tuning: &AnimationTuning) {
        self.compose_frame(ctx, tuning);
    }

    /// Same as [`update_animation`](Self::update_animation), returning what
    /// the compositor did. `None` when the actor has no rig.
    pub fn compose_frame(
        &mut self,
        ctx: &FrameContext,
        tuning: &AnimationTuning,
    ) -> Option<PoseReport> {
        let rig = self.rig.as_mut()?;
        let layout = Arc::clone(rig.layout());
        let strength = self
            .default_aim_strength
            .unwrap_or(tuning.aim.default_strength);
        Some(compose(
            &mut self.state,
            rig,
            layout.arm(),
            ctx,
            strength,
            tuning,
        ))
    }
}
