//! Tick-driven driver for the gesture state machine
//!
//! The host calls [`ManipulationController::tick`] once per frame with a fresh
//! [`InputSnapshot`]. The controller is the only writer of the container's
//! pose and scale while it runs.

use crate::container::Container;
use crate::hands::{HandPoses, HeldTriggers, InputSnapshot, TriggerLatch};
use crate::state::{evaluate, ManipulationConfig, ManipulationEffect, ManipulationState, StateKind};
use crate::visuals::ScaleVisuals;
use tracing::{debug, trace};

pub struct ManipulationController {
    config: ManipulationConfig,
    state: ManipulationState,
    left: TriggerLatch,
    right: TriggerLatch,
    poses: HandPoses,
    visuals: ScaleVisuals,
    effects: Vec<ManipulationEffect>,
    elapsed: f32,
}

impl ManipulationController {
    pub fn new(config: ManipulationConfig) -> Self {
        let visuals = ScaleVisuals::new(config.indicator_offset);
        Self {
            config,
            state: ManipulationState::Idle,
            left: TriggerLatch::default(),
            right: TriggerLatch::default(),
            poses: HandPoses::default(),
            visuals,
            effects: Vec::new(),
            elapsed: 0.0,
        }
    }

    pub fn state(&self) -> &ManipulationState {
        &self.state
    }

    pub fn kind(&self) -> StateKind {
        self.state.kind()
    }

    pub fn held(&self) -> HeldTriggers {
        HeldTriggers::new(self.left.is_held(), self.right.is_held())
    }

    pub fn visuals(&self) -> &ScaleVisuals {
        &self.visuals
    }

    pub fn config(&self) -> &ManipulationConfig {
        &self.config
    }

    /// Seconds of tracked ticks processed so far
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Process one tick and return the effects that were applied.
    ///
    /// If either controller is untracked the tick is skipped entirely: edges
    /// are not latched and the state does not change.
    pub fn tick(
        &mut self,
        container: &mut Container,
        dt: f32,
        input: &InputSnapshot,
    ) -> &[ManipulationEffect] {
        self.effects.clear();

        if !input.is_tracked() {
            trace!(
                left = input.left.tracked,
                right = input.right.tracked,
                "controller tracking lost; skipping tick"
            );
            self.visuals.refresh_line();
            return &self.effects;
        }
        self.elapsed += dt;

        self.left.apply(&input.left);
        self.right.apply(&input.right);
        self.poses = input.poses();

        let transition = evaluate(&self.state, self.held(), &self.poses, container, &self.config);
        if transition.changed_from(&self.state) {
            debug!(
                from = ?self.state.kind(),
                to = ?transition.state.kind(),
                "manipulation state changed"
            );
        }
        self.state = transition.state;
        self.effects = transition.effects;

        for effect in &self.effects {
            Self::apply(effect, container, &mut self.visuals);
        }

        if let ManipulationState::Moving { hand, grab_offset } = &self.state {
            container.set_world_pose(&(self.poses.pose(*hand) * grab_offset));
        }

        self.visuals.follow(&self.poses);
        self.visuals.refresh_line();
        &self.effects
    }

    /// Drop any gesture in progress, e.g. when the visualization is rebuilt
    pub fn reset(&mut self) {
        self.state = ManipulationState::Idle;
        self.left.reset();
        self.right.reset();
        self.visuals.set_indicators_visible(false);
        self.visuals.set_line_enabled(false);
        self.effects.clear();
    }

    fn apply(effect: &ManipulationEffect, container: &mut Container, visuals: &mut ScaleVisuals) {
        match effect {
            // Following is recomputed every tick from the state's grab offset
            ManipulationEffect::AttachToHand { .. } | ManipulationEffect::Detach => {}
            ManipulationEffect::ShowScaleIndicators => visuals.set_indicators_visible(true),
            ManipulationEffect::HideScaleIndicators => visuals.set_indicators_visible(false),
            ManipulationEffect::EnableGuideLine => visuals.set_line_enabled(true),
            ManipulationEffect::DisableGuideLine => visuals.set_line_enabled(false),
            ManipulationEffect::SetScale(scale) => container.scale = *scale,
        }
    }
}

impl Default for ManipulationController {
    fn default() -> Self {
        Self::new(ManipulationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hands::{HandId, HandSample};
    use approx::assert_relative_eq;
    use scatterplot_core::{Point3f, Vector3f};

    const DT: f32 = 1.0 / 90.0;

    fn at(x: f32, y: f32, z: f32) -> HandSample {
        HandSample::at(Point3f::new(x, y, z))
    }

    struct Rig {
        controller: ManipulationController,
        container: Container,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                controller: ManipulationController::default(),
                container: Container::new(),
            }
        }

        fn tick(&mut self, left: HandSample, right: HandSample) -> Vec<ManipulationEffect> {
            self.controller
                .tick(&mut self.container, DT, &InputSnapshot::new(left, right))
                .to_vec()
        }
    }

    #[test]
    fn test_simultaneous_press_scales() {
        let mut rig = Rig::new();
        rig.tick(at(0.0, 0.0, 0.0).pressed(), at(1.0, 0.0, 0.0).pressed());
        assert_eq!(rig.controller.kind(), StateKind::Scaling);
        assert!(rig.controller.visuals().indicator(HandId::Left).visible);
        assert!(rig.controller.visuals().line.enabled);
        assert_eq!(rig.controller.visuals().line.end, Point3f::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_pull_apart_scales_up() {
        let mut rig = Rig::new();
        rig.tick(at(0.0, 0.0, 0.0).pressed(), at(0.5, 0.0, 0.0).pressed());
        rig.tick(at(-0.25, 0.0, 0.0), at(0.75, 0.0, 0.0));
        assert_relative_eq!(rig.container.scale, Vector3f::repeat(2.0), epsilon = 1e-5);

        // Releasing one trigger freezes the scale
        rig.tick(at(-0.25, 0.0, 0.0).released(), at(2.0, 0.0, 0.0));
        assert_eq!(rig.controller.kind(), StateKind::Idle);
        assert_relative_eq!(rig.container.scale, Vector3f::repeat(2.0), epsilon = 1e-5);
        assert!(!rig.controller.visuals().is_active());
    }

    #[test]
    fn test_single_hand_drags_container() {
        let mut rig = Rig::new();
        rig.container.position = Vector3f::new(0.0, 1.0, 0.0);

        rig.tick(at(0.0, 1.0, -0.5).pressed(), at(1.0, 1.0, 0.0));
        assert_eq!(rig.controller.kind(), StateKind::Moving(HandId::Left));
        assert_relative_eq!(rig.container.position, Vector3f::new(0.0, 1.0, 0.0), epsilon = 1e-6);

        rig.tick(at(1.0, 2.0, -0.5), at(1.0, 1.0, 0.0));
        assert_relative_eq!(rig.container.position, Vector3f::new(1.0, 2.0, 0.0), epsilon = 1e-6);

        rig.tick(at(1.0, 2.0, -0.5).released(), at(1.0, 1.0, 0.0));
        assert_eq!(rig.controller.kind(), StateKind::Idle);

        // Detached: further hand motion leaves the container in place
        rig.tick(at(5.0, 5.0, 5.0), at(1.0, 1.0, 0.0));
        assert_relative_eq!(rig.container.position, Vector3f::new(1.0, 2.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_tracking_loss_is_a_no_op() {
        let mut rig = Rig::new();
        let effects = rig.tick(at(0.0, 0.0, 0.0).pressed(), at(1.0, 0.0, 0.0).untracked());
        assert!(effects.is_empty());
        assert_eq!(rig.controller.kind(), StateKind::Idle);
        assert_eq!(rig.controller.held(), HeldTriggers::new(false, false));
        assert_eq!(rig.controller.elapsed(), 0.0);

        rig.tick(at(0.0, 0.0, 0.0).pressed(), at(1.0, 0.0, 0.0));
        assert_eq!(rig.controller.kind(), StateKind::Moving(HandId::Left));
    }

    #[test]
    fn test_tracking_loss_keeps_gesture() {
        let mut rig = Rig::new();
        rig.tick(at(0.0, 0.0, 0.0).pressed(), at(1.0, 0.0, 0.0).pressed());
        rig.tick(at(0.0, 0.0, 0.0).untracked().released(), at(3.0, 0.0, 0.0));
        assert_eq!(rig.controller.kind(), StateKind::Scaling);
        assert_relative_eq!(rig.container.scale, Vector3f::repeat(1.0));
    }

    #[test]
    fn test_tracking_loss_while_moving_freezes_container() {
        let mut rig = Rig::new();
        rig.container.position = Vector3f::new(0.0, 1.0, 0.0);
        rig.tick(at(0.0, 1.0, -0.5).pressed(), at(1.0, 1.0, 0.0));
        assert_eq!(rig.controller.kind(), StateKind::Moving(HandId::Left));

        let effects = rig.tick(at(1.0, 2.0, -0.5).untracked(), at(1.0, 1.0, 0.0));
        assert!(effects.is_empty());
        assert_eq!(rig.controller.kind(), StateKind::Moving(HandId::Left));
        assert_relative_eq!(rig.container.position, Vector3f::new(0.0, 1.0, 0.0), epsilon = 1e-6);

        // Tracking comes back: the grab offset from the press still applies
        rig.tick(at(1.0, 2.0, -0.5), at(1.0, 1.0, 0.0));
        assert_eq!(rig.controller.kind(), StateKind::Moving(HandId::Left));
        assert_relative_eq!(rig.container.position, Vector3f::new(1.0, 2.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_is_carried_while_moving() {
        use nalgebra::{Isometry3, Translation3, UnitQuaternion};

        let mut rig = Rig::new();
        rig.container.position = Vector3f::new(0.0, 0.0, -1.0);
        rig.tick(HandSample::default().pressed(), at(1.0, 0.0, 0.0));

        let turned = Isometry3::from_parts(
            Translation3::identity(),
            UnitQuaternion::from_axis_angle(&Vector3f::y_axis(), std::f32::consts::PI),
        );
        rig.tick(HandSample::with_pose(turned), at(1.0, 0.0, 0.0));
        assert_relative_eq!(rig.container.position, Vector3f::new(0.0, 0.0, 1.0), epsilon = 1e-5);
        assert_relative_eq!(rig.container.rotation, turned.rotation, epsilon = 1e-5);
    }

    #[test]
    fn test_reset_drops_gesture() {
        let mut rig = Rig::new();
        rig.tick(at(0.0, 0.0, 0.0).pressed(), at(1.0, 0.0, 0.0).pressed());
        rig.controller.reset();
        assert_eq!(rig.controller.kind(), StateKind::Idle);
        assert!(!rig.controller.visuals().is_active());
        assert_eq!(rig.controller.held(), HeldTriggers::default());
    }
}
