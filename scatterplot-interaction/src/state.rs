//! Move/scale gesture state machine
//!
//! [`evaluate`] is a pure function from the previous state, the latched
//! triggers and the current hand poses to the next state plus a list of
//! effects for the host to apply. Within one tick the checks run in this order:
//!
//! 1. leave `Scaling` when either trigger is up
//! 2. enter `Scaling` when both triggers are held
//! 3. enter `Moving` from `Idle` when any trigger is held
//! 4. leave `Moving` when neither trigger is held
//! 5. while `Scaling`, rescale from the current hand distance

use crate::container::Container;
use crate::hands::{HandId, HandPoses, HeldTriggers};
use nalgebra::Isometry3;
use scatterplot_core::{distance, Vector3f};
use serde::{Deserialize, Serialize};

/// Tuning of the gesture recogniser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManipulationConfig {
    /// Where each scale indicator sits in its controller's frame. Grab
    /// distance is measured between the two indicators.
    pub indicator_offset: Vector3f,
    /// Let the hand still held after a scaling gesture grab the plot on the
    /// same tick instead of the next one.
    pub regrab_on_scale_exit: bool,
    /// A scaling gesture that starts with the indicators closer than this
    /// leaves the scale untouched.
    pub min_grab_distance: f32,
}

impl Default for ManipulationConfig {
    fn default() -> Self {
        Self {
            indicator_offset: Vector3f::zeros(),
            regrab_on_scale_exit: false,
            min_grab_distance: 1e-4,
        }
    }
}

/// Current gesture
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ManipulationState {
    #[default]
    Idle,
    /// The container follows `hand`; `grab_offset` is the container pose in
    /// the hand's frame at grab time.
    Moving {
        hand: HandId,
        grab_offset: Isometry3<f32>,
    },
    Scaling {
        initial_grab_distance: f32,
        initial_scale: Vector3f,
    },
}

/// Data-free view of [`ManipulationState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    Idle,
    Moving(HandId),
    Scaling,
}

impl ManipulationState {
    pub fn kind(&self) -> StateKind {
        match self {
            ManipulationState::Idle => StateKind::Idle,
            ManipulationState::Moving { hand, .. } => StateKind::Moving(*hand),
            ManipulationState::Scaling { .. } => StateKind::Scaling,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ManipulationState::Idle)
    }

    pub fn is_moving(&self) -> bool {
        matches!(self, ManipulationState::Moving { .. })
    }

    pub fn is_scaling(&self) -> bool {
        matches!(self, ManipulationState::Scaling { .. })
    }
}

/// Something the host must do to the scene as a result of a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ManipulationEffect {
    /// Make the container follow `hand`, keeping `offset` relative to it
    AttachToHand {
        hand: HandId,
        offset: Isometry3<f32>,
    },
    /// Stop following any hand; the container keeps its current world pose
    Detach,
    ShowScaleIndicators,
    HideScaleIndicators,
    EnableGuideLine,
    DisableGuideLine,
    SetScale(Vector3f),
}

/// Outcome of one [`evaluate`] call
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: ManipulationState,
    pub effects: Vec<ManipulationEffect>,
}

impl Transition {
    pub fn changed_from(&self, previous: &ManipulationState) -> bool {
        self.state.kind() != previous.kind()
    }
}

/// Distance between the two scale indicators
pub fn grab_distance(hands: &HandPoses, config: &ManipulationConfig) -> f32 {
    distance(
        &hands.anchor(HandId::Left, &config.indicator_offset),
        &hands.anchor(HandId::Right, &config.indicator_offset),
    )
}

/// Hand that grabs when a move starts. Hands are considered left then right
/// and each qualifying hand replaces the previous choice, so on an exact tie
/// the right hand wins.
pub fn select_grab_hand(held: HeldTriggers) -> Option<HandId> {
    HandId::ORDER
        .into_iter()
        .filter(|&hand| held.get(hand))
        .last()
}

/// Compute the next state and the effects that realise it
pub fn evaluate(
    previous: &ManipulationState,
    held: HeldTriggers,
    hands: &HandPoses,
    container: &Container,
    config: &ManipulationConfig,
) -> Transition {
    let mut state = *previous;
    let mut effects = Vec::new();
    let mut left_scaling = false;

    if state.is_scaling() && !held.both() {
        state = ManipulationState::Idle;
        effects.push(ManipulationEffect::HideScaleIndicators);
        effects.push(ManipulationEffect::DisableGuideLine);
        left_scaling = true;
    }

    if !state.is_scaling() && held.both() {
        if state.is_moving() {
            effects.push(ManipulationEffect::Detach);
        }
        state = ManipulationState::Scaling {
            initial_grab_distance: grab_distance(hands, config),
            initial_scale: container.scale,
        };
        effects.push(ManipulationEffect::ShowScaleIndicators);
        effects.push(ManipulationEffect::EnableGuideLine);
    }

    if state.is_idle() && (!left_scaling || config.regrab_on_scale_exit) {
        if let Some(hand) = select_grab_hand(held) {
            let grab_offset = hands.pose(hand).inverse() * container.world_pose();
            state = ManipulationState::Moving { hand, grab_offset };
            effects.push(ManipulationEffect::AttachToHand {
                hand,
                offset: grab_offset,
            });
        }
    }

    if state.is_moving() && !held.any() {
        state = ManipulationState::Idle;
        effects.push(ManipulationEffect::Detach);
    }

    if let ManipulationState::Scaling {
        initial_grab_distance,
        initial_scale,
    } = state
    {
        if initial_grab_distance > config.min_grab_distance {
            let factor = grab_distance(hands, config) / initial_grab_distance;
            // Only the x component of the starting scale is used, so a
            // non-uniform scale becomes uniform once a scaling gesture runs.
            effects.push(ManipulationEffect::SetScale(Vector3f::repeat(
                initial_scale.x * factor,
            )));
        }
    }

    Transition { state, effects }
}
