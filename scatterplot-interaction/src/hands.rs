//! Per-tick controller input and trigger latching

use nalgebra::{Isometry3, Translation3, UnitQuaternion};
use scatterplot_core::{Point3f, Vector3f};
use serde::{Deserialize, Serialize};

/// Which tracked controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandId {
    Left,
    Right,
}

impl HandId {
    /// Evaluation order used when both hands qualify on the same tick
    pub const ORDER: [HandId; 2] = [HandId::Left, HandId::Right];

    pub fn other(self) -> HandId {
        match self {
            HandId::Left => HandId::Right,
            HandId::Right => HandId::Left,
        }
    }
}

/// One controller's state for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandSample {
    pub pose: Isometry3<f32>,
    /// The trigger went down this tick
    pub trigger_down: bool,
    /// The trigger came up this tick
    pub trigger_up: bool,
    /// False while the tracking system has lost the controller
    pub tracked: bool,
}

impl HandSample {
    /// A tracked hand at `position` with no trigger edges
    pub fn at(position: Point3f) -> Self {
        Self::with_pose(Isometry3::from_parts(
            Translation3::from(position.coords),
            UnitQuaternion::identity(),
        ))
    }

    pub fn with_pose(pose: Isometry3<f32>) -> Self {
        Self {
            pose,
            trigger_down: false,
            trigger_up: false,
            tracked: true,
        }
    }

    pub fn pressed(mut self) -> Self {
        self.trigger_down = true;
        self
    }

    pub fn released(mut self) -> Self {
        self.trigger_up = true;
        self
    }

    pub fn untracked(mut self) -> Self {
        self.tracked = false;
        self
    }

    pub fn position(&self) -> Point3f {
        Point3f::from(self.pose.translation.vector)
    }
}

impl Default for HandSample {
    fn default() -> Self {
        Self::with_pose(Isometry3::identity())
    }
}

/// Both controllers sampled on the same tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    pub left: HandSample,
    pub right: HandSample,
}

impl InputSnapshot {
    pub fn new(left: HandSample, right: HandSample) -> Self {
        Self { left, right }
    }

    pub fn hand(&self, hand: HandId) -> &HandSample {
        match hand {
            HandId::Left => &self.left,
            HandId::Right => &self.right,
        }
    }

    /// Both controllers are currently tracked
    pub fn is_tracked(&self) -> bool {
        self.left.tracked && self.right.tracked
    }

    pub fn poses(&self) -> HandPoses {
        HandPoses {
            left: self.left.pose,
            right: self.right.pose,
        }
    }
}

/// The last known pose of each controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandPoses {
    pub left: Isometry3<f32>,
    pub right: Isometry3<f32>,
}

impl HandPoses {
    pub fn pose(&self, hand: HandId) -> &Isometry3<f32> {
        match hand {
            HandId::Left => &self.left,
            HandId::Right => &self.right,
        }
    }

    /// Point fixed to `hand` at `local_offset` in the controller's frame
    pub fn anchor(&self, hand: HandId, local_offset: &Vector3f) -> Point3f {
        self.pose(hand) * Point3f::from(*local_offset)
    }
}

impl Default for HandPoses {
    fn default() -> Self {
        Self {
            left: Isometry3::identity(),
            right: Isometry3::identity(),
        }
    }
}

/// Held flag driven only by trigger edges, so it persists across ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TriggerLatch {
    held: bool,
}

impl TriggerLatch {
    /// Apply this tick's edges. Release is processed before press, so a
    /// release and press on the same tick leave the trigger held.
    pub fn apply(&mut self, sample: &HandSample) {
        if sample.trigger_up {
            self.held = false;
        }
        if sample.trigger_down {
            self.held = true;
        }
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn reset(&mut self) {
        self.held = false;
    }
}

/// Latched trigger state of both hands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldTriggers {
    pub left: bool,
    pub right: bool,
}

impl HeldTriggers {
    pub fn new(left: bool, right: bool) -> Self {
        Self { left, right }
    }

    pub fn get(&self, hand: HandId) -> bool {
        match hand {
            HandId::Left => self.left,
            HandId::Right => self.right,
        }
    }

    pub fn both(&self) -> bool {
        self.left && self.right
    }

    pub fn any(&self) -> bool {
        self.left || self.right
    }
}
