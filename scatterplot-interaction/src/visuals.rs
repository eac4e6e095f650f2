//! Scale indicators and the guide line drawn between them

use crate::hands::{HandId, HandPoses};
use scatterplot_core::{Point3f, Vector3f};

/// Edge length of an indicator marker
pub const INDICATOR_SIZE: f32 = 0.01;
/// Width of the guide line at both ends
pub const GUIDE_LINE_WIDTH: f32 = 0.01;
/// Translucent blue
pub const GUIDE_LINE_COLOR: [f32; 4] = [0.0, 0.0, 1.0, 0.2];

/// Marker fixed to one controller while a scaling gesture runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleIndicator {
    pub hand: HandId,
    pub position: Point3f,
    pub visible: bool,
}

/// Line segment between the two indicators
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideLine {
    pub enabled: bool,
    pub start: Point3f,
    pub end: Point3f,
}

/// Visual feedback for the scaling gesture
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleVisuals {
    pub indicators: [ScaleIndicator; 2],
    pub line: GuideLine,
    offset: Vector3f,
}

impl ScaleVisuals {
    /// Hidden indicators placed at `offset` in each controller's frame
    pub fn new(offset: Vector3f) -> Self {
        let hidden = |hand| ScaleIndicator {
            hand,
            position: Point3f::origin(),
            visible: false,
        };
        Self {
            indicators: [hidden(HandId::Left), hidden(HandId::Right)],
            line: GuideLine {
                enabled: false,
                start: Point3f::origin(),
                end: Point3f::origin(),
            },
            offset,
        }
    }

    pub fn indicator(&self, hand: HandId) -> &ScaleIndicator {
        match hand {
            HandId::Left => &self.indicators[0],
            HandId::Right => &self.indicators[1],
        }
    }

    pub fn set_indicators_visible(&mut self, visible: bool) {
        for indicator in &mut self.indicators {
            indicator.visible = visible;
        }
    }

    pub fn set_line_enabled(&mut self, enabled: bool) {
        self.line.enabled = enabled;
    }

    /// Move the indicators with their controllers
    pub fn follow(&mut self, hands: &HandPoses) {
        for indicator in &mut self.indicators {
            indicator.position = hands.anchor(indicator.hand, &self.offset);
        }
    }

    /// Stretch the line between the indicators; nothing changes while the
    /// line is disabled or either indicator is hidden.
    pub fn refresh_line(&mut self) {
        let [left, right] = &self.indicators;
        if left.visible && right.visible && self.line.enabled {
            self.line.start = left.position;
            self.line.end = right.position;
        }
    }

    /// Whether anything should be drawn
    pub fn is_active(&self) -> bool {
        self.line.enabled || self.indicators.iter().any(|i| i.visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hands::HandSample;

    fn poses(left: Point3f, right: Point3f) -> HandPoses {
        HandPoses {
            left: HandSample::at(left).pose,
            right: HandSample::at(right).pose,
        }
    }

    #[test]
    fn test_line_tracks_visible_indicators() {
        let mut visuals = ScaleVisuals::new(Vector3f::zeros());
        visuals.set_indicators_visible(true);
        visuals.set_line_enabled(true);
        visuals.follow(&poses(Point3f::new(-1.0, 0.0, 0.0), Point3f::new(1.0, 0.0, 0.0)));
        visuals.refresh_line();
        assert_eq!(visuals.line.start, Point3f::new(-1.0, 0.0, 0.0));
        assert_eq!(visuals.line.end, Point3f::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_hidden_line_is_not_updated() {
        let mut visuals = ScaleVisuals::new(Vector3f::zeros());
        visuals.follow(&poses(Point3f::new(-1.0, 0.0, 0.0), Point3f::new(1.0, 0.0, 0.0)));
        visuals.refresh_line();
        assert_eq!(visuals.line.start, Point3f::origin());
        assert!(!visuals.is_active());
        assert_eq!(visuals.indicator(HandId::Right).position, Point3f::new(1.0, 0.0, 0.0));
    }
}
