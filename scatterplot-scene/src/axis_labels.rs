//! Placement of the axis name labels around the plot box
//!
//! Each axis gets eight labels along the four box edges parallel to it, two
//! per edge facing opposite ways so a name is readable from any side. Only
//! position and orientation are produced; drawing the text is up to the host.

use nalgebra::{Unit, UnitQuaternion};
use scatterplot_core::{Point3f, Vector3f};

pub const LABELS_PER_AXIS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// One placed label in container space
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub axis: Axis,
    pub text: String,
    pub position: Point3f,
    /// Euler angles in degrees, applied about z, then x, then y
    pub euler_degrees: Vector3f,
    pub rotation: UnitQuaternion<f32>,
}

/// Rotation for Euler angles in degrees applied about z, then x, then y
pub fn euler_zxy(degrees: &Vector3f) -> UnitQuaternion<f32> {
    let about = |axis: Unit<Vector3f>, angle: f32| {
        UnitQuaternion::from_axis_angle(&axis, angle.to_radians())
    };
    about(Vector3f::y_axis(), degrees.y)
        * about(Vector3f::x_axis(), degrees.x)
        * about(Vector3f::z_axis(), degrees.z)
}

// (axis, edge corner as signs of the half extents, euler degrees)
const LAYOUT: [(Axis, [f32; 3], [f32; 3]); 3 * LABELS_PER_AXIS] = [
    (Axis::X, [0.0, -1.0, -1.0], [0.0, 0.0, 0.0]),
    (Axis::X, [0.0, 1.0, -1.0], [0.0, 0.0, 180.0]),
    (Axis::X, [0.0, -1.0, 1.0], [0.0, 180.0, 0.0]),
    (Axis::X, [0.0, 1.0, 1.0], [180.0, 0.0, 0.0]),
    (Axis::X, [0.0, -1.0, -1.0], [270.0, 180.0, 0.0]),
    (Axis::X, [0.0, 1.0, -1.0], [90.0, 180.0, 180.0]),
    (Axis::X, [0.0, -1.0, 1.0], [270.0, 0.0, 0.0]),
    (Axis::X, [0.0, 1.0, 1.0], [90.0, 180.0, 0.0]),
    (Axis::Y, [-1.0, 0.0, -1.0], [0.0, 0.0, 270.0]),
    (Axis::Y, [1.0, 0.0, -1.0], [0.0, 0.0, 90.0]),
    (Axis::Y, [-1.0, 0.0, 1.0], [0.0, 180.0, 90.0]),
    (Axis::Y, [1.0, 0.0, 1.0], [180.0, 0.0, 90.0]),
    (Axis::Y, [-1.0, 0.0, -1.0], [0.0, 90.0, 90.0]),
    (Axis::Y, [-1.0, 0.0, 1.0], [180.0, 270.0, 90.0]),
    (Axis::Y, [1.0, 0.0, -1.0], [180.0, 90.0, 90.0]),
    (Axis::Y, [1.0, 0.0, 1.0], [0.0, 270.0, 90.0]),
    (Axis::Z, [-1.0, 1.0, 0.0], [180.0, 270.0, 0.0]),
    (Axis::Z, [-1.0, -1.0, 0.0], [0.0, 90.0, 0.0]),
    (Axis::Z, [1.0, 1.0, 0.0], [0.0, 270.0, 180.0]),
    (Axis::Z, [1.0, -1.0, 0.0], [0.0, 270.0, 0.0]),
    (Axis::Z, [-1.0, 1.0, 0.0], [90.0, 90.0, 0.0]),
    (Axis::Z, [-1.0, -1.0, 0.0], [270.0, 270.0, 0.0]),
    (Axis::Z, [1.0, 1.0, 0.0], [90.0, 0.0, 90.0]),
    (Axis::Z, [1.0, -1.0, 0.0], [270.0, 90.0, 0.0]),
];

/// Place all labels for a box with the given half extents
pub fn layout_axis_labels(names: &[String; 3], half_extents: &Vector3f) -> Vec<AxisLabel> {
    LAYOUT
        .iter()
        .map(|(axis, corner, euler)| {
            let euler_degrees = Vector3f::from(*euler);
            AxisLabel {
                axis: *axis,
                text: names[axis.index()].clone(),
                position: Point3f::from(Vector3f::from(*corner).component_mul(half_extents)),
                rotation: euler_zxy(&euler_degrees),
                euler_degrees,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    fn names() -> [String; 3] {
        ["a", "b", "c"].map(String::from)
    }

    #[test]
    fn test_eight_labels_per_axis() {
        let labels = layout_axis_labels(&names(), &Vector3f::repeat(0.5));
        assert_eq!(labels.len(), 24);
        for axis in Axis::ALL {
            let on_axis: Vec<_> = labels.iter().filter(|l| l.axis == axis).collect();
            assert_eq!(on_axis.len(), LABELS_PER_AXIS);
            assert!(on_axis.iter().all(|l| l.text == names()[axis.index()]));
            // Labels sit on edges parallel to their axis
            assert!(on_axis.iter().all(|l| l.position[axis.index()] == 0.0));
        }
    }

    #[test]
    fn test_positions_scale_with_extents() {
        let labels = layout_axis_labels(&names(), &Vector3f::new(1.0, 2.0, 3.0));
        assert_eq!(labels[0].position, Point3f::new(0.0, -2.0, -3.0));
        assert_eq!(labels[9].position, Point3f::new(1.0, 0.0, -3.0));
        assert_eq!(labels[23].position, Point3f::new(1.0, -2.0, 0.0));
    }

    #[test]
    fn test_euler_order_is_z_then_x_then_y() {
        let q = euler_zxy(&Vector3f::new(90.0, 90.0, 0.0));
        // x first takes +y to +z, then y takes +z to +x
        assert_relative_eq!(q * Vector3f::y(), Vector3f::x(), epsilon = 1e-6);

        let q = euler_zxy(&Vector3f::new(0.0, 90.0, 0.0));
        assert_relative_eq!(q * Vector3f::z(), Vector3f::x(), epsilon = 1e-6);
    }

    #[test]
    fn test_flipped_label_matches_two_half_turns() {
        // Half turn about y followed by a half turn about the label's own z
        let composed = UnitQuaternion::from_axis_angle(&Vector3f::y_axis(), PI)
            * UnitQuaternion::from_axis_angle(&Vector3f::z_axis(), PI);
        let labels = layout_axis_labels(&names(), &Vector3f::repeat(0.5));
        assert_relative_eq!(
            labels[3].rotation.to_rotation_matrix(),
            composed.to_rotation_matrix(),
            epsilon = 1e-6
        );
    }
}
