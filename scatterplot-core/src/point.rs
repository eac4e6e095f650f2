//! Point types and related functionality

use nalgebra::{Point3, Vector3};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// The point recorded in place of an unreadable data row.
pub const SENTINEL_POINT: Point3f = Point3f::new(0.0, 0.0, 0.0);

/// Euclidean distance between two points
pub fn distance(a: &Point3f, b: &Point3f) -> f32 {
    nalgebra::distance(a, b)
}
