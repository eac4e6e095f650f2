//! Core traits

use crate::{mesh::TriangleMesh, point::*, point_cloud::PointCloud};

/// Trait for objects with a spatial extent
pub trait Drawable {
    /// Axis-aligned bounding box as `(min, max)`; both are the origin when empty
    fn bounding_box(&self) -> (Point3f, Point3f);

    /// Get the center point of the object
    fn center(&self) -> Point3f {
        let (min, max) = self.bounding_box();
        nalgebra::center(&min, &max)
    }

    /// Edge lengths of the bounding box
    fn extent(&self) -> Vector3f {
        let (min, max) = self.bounding_box();
        max - min
    }
}

fn bounds_of<'a>(mut points: impl Iterator<Item = &'a Point3f>) -> (Point3f, Point3f) {
    let Some(first) = points.next() else {
        return (Point3f::origin(), Point3f::origin());
    };
    points.fold((*first, *first), |(min, max), p| (min.inf(p), max.sup(p)))
}

impl Drawable for PointCloud<Point3f> {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        bounds_of(self.iter())
    }
}

impl Drawable for TriangleMesh {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        bounds_of(self.vertices.iter())
    }
}
