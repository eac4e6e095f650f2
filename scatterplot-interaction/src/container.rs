//! The object that owns the plotted chunks and is moved and scaled by hand

use nalgebra::{Isometry3, Translation3, UnitQuaternion};
use scatterplot_core::{Point3f, Transform3D, Vector3f};
use scatterplot_mesh::MeshChunk;

/// World-space placement of the plot plus the mesh chunks drawn inside it.
///
/// Chunk vertices are in container space; `to_transform` maps them to world.
#[derive(Debug, Clone)]
pub struct Container {
    pub position: Vector3f,
    pub rotation: UnitQuaternion<f32>,
    pub scale: Vector3f,
    chunks: Vec<MeshChunk>,
}

impl Container {
    pub fn new() -> Self {
        Self {
            position: Vector3f::zeros(),
            rotation: UnitQuaternion::identity(),
            scale: Vector3f::repeat(1.0),
            chunks: Vec::new(),
        }
    }

    pub fn with_position(mut self, position: Vector3f) -> Self {
        self.position = position;
        self
    }

    pub fn with_scale(mut self, scale: Vector3f) -> Self {
        self.scale = scale;
        self
    }

    /// Position and orientation, without scale
    pub fn world_pose(&self) -> Isometry3<f32> {
        Isometry3::from_parts(Translation3::from(self.position), self.rotation)
    }

    pub fn set_world_pose(&mut self, pose: &Isometry3<f32>) {
        self.position = pose.translation.vector;
        self.rotation = pose.rotation;
    }

    /// Container-to-world transform
    pub fn to_transform(&self) -> Transform3D {
        Transform3D::from_trs(self.position, self.rotation, self.scale)
    }

    pub fn local_to_world(&self, local: &Point3f) -> Point3f {
        self.to_transform().transform_point(local)
    }

    pub fn chunks(&self) -> &[MeshChunk] {
        &self.chunks
    }

    /// Replace the drawn chunks; the previous ones are dropped
    pub fn set_chunks(&mut self, chunks: Vec<MeshChunk>) {
        self.chunks = chunks;
    }

    pub fn clear_chunks(&mut self) {
        self.chunks.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.chunks.iter().map(MeshChunk::vertex_count).sum()
    }

    pub fn placement_count(&self) -> usize {
        self.chunks.iter().map(MeshChunk::placement_count).sum()
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}
