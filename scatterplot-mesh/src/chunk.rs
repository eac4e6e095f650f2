//! Renderer-ready combined meshes

use bytemuck::{Pod, Zeroable};
use scatterplot_core::{Point3f, Transform3D};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Interleaved vertex layout of a mesh chunk
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ChunkVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl ChunkVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }
}

/// Surface description shared by every chunk of a visualization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    /// Linear RGBA
    pub color: [f32; 4],
}

impl Material {
    pub fn new(name: impl Into<String>, color: [f32; 4]) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new("datapoint", [1.0, 1.0, 1.0, 1.0])
    }
}

/// One combined mesh holding the stamps of a contiguous run of points.
///
/// Vertices are already in container space, so `transform` is the identity.
#[derive(Debug, Clone)]
pub struct MeshChunk {
    pub vertices: Vec<ChunkVertex>,
    pub indices: Vec<u32>,
    pub material: Arc<Material>,
    pub transform: Transform3D,
    /// Source points of this chunk, in input order
    pub placements: Vec<Point3f>,
}

impl MeshChunk {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn placement_count(&self) -> usize {
        self.placements.len()
    }

    /// Index buffer narrowed to 16 bits, when every index fits
    pub fn indices_u16(&self) -> Option<Vec<u16>> {
        self.indices.iter().map(|&i| u16::try_from(i).ok()).collect()
    }

    /// Raw vertex buffer contents for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw 32-bit index buffer contents for upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Whether the chunk content (geometry, placements and material) matches
    /// another chunk bit for bit
    pub fn same_content(&self, other: &MeshChunk) -> bool {
        self.vertex_bytes() == other.vertex_bytes()
            && self.indices == other.indices
            && self.material == other.material
            && self.transform == other.transform
            && self.placements == other.placements
    }
}
