//! Stamp geometry: the shape drawn at every data point

use crate::chunk::ChunkVertex;
use scatterplot_core::{Error, Result, TriangleMesh, Vector3f};

/// A small vertex/index buffer copied once per placed point
#[derive(Debug, Clone, PartialEq)]
pub struct StampGeometry {
    pub vertices: Vec<ChunkVertex>,
    pub indices: Vec<u32>,
}

impl StampGeometry {
    /// Axis-aligned cube centred on the origin with flat-shaded faces.
    ///
    /// Each face owns its four corners so normals stay sharp, giving 24
    /// vertices and 12 triangles.
    pub fn cube(edge: f32) -> Self {
        let h = edge * 0.5;
        // (normal, u, v) with u x v == normal so the winding faces outwards
        let faces = [
            (Vector3f::x(), Vector3f::y(), Vector3f::z()),
            (-Vector3f::x(), Vector3f::z(), Vector3f::y()),
            (Vector3f::y(), Vector3f::z(), Vector3f::x()),
            (-Vector3f::y(), Vector3f::x(), Vector3f::z()),
            (Vector3f::z(), Vector3f::x(), Vector3f::y()),
            (-Vector3f::z(), Vector3f::y(), Vector3f::x()),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (normal, u, v) in faces {
            let base = vertices.len() as u32;
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                let position = (normal + u * su + v * sv) * h;
                vertices.push(ChunkVertex::new(position.into(), normal.into()));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self { vertices, indices }
    }

    /// Build a stamp from an arbitrary mesh. Missing normals are averaged from
    /// the adjacent faces.
    pub fn from_mesh(mesh: &TriangleMesh) -> Result<Self> {
        if !mesh.has_valid_indices() {
            return Err(Error::InvalidData(
                "stamp mesh has face indices outside its vertex list".to_string(),
            ));
        }

        let normals = match &mesh.normals {
            Some(normals) => normals.clone(),
            None => {
                let mut acc = vec![Vector3f::zeros(); mesh.vertex_count()];
                for (face, n) in mesh.faces.iter().zip(mesh.calculate_face_normals()) {
                    if n.iter().all(|c| c.is_finite()) {
                        for &i in face {
                            acc[i] += n;
                        }
                    }
                }
                acc.into_iter()
                    .map(|n| n.try_normalize(f32::EPSILON).unwrap_or(n))
                    .collect()
            }
        };
        if normals.len() != mesh.vertex_count() {
            return Err(Error::InvalidData(format!(
                "stamp mesh has {} normals for {} vertices",
                normals.len(),
                mesh.vertex_count()
            )));
        }

        let vertices = mesh
            .vertices
            .iter()
            .zip(&normals)
            .map(|(p, n)| ChunkVertex::new(p.coords.into(), (*n).into()))
            .collect();
        let indices = mesh
            .faces
            .iter()
            .flatten()
            .map(|&i| {
                u32::try_from(i).map_err(|_| {
                    Error::InvalidData(format!("stamp index {} does not fit in 32 bits", i))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { vertices, indices })
    }

    /// `V_stamp`: vertices added to a chunk per placed point
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
