//! Combining per-point stamps into vertex-budgeted chunks
//!
//! Every point becomes one copy of the stamp geometry, translated to
//! `point - center_offset`. Copies are appended to an open chunk until the next
//! one would push the chunk over the vertex budget; the chunk is then closed and
//! a new one opened. The last open chunk is closed after the final point, so:
//! - every chunk holds at most `budget` vertices
//! - there are exactly `ceil(N / floor(budget / V_stamp))` chunks, none empty
//! - chunks and the placements inside them follow input order

use crate::chunk::{ChunkVertex, Material, MeshChunk};
use crate::stamp::StampGeometry;
use scatterplot_core::{Error, Point3f, Result, Transform3D, Vector3f};
use std::sync::Arc;
use tracing::{debug, info};

/// Per-chunk vertex ceiling; stays below the 65 535 limit of 16-bit indices
pub const VERTEX_BUDGET: usize = 65_000;

/// Offset subtracted from every point. Points are expected in the unit cube,
/// so this centres the cloud on the container origin.
pub fn default_center_offset() -> Vector3f {
    Vector3f::new(0.5, 0.5, 0.5)
}

/// Builds mesh chunks from a point sequence
#[derive(Debug, Clone)]
pub struct MeshBatcher {
    stamp: StampGeometry,
    material: Arc<Material>,
    budget: usize,
    center_offset: Vector3f,
}

impl MeshBatcher {
    /// Batcher with the default budget, material and centre offset
    pub fn new(stamp: StampGeometry) -> Self {
        Self {
            stamp,
            material: Arc::new(Material::default()),
            budget: VERTEX_BUDGET,
            center_offset: default_center_offset(),
        }
    }

    pub fn with_budget(mut self, budget: usize) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_material(mut self, material: Arc<Material>) -> Self {
        self.material = material;
        self
    }

    pub fn with_center_offset(mut self, offset: Vector3f) -> Self {
        self.center_offset = offset;
        self
    }

    pub fn stamp(&self) -> &StampGeometry {
        &self.stamp
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Check that at least one stamp fits in a chunk
    pub fn validate(&self) -> Result<()> {
        let stamp_vertices = self.stamp.vertex_count();
        if stamp_vertices == 0 {
            return Err(Error::Configuration(
                "stamp geometry has no vertices; nothing can be drawn per point".to_string(),
            ));
        }
        if self.budget < stamp_vertices {
            return Err(Error::Configuration(format!(
                "vertex budget {} is smaller than one stamp ({} vertices); raise the budget \
                 or use a simpler stamp",
                self.budget, stamp_vertices
            )));
        }
        if u32::try_from(self.budget).is_err() {
            return Err(Error::Configuration(format!(
                "vertex budget {} exceeds the 32-bit index range",
                self.budget
            )));
        }
        Ok(())
    }

    /// Number of points that fit in one chunk, `floor(budget / V_stamp)`
    pub fn capacity_per_chunk(&self) -> Result<usize> {
        self.validate()?;
        Ok(self.budget / self.stamp.vertex_count())
    }

    /// Number of chunks `batch` produces for `point_count` points
    pub fn expected_chunk_count(&self, point_count: usize) -> Result<usize> {
        Ok(point_count.div_ceil(self.capacity_per_chunk()?))
    }

    /// Combine one stamp per point into chunks.
    ///
    /// Fails with [`Error::Configuration`] before doing any work if a single
    /// stamp does not fit in the budget.
    #[tracing::instrument(skip_all, fields(points = points.len(), budget = self.budget))]
    pub fn batch(&self, points: &[Point3f]) -> Result<Vec<MeshChunk>> {
        let capacity = self.capacity_per_chunk()?;
        let stamp_vertices = self.stamp.vertex_count();

        let mut chunks = Vec::with_capacity(points.len().div_ceil(capacity));
        let mut pending = PendingChunk::with_capacity(capacity.min(points.len()), &self.stamp);

        for point in points {
            if pending.vertex_count() + stamp_vertices > self.budget {
                chunks.push(self.flush(&mut pending, chunks.len()));
            }
            pending.place(&self.stamp, point, &self.center_offset);
        }
        if !pending.is_empty() {
            chunks.push(self.flush(&mut pending, chunks.len()));
        }

        info!(chunks = chunks.len(), "batched point stamps");
        Ok(chunks)
    }

    fn flush(&self, pending: &mut PendingChunk, index: usize) -> MeshChunk {
        debug!(
            chunk = index,
            placements = pending.placements.len(),
            vertices = pending.vertices.len(),
            "closing mesh chunk"
        );
        let next = PendingChunk::with_capacity(pending.placements.len(), &self.stamp);
        let full = std::mem::replace(pending, next);
        full.finish(Arc::clone(&self.material))
    }
}

/// Combine `points` with the default material and centre offset
pub fn batch(points: &[Point3f], stamp: &StampGeometry, budget: usize) -> Result<Vec<MeshChunk>> {
    MeshBatcher::new(stamp.clone()).with_budget(budget).batch(points)
}

/// The chunk currently being filled
struct PendingChunk {
    vertices: Vec<ChunkVertex>,
    indices: Vec<u32>,
    placements: Vec<Point3f>,
}

impl PendingChunk {
    fn with_capacity(placements: usize, stamp: &StampGeometry) -> Self {
        Self {
            vertices: Vec::with_capacity(placements * stamp.vertices.len()),
            indices: Vec::with_capacity(placements * stamp.indices.len()),
            placements: Vec::with_capacity(placements),
        }
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    fn place(&mut self, stamp: &StampGeometry, point: &Point3f, center_offset: &Vector3f) {
        // Bounded by the validated budget, which fits in u32
        let base = self.vertices.len() as u32;
        let placement = Transform3D::translation(point.coords - center_offset);

        self.vertices.extend(stamp.vertices.iter().map(|v| {
            let p = placement.transform_point(&Point3f::from(v.position));
            ChunkVertex::new(p.coords.into(), v.normal)
        }));
        self.indices.extend(stamp.indices.iter().map(|i| base + i));
        self.placements.push(*point);
    }

    fn finish(self, material: Arc<Material>) -> MeshChunk {
        MeshChunk {
            vertices: self.vertices,
            indices: self.indices,
            material,
            transform: Transform3D::identity(),
            placements: self.placements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn points(n: usize) -> Vec<Point3f> {
        (0..n)
            .map(|i| Point3f::new(i as f32, (i * 2) as f32, (i * 3) as f32))
            .collect()
    }

    fn reconstructed(chunks: &[MeshChunk]) -> Vec<Point3f> {
        chunks.iter().flat_map(|c| c.placements.iter().copied()).collect()
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        let chunks = batch(&[], &StampGeometry::cube(1.0), VERTEX_BUDGET).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_single_point_yields_one_chunk() {
        let chunks = batch(&points(1), &StampGeometry::cube(1.0), VERTEX_BUDGET).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].placement_count(), 1);
        assert_eq!(chunks[0].vertex_count(), 24);
    }

    #[test]
    fn test_budget_below_stamp_is_configuration_error() {
        let result = batch(&points(3), &StampGeometry::cube(1.0), 23);
        match result {
            Err(Error::Configuration(msg)) => assert!(msg.contains("23")),
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_stamp_is_configuration_error() {
        let stamp = StampGeometry {
            vertices: Vec::new(),
            indices: Vec::new(),
        };
        assert!(matches!(batch(&points(1), &stamp, 100), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_one_placement_per_chunk_when_budget_fits_one_stamp() {
        let pts = vec![
            Point3f::new(1.0, 1.0, 1.0),
            Point3f::new(2.0, 2.0, 2.0),
            Point3f::new(3.0, 3.0, 3.0),
        ];
        let chunks = batch(&pts, &StampGeometry::cube(0.005), 30).unwrap();
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.placement_count() == 1 && c.vertex_count() <= 30));
        assert_eq!(reconstructed(&chunks), pts);
    }

    #[test]
    fn test_exactly_divisible_input_has_no_trailing_chunk() {
        // 4 stamps per chunk, 12 points
        let chunks = batch(&points(12), &StampGeometry::cube(1.0), 96).unwrap();
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.placement_count() == 4 && c.vertex_count() == 96));
    }

    #[test]
    fn test_remainder_goes_to_last_chunk() {
        let chunks = batch(&points(10), &StampGeometry::cube(1.0), 100).unwrap();
        let sizes: Vec<usize> = chunks.iter().map(MeshChunk::placement_count).collect();
        assert_eq!(sizes, vec![4, 4, 2]);
    }

    #[test]
    fn test_chunk_count_and_budget_hold_for_random_sizes() {
        let mut rng = StdRng::seed_from_u64(7);
        let stamp = StampGeometry::cube(0.01);
        for _ in 0..200 {
            let n = rng.gen_range(0..400);
            let budget = rng.gen_range(24..600);
            let pts = points(n);
            let chunks = batch(&pts, &stamp, budget).unwrap();

            let per_chunk = budget / 24;
            assert_eq!(chunks.len(), n.div_ceil(per_chunk), "n={} budget={}", n, budget);
            assert!(chunks.iter().all(|c| c.vertex_count() <= budget));
            assert!(chunks.iter().all(|c| c.placement_count() > 0));
            assert_eq!(reconstructed(&chunks), pts);
        }
    }

    #[test]
    fn test_vertices_are_translated_by_centered_point() {
        let stamp = StampGeometry::cube(0.2);
        let chunks = batch(&[Point3f::new(1.0, 0.5, 0.0)], &stamp, VERTEX_BUDGET).unwrap();
        let chunk = &chunks[0];
        for (placed, original) in chunk.vertices.iter().zip(&stamp.vertices) {
            assert_relative_eq!(placed.position[0], original.position[0] + 0.5);
            assert_relative_eq!(placed.position[1], original.position[1]);
            assert_relative_eq!(placed.position[2], original.position[2] - 0.5);
            assert_eq!(placed.normal, original.normal);
        }
        assert!(chunk.transform.is_identity(1e-6));
    }

    #[test]
    fn test_indices_are_rebased_per_placement() {
        let chunks = batch(&points(2), &StampGeometry::cube(1.0), VERTEX_BUDGET).unwrap();
        let chunk = &chunks[0];
        assert_eq!(chunk.indices.len(), 72);
        assert!(chunk.indices[..36].iter().all(|&i| i < 24));
        assert!(chunk.indices[36..].iter().all(|&i| (24..48).contains(&i)));
        assert!(chunk.indices_u16().is_some());
    }

    #[test]
    fn test_custom_offset_and_material_are_shared() {
        let material = Arc::new(Material::new("blue", [0.0, 0.0, 1.0, 1.0]));
        let batcher = MeshBatcher::new(StampGeometry::cube(1.0))
            .with_budget(48)
            .with_material(Arc::clone(&material))
            .with_center_offset(Vector3f::zeros());
        let chunks = batcher.batch(&points(5)).unwrap();
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| Arc::ptr_eq(&c.material, &material)));
        assert_eq!(batcher.expected_chunk_count(5).unwrap(), 3);
    }

    #[test]
    fn test_batching_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(42);
        let pts: Vec<Point3f> = (0..1000)
            .map(|_| Point3f::new(rng.gen(), rng.gen(), rng.gen()))
            .collect();
        let batcher = MeshBatcher::new(StampGeometry::cube(0.005)).with_budget(2400);
        let first = batcher.batch(&pts).unwrap();
        let second = batcher.batch(&pts).unwrap();
        assert_eq!(first.len(), second.len());
        assert!(first.iter().zip(&second).all(|(a, b)| a.same_content(b)));
    }

    #[test]
    fn test_default_budget_chunk_size() {
        let batcher = MeshBatcher::new(StampGeometry::cube(0.005));
        assert_eq!(batcher.capacity_per_chunk().unwrap(), 2708);
        let chunks = batcher.batch(&points(2709)).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].vertex_count(), 2708 * 24);
        assert!(chunks[0].vertex_count() <= VERTEX_BUDGET);
    }
}
