//! # Scatterplot Mesh
//!
//! Turns a point sequence into a small number of combined meshes. Each point
//! is drawn as a copy of one stamp shape (a cube by default) and copies are
//! packed into chunks that never exceed a per-chunk vertex budget.
//!
//! ```rust
//! use scatterplot_core::Point3f;
//! use scatterplot_mesh::{MeshBatcher, StampGeometry};
//!
//! let points = vec![Point3f::new(0.1, 0.2, 0.3), Point3f::new(0.9, 0.8, 0.7)];
//! let chunks = MeshBatcher::new(StampGeometry::cube(0.005)).batch(&points).unwrap();
//! assert_eq!(chunks.len(), 1);
//! assert_eq!(chunks[0].vertex_count(), 48);
//! ```

pub mod batcher;
pub mod chunk;
pub mod stamp;

pub use batcher::*;
pub use chunk::*;
pub use stamp::*;
