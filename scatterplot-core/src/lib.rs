//! Core data structures for the scatterplot crates
//!
//! This crate provides the shared vocabulary of the workspace: points and
//! point clouds, triangle meshes, affine transforms and the common error type.

pub mod point;
pub mod point_cloud;
pub mod mesh;
pub mod traits;
pub mod transform;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use mesh::*;
pub use traits::*;
pub use transform::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Isometry3, Matrix4, Point3, Translation3, UnitQuaternion, Vector3};
