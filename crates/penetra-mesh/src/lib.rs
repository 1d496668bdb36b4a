//! # penetra-mesh
//!
//! Triangle mesh snapshots with Structure-of-Arrays (SoA) layout and the
//! per-face geometry the collision penalty is measured against.
//!
//! ## Key Types
//!
//! - [`TriangleMesh`]: Vertex positions in contiguous SoA buffers plus
//!   flat triangle indices.
//! - [`FaceGeometry`]: Per-face centroids and unit normals.
//! - Procedural generators for test and benchmark meshes (grids, UV spheres).

pub mod generators;
pub mod geometry;
pub mod mesh;
pub mod normals;

pub use geometry::{centroids_and_normals, DegenerateFacePolicy, FaceGeometry};
pub use mesh::TriangleMesh;
