//! Core triangle mesh type with SoA (Structure of Arrays) layout.
//!
//! The SoA layout stores each coordinate channel contiguously:
//! - `pos_x: [x0, x1, x2, ...]`
//! - `pos_y: [y0, y1, y2, ...]`
//! - `pos_z: [z0, z1, z2, ...]`
//!
//! A mesh is an immutable snapshot of one time instant. Obstacles carry two
//! snapshots (current and target) that share the same `indices`.

use penetra_math::Vec3;
use penetra_types::{PenetraError, PenetraResult};
use serde::{Deserialize, Serialize};

/// A triangle mesh snapshot stored in Structure-of-Arrays layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// X coordinates of all vertices.
    pub pos_x: Vec<f32>,
    /// Y coordinates of all vertices.
    pub pos_y: Vec<f32>,
    /// Z coordinates of all vertices.
    pub pos_z: Vec<f32>,

    /// Triangle indices: each triangle is [v0, v1, v2].
    /// Stored flat: `[t0v0, t0v1, t0v2, t1v0, t1v1, t1v2, ...]`
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the position as a `glam::Vec3`.
    #[inline]
    pub fn position_vec3(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    /// All vertex positions gathered into AoS form.
    pub fn positions(&self) -> Vec<Vec3> {
        (0..self.vertex_count()).map(|i| self.position_vec3(i)).collect()
    }

    /// All faces as index triples.
    pub fn faces(&self) -> Vec<[u32; 3]> {
        self.indices
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
            .collect()
    }

    /// Creates an empty mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_capacity: usize, triangle_capacity: usize) -> Self {
        Self {
            pos_x: Vec::with_capacity(vertex_capacity),
            pos_y: Vec::with_capacity(vertex_capacity),
            pos_z: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(triangle_capacity * 3),
        }
    }

    /// Builds a mesh from AoS positions and flat indices, then validates it.
    pub fn from_positions(positions: &[Vec3], indices: &[u32]) -> PenetraResult<Self> {
        let mut mesh = Self::with_capacity(positions.len(), indices.len() / 3);
        for p in positions {
            mesh.pos_x.push(p.x);
            mesh.pos_y.push(p.y);
            mesh.pos_z.push(p.z);
        }
        mesh.indices = indices.to_vec();
        mesh.validate()?;
        Ok(mesh)
    }

    /// Constructs a mesh from interleaved AoS position data.
    ///
    /// Converts `[x0, y0, z0, x1, y1, z1, ...]` to SoA layout.
    pub fn from_interleaved(positions: &[f32], indices: &[u32]) -> PenetraResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(PenetraError::InvalidMesh(
                "Interleaved positions length not divisible by 3".into(),
            ));
        }

        let n = positions.len() / 3;
        let mut mesh = Self::with_capacity(n, indices.len() / 3);
        for p in positions.chunks_exact(3) {
            mesh.pos_x.push(p[0]);
            mesh.pos_y.push(p[1]);
            mesh.pos_z.push(p[2]);
        }
        mesh.indices = indices.to_vec();

        mesh.validate()?;
        Ok(mesh)
    }

    /// Returns a snapshot with the same connectivity and new positions.
    ///
    /// Used to derive the target (next-step) snapshot of an obstacle.
    pub fn with_positions(&self, positions: &[Vec3]) -> PenetraResult<Self> {
        if positions.len() != self.vertex_count() {
            return Err(PenetraError::shape_mismatch(
                "snapshot vertex count",
                self.vertex_count(),
                positions.len(),
            ));
        }
        Self::from_positions(positions, &self.indices)
    }

    /// Returns a copy of this mesh rigidly translated by `offset`.
    pub fn translated(&self, offset: Vec3) -> Self {
        let mut out = self.clone();
        out.pos_x.iter_mut().for_each(|x| *x += offset.x);
        out.pos_y.iter_mut().for_each(|y| *y += offset.y);
        out.pos_z.iter_mut().for_each(|z| *z += offset.z);
        out
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - All SoA arrays have the same length
    /// - Index count is a multiple of 3 and at least one face exists
    /// - Triangle indices are within bounds
    ///
    /// Zero-area faces are not rejected here; see [`crate::DegenerateFacePolicy`].
    pub fn validate(&self) -> PenetraResult<()> {
        let n = self.pos_x.len();

        if self.pos_y.len() != n || self.pos_z.len() != n {
            return Err(PenetraError::InvalidMesh(
                "Position arrays have inconsistent lengths".into(),
            ));
        }

        if self.indices.len() % 3 != 0 {
            return Err(PenetraError::InvalidMesh(
                "Index count is not divisible by 3".into(),
            ));
        }

        if self.indices.is_empty() {
            return Err(PenetraError::InvalidMesh("Mesh has no faces".into()));
        }

        for (i, &idx) in self.indices.iter().enumerate() {
            if idx as usize >= n {
                return Err(PenetraError::InvalidMesh(format!(
                    "Index {} at position {} is out of range (vertex count: {})",
                    idx, i, n
                )));
            }
        }

        Ok(())
    }
}
