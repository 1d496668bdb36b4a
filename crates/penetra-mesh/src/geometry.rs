//! Per-face centroids and normals of an obstacle snapshot.
//!
//! Centroids come from the gather-by-face mean of vertex positions; normals
//! from the edge cross product. Both are index-aligned with the face list.

use penetra_math::{gather_face_mean, gather_face_slots, Vec3};
use penetra_types::constants::DEGENERATE_AREA_THRESHOLD;
use penetra_types::{PenetraError, PenetraResult};
use serde::{Deserialize, Serialize};

use crate::mesh::TriangleMesh;
use crate::normals::{area_weighted_normal, face_normal};

/// What to do with faces whose area is (near) zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateFacePolicy {
    /// Keep the undefined (NaN) normal and let it flow into the penalty.
    #[default]
    Propagate,
    /// Fail with [`PenetraError::DegenerateFace`].
    Reject,
}

/// Per-face centroid and unit normal of one mesh snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceGeometry {
    /// Arithmetic mean of each face's three vertices.
    pub centroids: Vec<Vec3>,
    /// Unit normal of each face (NaN for degenerate faces under `Propagate`).
    pub normals: Vec<Vec3>,
    /// Number of faces whose twice-area fell below the degenerate threshold.
    pub degenerate_count: usize,
}

impl FaceGeometry {
    /// Computes centroids and normals for `faces` over `positions`.
    ///
    /// An empty face list or an out-of-range index fails with `InvalidMesh`.
    pub fn compute(
        positions: &[Vec3],
        faces: &[[u32; 3]],
        policy: DegenerateFacePolicy,
    ) -> PenetraResult<Self> {
        if faces.is_empty() {
            return Err(PenetraError::InvalidMesh("Mesh has no faces".into()));
        }

        let centroids = gather_face_mean(positions, faces)?;
        let corners = gather_face_slots(positions, faces)?;

        let mut normals = Vec::with_capacity(faces.len());
        let mut degenerate_count = 0;
        for (f, [a, b, c]) in corners.into_iter().enumerate() {
            let area2 = area_weighted_normal(a, b, c).length();
            if area2.is_nan() || area2 < DEGENERATE_AREA_THRESHOLD {
                if policy == DegenerateFacePolicy::Reject {
                    return Err(PenetraError::DegenerateFace {
                        face: f as u32,
                        area2,
                    });
                }
                degenerate_count += 1;
            }
            normals.push(face_normal(a, b, c));
        }

        if degenerate_count > 0 {
            tracing::warn!(
                degenerate_count,
                face_count = faces.len(),
                "degenerate faces produce undefined normals"
            );
        }

        Ok(Self {
            centroids,
            normals,
            degenerate_count,
        })
    }

    /// Computes face geometry for a whole mesh snapshot.
    pub fn from_mesh(mesh: &TriangleMesh, policy: DegenerateFacePolicy) -> PenetraResult<Self> {
        mesh.validate()?;
        Self::compute(&mesh.positions(), &mesh.faces(), policy)
    }

    /// Number of faces.
    #[inline]
    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }
}

/// Centroids and unit normals for `faces`, propagating degenerate normals.
pub fn centroids_and_normals(
    positions: &[Vec3],
    faces: &[[u32; 3]],
) -> PenetraResult<(Vec<Vec3>, Vec<Vec3>)> {
    let geometry = FaceGeometry::compute(positions, faces, DegenerateFacePolicy::Propagate)?;
    Ok((geometry.centroids, geometry.normals))
}
