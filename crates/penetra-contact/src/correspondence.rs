//! Cloth-vertex to obstacle-face correspondence.
//!
//! Built from current-step geometry only, then used to gather next-step
//! centroids and normals. Lives for a single evaluation.

use penetra_math::{gather, Vec3};
use penetra_mesh::FaceGeometry;
use penetra_types::{FaceId, PenetraResult};

use crate::search::NearestFaceSearch;

/// For every cloth vertex, the obstacle face it is measured against.
///
/// Faces are drawn with replacement; many vertices may share one face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correspondence {
    faces: Vec<FaceId>,
}

impl Correspondence {
    /// Matches each cloth vertex to the face with the nearest centroid.
    pub fn find(
        search: &dyn NearestFaceSearch,
        cloth_current: &[Vec3],
        obstacle_current: &FaceGeometry,
    ) -> PenetraResult<Self> {
        let faces = search.nearest(cloth_current, &obstacle_current.centroids)?;
        Ok(Self { faces })
    }

    /// Wraps precomputed face indices.
    pub fn from_faces(faces: Vec<FaceId>) -> Self {
        Self { faces }
    }

    /// Face index per cloth vertex.
    pub fn faces(&self) -> &[FaceId] {
        &self.faces
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Fetches a per-face attribute for every cloth vertex.
    pub fn gather<T: Copy>(&self, per_face: &[T]) -> PenetraResult<Vec<T>> {
        let indices: Vec<u32> = self.faces.iter().map(|f| f.0).collect();
        gather(per_face, &indices)
    }

    /// Centroids and normals of the matched faces, taken from `geometry`
    /// (normally the next-step snapshot).
    pub fn gather_geometry(&self, geometry: &FaceGeometry) -> PenetraResult<(Vec<Vec3>, Vec<Vec3>)> {
        Ok((self.gather(&geometry.centroids)?, self.gather(&geometry.normals)?))
    }
}
