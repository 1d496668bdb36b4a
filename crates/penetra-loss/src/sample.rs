//! Per-example input records.
//!
//! A cloth sample holds current and predicted positions in SoA layout; an
//! obstacle sample holds current and target snapshots with shared
//! connectivity. Both are read-only inputs to one loss evaluation.

use penetra_math::Vec3;
use penetra_mesh::TriangleMesh;
use penetra_types::{PenetraError, PenetraResult};
use serde::{Deserialize, Serialize};

/// Cloth vertex positions at the current step and as predicted for the next.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClothSample {
    // ─── Position (current) ───
    pub pos_x: Vec<f32>,
    pub pos_y: Vec<f32>,
    pub pos_z: Vec<f32>,

    // ─── Predicted position (next step) ───
    pub pred_x: Vec<f32>,
    pub pred_y: Vec<f32>,
    pub pred_z: Vec<f32>,
}

impl ClothSample {
    /// Builds a sample from AoS positions.
    pub fn from_positions(current: &[Vec3], predicted: &[Vec3]) -> PenetraResult<Self> {
        let sample = Self {
            pos_x: current.iter().map(|p| p.x).collect(),
            pos_y: current.iter().map(|p| p.y).collect(),
            pos_z: current.iter().map(|p| p.z).collect(),
            pred_x: predicted.iter().map(|p| p.x).collect(),
            pred_y: predicted.iter().map(|p| p.y).collect(),
            pred_z: predicted.iter().map(|p| p.z).collect(),
        };
        sample.validate()?;
        Ok(sample)
    }

    /// Number of cloth vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    pub fn current_positions(&self) -> Vec<Vec3> {
        soa_to_vec3(&self.pos_x, &self.pos_y, &self.pos_z)
    }

    pub fn predicted_positions(&self) -> Vec<Vec3> {
        soa_to_vec3(&self.pred_x, &self.pred_y, &self.pred_z)
    }

    /// All six channels must have the same length.
    pub fn validate(&self) -> PenetraResult<()> {
        let n = self.pos_x.len();
        let channels = [
            ("cloth pos_y", self.pos_y.len()),
            ("cloth pos_z", self.pos_z.len()),
            ("cloth pred_x", self.pred_x.len()),
            ("cloth pred_y", self.pred_y.len()),
            ("cloth pred_z", self.pred_z.len()),
        ];
        for (what, len) in channels {
            if len != n {
                return Err(PenetraError::shape_mismatch(what, n, len));
            }
        }
        Ok(())
    }
}

fn soa_to_vec3(x: &[f32], y: &[f32], z: &[f32]) -> Vec<Vec3> {
    x.iter()
        .zip(y)
        .zip(z)
        .map(|((&x, &y), &z)| Vec3::new(x, y, z))
        .collect()
}

/// Obstacle snapshots at the current step and the target (next) step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSample {
    pub current: TriangleMesh,
    pub target: TriangleMesh,
}

impl ObstacleSample {
    /// Pairs two snapshots after checking they share connectivity.
    pub fn new(current: TriangleMesh, target: TriangleMesh) -> PenetraResult<Self> {
        let sample = Self { current, target };
        sample.validate()?;
        Ok(sample)
    }

    /// An obstacle that does not move between the two steps.
    pub fn stationary(mesh: TriangleMesh) -> PenetraResult<Self> {
        Self::new(mesh.clone(), mesh)
    }

    /// An obstacle moving to `target_positions` with unchanged faces.
    pub fn moving(mesh: TriangleMesh, target_positions: &[Vec3]) -> PenetraResult<Self> {
        let target = mesh.with_positions(target_positions)?;
        Self::new(mesh, target)
    }

    /// Number of obstacle faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.current.triangle_count()
    }

    /// Shape checks first, then mesh integrity of both snapshots.
    pub fn validate(&self) -> PenetraResult<()> {
        if self.target.vertex_count() != self.current.vertex_count() {
            return Err(PenetraError::shape_mismatch(
                "obstacle target vertices",
                self.current.vertex_count(),
                self.target.vertex_count(),
            ));
        }
        if self.target.indices.len() != self.current.indices.len() {
            return Err(PenetraError::shape_mismatch(
                "obstacle target faces",
                self.current.triangle_count(),
                self.target.triangle_count(),
            ));
        }
        if self.target.indices != self.current.indices {
            return Err(PenetraError::InvalidMesh(
                "Obstacle current and target snapshots have different connectivity".into(),
            ));
        }
        self.current.validate()?;
        self.target.validate()
    }
}

/// One independent cloth/obstacle pair of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub cloth: ClothSample,
    pub obstacle: ObstacleSample,
}

impl Example {
    pub fn new(cloth: ClothSample, obstacle: ObstacleSample) -> Self {
        Self { cloth, obstacle }
    }

    pub fn validate(&self) -> PenetraResult<()> {
        self.cloth.validate()?;
        self.obstacle.validate()
    }
}
