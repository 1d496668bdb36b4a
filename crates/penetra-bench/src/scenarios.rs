//! Benchmark scenarios: procedural cloth/obstacle batches.
//!
//! Two canonical scenarios for regression testing:
//! 1. **Plane contact**: Cloth sheet sinking into a flat floor
//! 2. **Sphere drape**: Cloth sheet pressed onto a rising sphere

use penetra_loss::{ClothSample, Example, ObstacleSample};
use penetra_math::Vec3;
use penetra_mesh::generators::{quad_grid, uv_sphere};
use penetra_types::PenetraResult;
use serde::{Deserialize, Serialize};

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioKind {
    /// Cloth sheet over a ground plane, sinking by a different amount per example.
    PlaneContact,
    /// Cloth sheet over a sphere that moves up between the two steps.
    SphereDrape,
}

impl ScenarioKind {
    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[ScenarioKind::PlaneContact, ScenarioKind::SphereDrape]
    }

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::PlaneContact => "plane_contact",
            ScenarioKind::SphereDrape => "sphere_drape",
        }
    }

    /// Inverse of [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.name() == name)
    }
}

/// A fully specified benchmark scenario.
pub struct Scenario {
    /// Scenario type.
    pub kind: ScenarioKind,
    /// Examples evaluated together as one batch.
    pub batch: Vec<Example>,
    /// Training iteration passed to the loss (sets the ramp weight).
    pub iteration: u64,
    /// Number of timed batch evaluations.
    pub repetitions: u32,
}

impl Scenario {
    /// Create the plane contact scenario.
    ///
    /// A 1.5m × 1.5m cloth at 32×32 resolution, 5mm above a 2m × 2m floor.
    /// Example `k` is predicted to sink `4mm * (k + 1)`.
    pub fn plane_contact() -> PenetraResult<Self> {
        let floor = ObstacleSample::stationary(quad_grid(16, 16, 2.0, 2.0))?;
        let current = quad_grid(32, 32, 1.5, 1.5)
            .translated(Vec3::new(0.0, 0.005, 0.0))
            .positions();

        let batch = (0..4)
            .map(|k| {
                let drop = 0.004 * (k + 1) as f32;
                let predicted: Vec<Vec3> = current.iter().map(|p| *p - Vec3::Y * drop).collect();
                Ok(Example::new(
                    ClothSample::from_positions(&current, &predicted)?,
                    floor.clone(),
                ))
            })
            .collect::<PenetraResult<Vec<_>>>()?;

        Ok(Self {
            kind: ScenarioKind::PlaneContact,
            batch,
            iteration: 100_000, // Mid-ramp
            repetitions: 20,
        })
    }

    /// Create the sphere drape scenario.
    ///
    /// A 1.5m × 1.5m cloth at 40×40 resolution hovers just above a sphere of
    /// radius 0.3m. The sphere rises 2mm while the cloth is predicted to
    /// drop 1–4cm, so the loss sees both obstacle and cloth motion.
    pub fn sphere_drape() -> PenetraResult<Self> {
        let sphere = uv_sphere(Vec3::ZERO, 0.3, 16, 32);
        let risen = sphere.translated(Vec3::new(0.0, 0.002, 0.0)).positions();
        let obstacle = ObstacleSample::moving(sphere, &risen)?;

        let current = quad_grid(40, 40, 1.5, 1.5)
            .translated(Vec3::new(0.0, 0.305, 0.0))
            .positions();

        let batch = (0..4)
            .map(|k| {
                let drop = 0.01 * (k + 1) as f32;
                let predicted: Vec<Vec3> = current.iter().map(|p| *p - Vec3::Y * drop).collect();
                Ok(Example::new(
                    ClothSample::from_positions(&current, &predicted)?,
                    obstacle.clone(),
                ))
            })
            .collect::<PenetraResult<Vec<_>>>()?;

        Ok(Self {
            kind: ScenarioKind::SphereDrape,
            batch,
            iteration: 200_000, // Past the ramp
            repetitions: 10,
        })
    }

    /// Create a scenario by kind.
    pub fn from_kind(kind: ScenarioKind) -> PenetraResult<Self> {
        match kind {
            ScenarioKind::PlaneContact => Self::plane_contact(),
            ScenarioKind::SphereDrape => Self::sphere_drape(),
        }
    }

    /// Total cloth vertices over the batch.
    pub fn cloth_vertices(&self) -> usize {
        self.batch.iter().map(|e| e.cloth.vertex_count()).sum()
    }

    /// Total obstacle faces over the batch.
    pub fn obstacle_faces(&self) -> usize {
        self.batch.iter().map(|e| e.obstacle.face_count()).sum()
    }
}
