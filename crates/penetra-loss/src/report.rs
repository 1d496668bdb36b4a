//! Loss evaluation results.

use serde::{Deserialize, Serialize};

/// Diagnostics for one example. `loss` is the unweighted penalty sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExampleReport {
    /// Cloth vertex count.
    pub vertex_count: usize,
    /// Obstacle face count.
    pub face_count: usize,
    /// Cloth vertices inside the margin or through the surface.
    pub penetrating_vertices: usize,
    /// Deepest interpenetration (meters).
    pub max_depth: f32,
    /// Sum of per-vertex cubic penalties.
    pub loss: f64,
}

/// Result of evaluating one batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PenaltyOutput {
    /// `sum(example losses) / batch size * weight`.
    pub loss: f64,
    /// Ramp weight applied to this batch.
    pub weight: f64,
    /// Training iteration the weight was taken at.
    pub iteration: u64,
    /// One entry per example, in batch order.
    pub examples: Vec<ExampleReport>,
}

impl PenaltyOutput {
    /// Batch-mean penalty before weighting.
    pub fn unweighted(&self) -> f64 {
        if self.examples.is_empty() {
            return 0.0;
        }
        self.examples.iter().map(|e| e.loss).sum::<f64>() / self.examples.len() as f64
    }

    /// Deepest interpenetration over the batch.
    pub fn max_depth(&self) -> f32 {
        self.examples
            .iter()
            .map(|e| e.max_depth)
            .fold(0.0, f32::max)
    }

    /// Total penetrating vertices over the batch.
    pub fn penetrating_vertices(&self) -> usize {
        self.examples.iter().map(|e| e.penetrating_vertices).sum()
    }
}
