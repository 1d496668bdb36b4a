//! Cubic penetration penalty.
//!
//! A predicted cloth vertex `p` matched to a face with centroid `c` and unit
//! normal `n` has signed distance `d = (p - c) · n`. The penalty is
//! `max(eps - d, 0)³`, which is zero with zero slope at `d = eps` and grows
//! cubically once the vertex enters the margin.

use penetra_math::Vec3;
use penetra_types::constants::DEFAULT_PENETRATION_EPS;
use penetra_types::{PenetraError, PenetraResult};
use serde::{Deserialize, Serialize};

/// Signed distance of `p` to the plane through `point` with normal `normal`.
#[inline]
pub fn signed_distance(p: Vec3, point: Vec3, normal: Vec3) -> f32 {
    (p - point).dot(normal)
}

/// Depth past the margin: `max(eps - signed_distance, 0)`.
///
/// NaN distances stay NaN.
#[inline]
pub fn interpenetration(signed_distance: f32, eps: f32) -> f32 {
    let depth = eps - signed_distance;
    if depth > 0.0 || depth.is_nan() {
        depth
    } else {
        0.0
    }
}

/// Cubic penalty of a single depth.
#[inline]
pub fn cubic_penalty(depth: f32) -> f64 {
    (depth as f64).powi(3)
}

/// Aggregate result of measuring one cloth sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PenetrationSummary {
    /// Sum of per-vertex cubic penalties.
    pub loss: f64,
    /// Vertices with positive depth (inside the margin or through the surface).
    pub penetrating_vertices: usize,
    /// Largest depth over all vertices.
    pub max_depth: f32,
}

/// The penetration metric with its margin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenetrationMetric {
    /// Margin before the surface at which the penalty starts.
    pub eps: f32,
}

impl Default for PenetrationMetric {
    fn default() -> Self {
        Self {
            eps: DEFAULT_PENETRATION_EPS,
        }
    }
}

impl PenetrationMetric {
    pub fn new(eps: f32) -> Self {
        Self { eps }
    }

    /// Per-vertex depths for predicted positions against matched
    /// next-step centroids and normals.
    pub fn depths(
        &self,
        next_positions: &[Vec3],
        points: &[Vec3],
        normals: &[Vec3],
    ) -> PenetraResult<Vec<f32>> {
        check_aligned(next_positions, points, normals)?;
        Ok(next_positions
            .iter()
            .zip(points)
            .zip(normals)
            .map(|((p, c), n)| interpenetration(signed_distance(*p, *c, *n), self.eps))
            .collect())
    }

    /// Sum of cubic penalties plus diagnostics.
    ///
    /// Summation runs in vertex order so results are reproducible.
    pub fn evaluate(
        &self,
        next_positions: &[Vec3],
        points: &[Vec3],
        normals: &[Vec3],
    ) -> PenetraResult<PenetrationSummary> {
        let depths = self.depths(next_positions, points, normals)?;
        let mut summary = PenetrationSummary::default();
        for depth in depths {
            summary.loss += cubic_penalty(depth);
            if depth > 0.0 {
                summary.penetrating_vertices += 1;
                summary.max_depth = summary.max_depth.max(depth);
            }
        }
        Ok(summary)
    }

    /// Derivative of the summed penalty with respect to each predicted
    /// position: `-3 · depth² · n`, zero outside the margin.
    pub fn gradient(
        &self,
        next_positions: &[Vec3],
        points: &[Vec3],
        normals: &[Vec3],
    ) -> PenetraResult<Vec<Vec3>> {
        let depths = self.depths(next_positions, points, normals)?;
        Ok(depths
            .into_iter()
            .zip(normals)
            .map(|(depth, n)| {
                if depth > 0.0 || depth.is_nan() {
                    *n * (-3.0 * depth * depth)
                } else {
                    Vec3::ZERO
                }
            })
            .collect())
    }
}

/// Sum of cubic penalties for `next_positions` against matched faces.
pub fn penalty(
    next_positions: &[Vec3],
    points: &[Vec3],
    normals: &[Vec3],
    eps: f32,
) -> PenetraResult<f64> {
    Ok(PenetrationMetric::new(eps)
        .evaluate(next_positions, points, normals)?
        .loss)
}

fn check_aligned(next_positions: &[Vec3], points: &[Vec3], normals: &[Vec3]) -> PenetraResult<()> {
    if points.len() != next_positions.len() {
        return Err(PenetraError::shape_mismatch(
            "correspondence points",
            next_positions.len(),
            points.len(),
        ));
    }
    if normals.len() != next_positions.len() {
        return Err(PenetraError::shape_mismatch(
            "correspondence normals",
            next_positions.len(),
            normals.len(),
        ));
    }
    Ok(())
}
