//! Exhaustive nearest-candidate search.

use penetra_math::Vec3;
use penetra_types::{FaceId, PenetraResult};
use rayon::prelude::*;

use crate::search::{consider, require_candidates, NearestFaceSearch};

/// Scans every candidate for every query. Queries run in parallel.
///
/// Exact, and fast enough for meshes of a few thousand faces.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForceSearch;

impl BruteForceSearch {
    /// Nearest candidate for a single query point.
    pub fn nearest_one(query: Vec3, candidates: &[Vec3]) -> FaceId {
        let mut best = (f32::INFINITY, 0_u32);
        for (i, c) in candidates.iter().enumerate() {
            consider(&mut best, query.distance_squared(*c), i as u32);
        }
        FaceId(best.1)
    }
}

impl NearestFaceSearch for BruteForceSearch {
    fn nearest(&self, queries: &[Vec3], candidates: &[Vec3]) -> PenetraResult<Vec<FaceId>> {
        require_candidates(candidates)?;
        Ok(queries
            .par_iter()
            .map(|q| Self::nearest_one(*q, candidates))
            .collect())
    }

    fn name(&self) -> &str {
        "brute_force"
    }
}
