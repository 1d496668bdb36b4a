//! Nearest-neighbour search trait.
//!
//! Maps every query point to the index of its closest candidate point.
//! Implementations must agree exactly: ties go to the lowest candidate index.

use penetra_math::Vec3;
use penetra_types::{FaceId, PenetraError, PenetraResult};

/// Trait for nearest-candidate search.
///
/// # Implementations
/// - [`BruteForceSearch`](crate::BruteForceSearch): exhaustive O(M·F), parallel over queries
/// - [`GridSearch`](crate::GridSearch): uniform grid with shell expansion
pub trait NearestFaceSearch: Send + Sync {
    /// For each query point, the index of the candidate at minimal
    /// Euclidean distance.
    ///
    /// Fails if `candidates` is empty. An empty `queries` slice yields an
    /// empty result.
    fn nearest(&self, queries: &[Vec3], candidates: &[Vec3]) -> PenetraResult<Vec<FaceId>>;

    /// Returns the search strategy name.
    fn name(&self) -> &str;
}

pub(crate) fn require_candidates(candidates: &[Vec3]) -> PenetraResult<()> {
    if candidates.is_empty() {
        return Err(PenetraError::InvalidMesh(
            "Nearest-face search needs at least one candidate face".into(),
        ));
    }
    Ok(())
}

/// Keeps `(d2, index)` if it beats `best` (smaller distance, then smaller index).
#[inline]
pub(crate) fn consider(best: &mut (f32, u32), d2: f32, index: u32) {
    if d2 < best.0 || (d2 == best.0 && index < best.1) {
        *best = (d2, index);
    }
}
