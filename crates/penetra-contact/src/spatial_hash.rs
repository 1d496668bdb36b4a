//! Uniform-grid nearest-candidate search.
//!
//! Candidates are binned into cubic cells. A query visits shells of cells
//! at growing Chebyshev distance from its own cell and stops once no
//! unvisited cell can hold a closer candidate. Results are identical to
//! [`BruteForceSearch`](crate::BruteForceSearch), tie-break included.

use std::collections::HashMap;

use penetra_math::Vec3;
use penetra_types::constants::MIN_GRID_CELL_SIZE;
use penetra_types::{FaceId, PenetraResult};
use rayon::prelude::*;

use crate::brute_force::BruteForceSearch;
use crate::search::{consider, require_candidates, NearestFaceSearch};

/// Fraction of a cell subtracted from the shell bound to absorb rounding in
/// the cell-key computation.
const SHELL_SLACK: f32 = 0.01;

/// Finest cell allowed, as a fraction of the automatic cell size.
const MAX_REFINEMENT: f32 = 4.0;

type CellKey = (i64, i64, i64);

/// Grid-accelerated nearest-candidate search.
///
/// With no explicit cell size the grid is sized so that, on average, each
/// occupied axis holds about `cbrt(F)` cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridSearch {
    cell_size: Option<f32>,
}

impl GridSearch {
    /// Grid with a fixed cell size (clamped to a small positive minimum).
    ///
    /// Per call, a size finer than a quarter of the automatic size is
    /// raised to that quarter.
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size: Some(cell_size.max(MIN_GRID_CELL_SIZE)),
        }
    }

    /// Grid whose cell size is derived from the candidates of each call.
    pub fn auto() -> Self {
        Self { cell_size: None }
    }

    /// The fixed cell size, if any.
    pub fn cell_size(&self) -> Option<f32> {
        self.cell_size
    }

    fn resolve_cell_size(&self, candidates: &[Vec3]) -> f32 {
        let (lo, hi) = candidates
            .iter()
            .fold((Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)), |(lo, hi), c| {
                (lo.min(*c), hi.max(*c))
            });
        let longest = (hi - lo).max_element();
        let per_axis = (candidates.len() as f32).cbrt().ceil().max(1.0);
        let auto = (longest / per_axis).max(MIN_GRID_CELL_SIZE);

        match self.cell_size {
            // Cells much finer than the candidate spacing leave queries
            // walking long runs of empty shells.
            Some(size) if size * MAX_REFINEMENT < auto => {
                tracing::debug!(
                    requested = size,
                    used = auto / MAX_REFINEMENT,
                    "grid cell size too fine for candidate spacing"
                );
                auto / MAX_REFINEMENT
            }
            Some(size) => size,
            None => auto,
        }
    }
}

impl NearestFaceSearch for GridSearch {
    fn nearest(&self, queries: &[Vec3], candidates: &[Vec3]) -> PenetraResult<Vec<FaceId>> {
        require_candidates(candidates)?;

        if candidates.iter().any(|c| !c.is_finite()) {
            tracing::debug!("non-finite candidate centroid, falling back to brute force");
            return BruteForceSearch.nearest(queries, candidates);
        }

        let grid = CellGrid::build(candidates, self.resolve_cell_size(candidates));
        Ok(queries
            .par_iter()
            .map(|q| grid.nearest(*q, candidates))
            .collect())
    }

    fn name(&self) -> &str {
        "grid"
    }
}

/// Candidate indices binned by cell, plus the bounds of occupied cells.
struct CellGrid {
    cell_size: f32,
    inv_cell_size: f32,
    cells: HashMap<CellKey, Vec<u32>>,
    min: CellKey,
    max: CellKey,
}

impl CellGrid {
    fn build(candidates: &[Vec3], cell_size: f32) -> Self {
        let mut grid = Self {
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            cells: HashMap::new(),
            min: (i64::MAX, i64::MAX, i64::MAX),
            max: (i64::MIN, i64::MIN, i64::MIN),
        };

        for (i, c) in candidates.iter().enumerate() {
            let key = grid.cell_key(*c);
            grid.min = (grid.min.0.min(key.0), grid.min.1.min(key.1), grid.min.2.min(key.2));
            grid.max = (grid.max.0.max(key.0), grid.max.1.max(key.1), grid.max.2.max(key.2));
            grid.cells.entry(key).or_default().push(i as u32);
        }

        grid
    }

    /// Hash a position to a cell key.
    fn cell_key(&self, p: Vec3) -> CellKey {
        (
            (p.x * self.inv_cell_size).floor() as i64,
            (p.y * self.inv_cell_size).floor() as i64,
            (p.z * self.inv_cell_size).floor() as i64,
        )
    }

    fn nearest(&self, query: Vec3, candidates: &[Vec3]) -> FaceId {
        let c = widen(self.cell_key(query));
        let (min, max) = (widen(self.min), widen(self.max));

        // Shells closer than the occupied box are empty; the farthest
        // occupied cell bounds the search.
        let gap = |ci: i128, lo: i128, hi: i128| (lo - ci).max(ci - hi).max(0);
        let reach = |ci: i128, lo: i128, hi: i128| (ci - lo).abs().max((hi - ci).abs());
        let first_ring = gap(c.0, min.0, max.0)
            .max(gap(c.1, min.1, max.1))
            .max(gap(c.2, min.2, max.2));
        let last_ring = reach(c.0, min.0, max.0)
            .max(reach(c.1, min.1, max.1))
            .max(reach(c.2, min.2, max.2));

        let mut best = (f32::INFINITY, 0_u32);
        let mut ring = first_ring;
        while ring <= last_ring {
            self.visit_shell(c, ring, (min, max), |index| {
                let d2 = query.distance_squared(candidates[index as usize]);
                consider(&mut best, d2, index);
            });

            // Every unvisited candidate is more than `ring` cells away.
            let bound = (ring as f32 - SHELL_SLACK).max(0.0) * self.cell_size;
            if best.0 <= bound * bound {
                break;
            }
            ring += 1;
        }

        FaceId(best.1)
    }

    /// Calls `f` for every candidate in cells at Chebyshev distance exactly
    /// `ring` from `c`, clipped to the occupied bounds.
    fn visit_shell(
        &self,
        c: WideKey,
        ring: i128,
        (min, max): (WideKey, WideKey),
        mut f: impl FnMut(u32),
    ) {
        let mut visit = |x: i128, y: i128, z: i128| {
            // Inside the occupied bounds, so the narrowing is lossless.
            if let Some(indices) = self.cells.get(&(x as i64, y as i64, z as i64)) {
                indices.iter().for_each(|&i| f(i));
            }
        };

        for x in (c.0 - ring).max(min.0)..=(c.0 + ring).min(max.0) {
            for y in (c.1 - ring).max(min.1)..=(c.1 + ring).min(max.1) {
                if (x - c.0).abs() == ring || (y - c.1).abs() == ring {
                    for z in (c.2 - ring).max(min.2)..=(c.2 + ring).min(max.2) {
                        visit(x, y, z);
                    }
                } else {
                    let near = c.2 - ring;
                    let far = c.2 + ring;
                    if (min.2..=max.2).contains(&near) {
                        visit(x, y, near);
                    }
                    if ring > 0 && (min.2..=max.2).contains(&far) {
                        visit(x, y, far);
                    }
                }
            }
        }
    }
}

type WideKey = (i128, i128, i128);

#[inline]
fn widen(key: CellKey) -> WideKey {
    (key.0 as i128, key.1 as i128, key.2 as i128)
}
