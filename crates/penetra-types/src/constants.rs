//! Default penalty configuration and numeric thresholds.

/// Loss weight before the ramp starts.
pub const DEFAULT_WEIGHT_START: f64 = 1.0e3;

/// Loss weight once the ramp has finished.
pub const DEFAULT_WEIGHT_MAX: f64 = 1.0e5;

/// Iteration at which the weight starts ramping up.
pub const DEFAULT_START_RAMPUP_ITERATION: u64 = 50_000;

/// Number of iterations the ramp spans.
pub const DEFAULT_N_RAMPUP_ITERATIONS: u64 = 100_000;

/// Penetration margin (meters). Vertices closer than this to the
/// obstacle surface already incur a penalty.
pub const DEFAULT_PENETRATION_EPS: f32 = 1.0e-3;

/// Twice-area threshold below which a face is treated as degenerate.
pub const DEGENERATE_AREA_THRESHOLD: f32 = 1.0e-10;

/// Smallest cell size accepted by the grid search.
pub const MIN_GRID_CELL_SIZE: f32 = 1.0e-6;
