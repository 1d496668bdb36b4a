//! Loss-weight ramp.
//!
//! ```text
//! delta    = max(iteration - start_rampup_iteration, 0)
//! progress = min(delta / n_rampup_iterations, 1)
//! weight   = weight_start + (weight_max - weight_start) * progress
//! ```

use penetra_types::{PenetraError, PenetraResult};

/// Clamped linear ramp from `weight_start` to `weight_max`.
///
/// Holds `weight_start` up to `start_rampup_iteration` and `weight_max`
/// from `start_rampup_iteration + n_rampup_iterations` on. A `weight_max`
/// below `weight_start` ramps down, which is allowed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampSchedule {
    weight_start: f64,
    weight_max: f64,
    start_rampup_iteration: u64,
    n_rampup_iterations: u64,
}

impl RampSchedule {
    /// Fails with `InvalidConfig` for a zero-length ramp or non-finite weights.
    pub fn new(
        weight_start: f64,
        weight_max: f64,
        start_rampup_iteration: u64,
        n_rampup_iterations: u64,
    ) -> PenetraResult<Self> {
        if n_rampup_iterations == 0 {
            return Err(PenetraError::InvalidConfig(
                "n_rampup_iterations must be >= 1".into(),
            ));
        }
        if !weight_start.is_finite() || !weight_max.is_finite() {
            return Err(PenetraError::InvalidConfig(format!(
                "Ramp weights must be finite (start: {weight_start}, max: {weight_max})"
            )));
        }
        Ok(Self {
            weight_start,
            weight_max,
            start_rampup_iteration,
            n_rampup_iterations,
        })
    }

    /// Fraction of the ramp completed at `iteration`, in `[0, 1]`.
    pub fn progress(&self, iteration: u64) -> f64 {
        let delta = iteration.saturating_sub(self.start_rampup_iteration);
        (delta as f64 / self.n_rampup_iterations as f64).min(1.0)
    }

    /// Loss weight at `iteration`.
    pub fn weight(&self, iteration: u64) -> f64 {
        self.weight_start + (self.weight_max - self.weight_start) * self.progress(iteration)
    }

    /// First iteration at which the weight equals `weight_max`.
    pub fn ramp_end(&self) -> u64 {
        self.start_rampup_iteration
            .saturating_add(self.n_rampup_iterations)
    }

    /// Weight held before the ramp.
    pub fn weight_start(&self) -> f64 {
        self.weight_start
    }

    /// Weight held after the ramp.
    pub fn weight_max(&self) -> f64 {
        self.weight_max
    }
}
