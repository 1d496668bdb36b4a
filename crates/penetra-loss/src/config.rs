//! Collision-penalty configuration.
//!
//! Ramp parameters, penetration margin, and the strategy used to find
//! correspondences. Loaded from TOML by the CLI; every field has a default.

use penetra_contact::{BruteForceSearch, GridSearch, NearestFaceSearch};
use penetra_mesh::DegenerateFacePolicy;
use penetra_types::constants;
use penetra_types::{PenetraError, PenetraResult};
use serde::{Deserialize, Serialize};

use crate::schedule::RampSchedule;

/// Nearest-face search used for correspondences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Exhaustive search over all face centroids.
    #[default]
    BruteForce,
    /// Uniform grid; `cell_size = None` derives it from the obstacle.
    Grid {
        #[serde(default)]
        cell_size: Option<f32>,
    },
}

impl SearchStrategy {
    /// Instantiates the search.
    pub fn build(&self) -> Box<dyn NearestFaceSearch> {
        match *self {
            Self::BruteForce => Box::new(BruteForceSearch),
            Self::Grid { cell_size: Some(size) } => Box::new(GridSearch::new(size)),
            Self::Grid { cell_size: None } => Box::new(GridSearch::auto()),
        }
    }
}

/// Configuration for [`CollisionPenalty`](crate::CollisionPenalty).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionPenaltyConfig {
    /// Loss weight before the ramp starts.
    pub weight_start: f64,

    /// Loss weight after the ramp ends.
    pub weight_max: f64,

    /// Iteration at which the ramp starts.
    pub start_rampup_iteration: u64,

    /// Ramp length in iterations. Must be positive.
    pub n_rampup_iterations: u64,

    /// Penetration margin (meters).
    pub eps: f32,

    /// Handling of zero-area obstacle faces.
    pub degenerate_faces: DegenerateFacePolicy,

    /// Correspondence search strategy.
    pub search: SearchStrategy,
}

impl Default for CollisionPenaltyConfig {
    fn default() -> Self {
        Self {
            weight_start: constants::DEFAULT_WEIGHT_START,
            weight_max: constants::DEFAULT_WEIGHT_MAX,
            start_rampup_iteration: constants::DEFAULT_START_RAMPUP_ITERATION,
            n_rampup_iterations: constants::DEFAULT_N_RAMPUP_ITERATIONS,
            eps: constants::DEFAULT_PENETRATION_EPS,
            degenerate_faces: DegenerateFacePolicy::Propagate,
            search: SearchStrategy::BruteForce,
        }
    }
}

impl CollisionPenaltyConfig {
    /// A config whose weight never changes.
    pub fn constant(weight: f64) -> Self {
        Self {
            weight_start: weight,
            weight_max: weight,
            ..Default::default()
        }
    }

    /// Checks every field.
    pub fn validate(&self) -> PenetraResult<()> {
        self.schedule()?;

        if !self.eps.is_finite() || self.eps < 0.0 {
            return Err(PenetraError::InvalidConfig(format!(
                "eps must be finite and non-negative, got {}",
                self.eps
            )));
        }

        if let SearchStrategy::Grid { cell_size: Some(size) } = self.search {
            if !size.is_finite() || size <= 0.0 {
                return Err(PenetraError::InvalidConfig(format!(
                    "Grid cell size must be positive, got {size}"
                )));
            }
        }

        Ok(())
    }

    /// The weight schedule described by this config.
    pub fn schedule(&self) -> PenetraResult<RampSchedule> {
        RampSchedule::new(
            self.weight_start,
            self.weight_max,
            self.start_rampup_iteration,
            self.n_rampup_iterations,
        )
    }
}
