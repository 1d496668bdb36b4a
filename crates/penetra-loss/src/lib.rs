//! # penetra-loss
//!
//! The collision-penalty loss used while training a learned cloth simulator.
//!
//! ## Key Types
//!
//! - [`CollisionPenaltyConfig`]: Ramp parameters, margin, search strategy
//! - [`RampSchedule`]: Clamped linear loss-weight ramp over iterations
//! - [`Example`]: One cloth sample paired with one obstacle sample
//! - [`CollisionPenalty`]: Evaluates a batch of examples into a weighted loss
//! - [`PenaltyOutput`]: Loss, weight, and per-example diagnostics

pub mod config;
pub mod criterion;
pub mod report;
pub mod sample;
pub mod schedule;

pub use config::{CollisionPenaltyConfig, SearchStrategy};
pub use criterion::CollisionPenalty;
pub use penetra_mesh::DegenerateFacePolicy;
pub use report::{ExampleReport, PenaltyOutput};
pub use sample::{ClothSample, Example, ObstacleSample};
pub use schedule::RampSchedule;
