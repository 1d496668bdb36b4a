//! # penetra-contact
//!
//! Cloth-to-obstacle correspondence and the penetration metric.
//!
//! The per-example pipeline is split into two phases:
//! 1. **Correspondence**: each cloth vertex is matched to the obstacle face
//!    whose centroid is nearest, using current-step geometry only.
//! 2. **Penetration**: each predicted cloth vertex is measured against the
//!    next-step plane of its matched face and turned into a cubic penalty.
//!
//! The nearest-neighbour search is a pluggable trait so a spatial index can
//! replace brute force without touching callers.

pub mod brute_force;
pub mod correspondence;
pub mod penetration;
pub mod search;
pub mod spatial_hash;

pub use brute_force::BruteForceSearch;
pub use correspondence::Correspondence;
pub use penetration::{PenetrationMetric, PenetrationSummary};
pub use search::NearestFaceSearch;
pub use spatial_hash::GridSearch;
