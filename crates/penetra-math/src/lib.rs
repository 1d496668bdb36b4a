//! # penetra-math
//!
//! Vector primitives for the Penetra collision-penalty core.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec3`, etc.)
//! - Gather-by-index utilities that fetch per-face vertex attributes

pub mod gather;

// Re-export glam types as the canonical math types for Penetra.
pub use glam::Vec3;

pub use gather::{gather, gather_face_mean, gather_face_slots};
