//! # penetra-types
//!
//! Shared identifiers, error types, and numeric defaults
//! for the Penetra collision-penalty core.
//!
//! This crate has zero domain logic. It defines the vocabulary
//! that all other Penetra crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{PenetraError, PenetraResult};
pub use ids::FaceId;
