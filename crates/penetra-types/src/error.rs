//! Error types for Penetra.
//!
//! All crates return `PenetraResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the penalty core.
#[derive(Debug, Error)]
pub enum PenetraError {
    /// Mesh data is malformed (bad indices, empty face list, ragged SoA arrays).
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Two inputs that must agree in size do not.
    #[error("Shape mismatch in {what}: expected {expected}, found {found}")]
    ShapeMismatch {
        what: String,
        expected: usize,
        found: usize,
    },

    /// A face has (near) zero area and the active policy rejects it.
    #[error("Degenerate face {face} (twice-area {area2:.3e})")]
    DegenerateFace {
        face: u32,
        area2: f32,
    },

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A batch with no examples cannot be normalized.
    #[error("Batch contains no examples")]
    EmptyBatch,

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PenetraError {
    /// Shorthand for building a [`PenetraError::ShapeMismatch`].
    pub fn shape_mismatch(what: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::ShapeMismatch {
            what: what.into(),
            expected,
            found,
        }
    }
}

/// Convenience alias for `Result<T, PenetraError>`.
pub type PenetraResult<T> = Result<T, PenetraError>;
