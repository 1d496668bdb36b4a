//! Strongly-typed identifier for obstacle faces.
//!
//! Correspondences are stored as `FaceId`s so they cannot be confused with
//! cloth vertex indices.

use serde::{Deserialize, Serialize};

/// Index into a face (triangle) array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FaceId(pub u32);

impl FaceId {
    /// Returns the raw index as `usize` for array indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for FaceId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}
