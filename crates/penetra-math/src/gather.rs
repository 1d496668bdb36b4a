//! Gather-by-index primitives.
//!
//! Face attributes are built by fetching the three per-vertex values a
//! face references (`gather_face_slots`) and averaging them over the slots
//! (`gather_face_mean`). The plain [`gather`] fetches one value per index
//! and is used to pull per-face data at correspondence indices.

use std::ops::{Add, Mul};

use penetra_types::{PenetraError, PenetraResult};

/// Fetch `values[i]` for every `i` in `indices`, in order.
///
/// Fails with `InvalidMesh` on the first out-of-range index.
pub fn gather<T: Copy>(values: &[T], indices: &[u32]) -> PenetraResult<Vec<T>> {
    indices
        .iter()
        .enumerate()
        .map(|(slot, &i)| {
            values.get(i as usize).copied().ok_or_else(|| {
                PenetraError::InvalidMesh(format!(
                    "Gather index {} at slot {} is out of range (length: {})",
                    i,
                    slot,
                    values.len()
                ))
            })
        })
        .collect()
}

/// Fetch the three per-vertex values referenced by each face.
///
/// Output is index-aligned with `faces`; slot order follows the face's
/// winding.
pub fn gather_face_slots<T: Copy>(values: &[T], faces: &[[u32; 3]]) -> PenetraResult<Vec<[T; 3]>> {
    let n = values.len();
    faces
        .iter()
        .enumerate()
        .map(|(f, &[a, b, c])| {
            let fetch = |i: u32| {
                values.get(i as usize).copied().ok_or_else(|| {
                    PenetraError::InvalidMesh(format!(
                        "Face {} references vertex {} (vertex count: {})",
                        f, i, n
                    ))
                })
            };
            Ok([fetch(a)?, fetch(b)?, fetch(c)?])
        })
        .collect()
}

/// Per-face mean of the three gathered per-vertex values.
///
/// Applied to positions this yields face centroids.
pub fn gather_face_mean<T>(values: &[T], faces: &[[u32; 3]]) -> PenetraResult<Vec<T>>
where
    T: Copy + Add<Output = T> + Mul<f32, Output = T>,
{
    let third = 1.0_f32 / 3.0;
    Ok(gather_face_slots(values, faces)?
        .into_iter()
        .map(|[a, b, c]| (a + b + c) * third)
        .collect())
}
