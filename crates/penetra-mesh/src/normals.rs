//! Face normal computation from triangle geometry.
//!
//! The normal of face `[a, b, c]` is `normalize((b - a) × (c - a))`, so a
//! counter-clockwise winding seen from outside points the normal outward.

use penetra_math::Vec3;

/// Unnormalized face normal. Its length is twice the triangle area.
#[inline]
pub fn area_weighted_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a)
}

/// Unit face normal.
///
/// Zero-area triangles produce a NaN vector; nothing is clamped here.
#[inline]
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    area_weighted_normal(a, b, c).normalize()
}
