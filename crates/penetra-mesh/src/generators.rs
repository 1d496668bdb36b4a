//! Procedural mesh generators for benchmarks and testing.
//!
//! These generators produce deterministic, resolution-configurable meshes
//! whose winding makes face normals point "outward" (up for grids, away
//! from the center for spheres).

use penetra_math::Vec3;

use crate::mesh::TriangleMesh;

/// Generates a flat rectangular quad grid in the XZ plane at `y = 0`.
///
/// The grid spans `[-width/2, width/2]` in X and `[-depth/2, depth/2]` in Z,
/// centered at the origin. Every face normal is `+Y`.
///
/// # Arguments
/// - `cols`: Number of quads along X (vertex count = cols + 1).
/// - `rows`: Number of quads along Z (vertex count = rows + 1).
/// - `width`: Total extent along X in meters.
/// - `depth`: Total extent along Z in meters.
///
/// # Example
/// ```
/// use penetra_mesh::generators::quad_grid;
/// let mesh = quad_grid(2, 2, 1.0, 1.0);
/// assert_eq!(mesh.vertex_count(), 9);  // 3×3 vertices
/// assert_eq!(mesh.triangle_count(), 8); // 2×2 quads × 2 tris each
/// ```
pub fn quad_grid(cols: usize, rows: usize, width: f32, depth: f32) -> TriangleMesh {
    let verts_x = cols + 1;
    let verts_z = rows + 1;
    let mut mesh = TriangleMesh::with_capacity(verts_x * verts_z, cols * rows * 2);

    let half_w = width / 2.0;
    let half_d = depth / 2.0;

    for j in 0..verts_z {
        for i in 0..verts_x {
            let u = i as f32 / cols as f32;
            let v = j as f32 / rows as f32;
            mesh.pos_x.push(-half_w + u * width);
            mesh.pos_y.push(0.0);
            mesh.pos_z.push(-half_d + v * depth);
        }
    }

    for j in 0..rows {
        for i in 0..cols {
            let near_left = (j * verts_x + i) as u32;
            let near_right = near_left + 1;
            let far_left = near_left + verts_x as u32;
            let far_right = far_left + 1;

            mesh.indices.extend_from_slice(&[near_left, far_left, near_right]);
            mesh.indices.extend_from_slice(&[near_right, far_left, far_right]);
        }
    }

    mesh
}

/// Generates a UV sphere with outward-facing normals.
///
/// # Arguments
/// - `center`: Sphere center.
/// - `radius`: Sphere radius in meters.
/// - `stacks`: Number of horizontal slices (latitude divisions, >= 2).
/// - `slices`: Number of vertical slices (longitude divisions, >= 3).
pub fn uv_sphere(center: Vec3, radius: f32, stacks: usize, slices: usize) -> TriangleMesh {
    let mut mesh = TriangleMesh::with_capacity((stacks + 1) * (slices + 1), stacks * slices * 2);

    for i in 0..=stacks {
        let phi = std::f32::consts::PI * i as f32 / stacks as f32; // 0 to PI
        let (sin_phi, cos_phi) = phi.sin_cos();

        for j in 0..=slices {
            let theta = 2.0 * std::f32::consts::PI * j as f32 / slices as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();

            mesh.pos_x.push(center.x + radius * sin_phi * cos_theta);
            mesh.pos_y.push(center.y + radius * cos_phi);
            mesh.pos_z.push(center.z + radius * sin_phi * sin_theta);
        }
    }

    for i in 0..stacks {
        for j in 0..slices {
            let a = (i * (slices + 1) + j) as u32;
            let b = a + (slices + 1) as u32;

            // Pole rows collapse one triangle of each quad to a point.
            if i != 0 {
                mesh.indices.extend_from_slice(&[a, a + 1, b]);
            }
            if i != stacks - 1 {
                mesh.indices.extend_from_slice(&[a + 1, b + 1, b]);
            }
        }
    }

    mesh
}
