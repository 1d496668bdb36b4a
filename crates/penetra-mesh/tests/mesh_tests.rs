//! Integration tests for penetra-mesh.

use penetra_math::Vec3;
use penetra_mesh::generators::{quad_grid, uv_sphere};
use penetra_mesh::normals::face_normal;
use penetra_mesh::{centroids_and_normals, DegenerateFacePolicy, FaceGeometry, TriangleMesh};
use penetra_types::PenetraError;

// ─── TriangleMesh Tests ───────────────────────────────────────

fn make_single_triangle() -> TriangleMesh {
    TriangleMesh {
        pos_x: vec![0.0, 1.0, 0.0],
        pos_y: vec![0.0, 0.0, 1.0],
        pos_z: vec![0.0, 0.0, 0.0],
        indices: vec![0, 1, 2],
    }
}

#[test]
fn basic_counts() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.triangle_count(), 1);
}

#[test]
fn position_access() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.position_vec3(1), Vec3::X);
    assert_eq!(mesh.position_vec3(2), Vec3::new(0.0, 1.0, 0.0));
}

#[test]
fn faces_match_triangles() {
    let mesh = quad_grid(2, 1, 1.0, 1.0);
    let faces = mesh.faces();
    assert_eq!(faces.len(), mesh.triangle_count());
    for (face, flat) in faces.iter().zip(mesh.indices.chunks_exact(3)) {
        assert_eq!(&face[..], flat);
    }
}

#[test]
fn validate_ok() {
    assert!(make_single_triangle().validate().is_ok());
}

#[test]
fn validate_catches_inconsistent_lengths() {
    let mut mesh = make_single_triangle();
    mesh.pos_y.push(99.0);
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_oob_index() {
    let mut mesh = make_single_triangle();
    mesh.indices[2] = 5;
    let err = mesh.validate().unwrap_err();
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn validate_catches_ragged_indices() {
    let mut mesh = make_single_triangle();
    mesh.indices.push(0);
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_empty_faces() {
    let mut mesh = make_single_triangle();
    mesh.indices.clear();
    assert!(matches!(mesh.validate(), Err(PenetraError::InvalidMesh(_))));
}

#[test]
fn from_interleaved_deinterleaves() {
    let mesh = TriangleMesh::from_interleaved(
        &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        &[0, 1, 2],
    )
    .unwrap();
    assert_eq!(mesh.pos_x, vec![0.0, 1.0, 0.0]);
    assert_eq!(mesh.pos_y, vec![0.0, 0.0, 1.0]);
}

#[test]
fn from_interleaved_rejects_partial_vertex() {
    assert!(TriangleMesh::from_interleaved(&[0.0, 1.0], &[0, 0, 0]).is_err());
}

#[test]
fn with_positions_keeps_connectivity() {
    let mesh = make_single_triangle();
    let moved: Vec<Vec3> = mesh.positions().iter().map(|p| *p + Vec3::Y).collect();
    let next = mesh.with_positions(&moved).unwrap();
    assert_eq!(next.indices, mesh.indices);
    assert_eq!(next.position_vec3(0), Vec3::Y);
}

#[test]
fn with_positions_rejects_wrong_count() {
    let mesh = make_single_triangle();
    let err = mesh.with_positions(&[Vec3::ZERO]).unwrap_err();
    assert!(matches!(err, PenetraError::ShapeMismatch { expected: 3, found: 1, .. }));
}

#[test]
fn translated_moves_every_vertex() {
    let mesh = make_single_triangle().translated(Vec3::new(0.0, 0.0, 2.0));
    assert!(mesh.pos_z.iter().all(|&z| z == 2.0));
}

#[test]
fn serialization_round_trip() {
    let mesh = quad_grid(2, 2, 1.0, 1.0);
    let json = serde_json::to_string(&mesh).unwrap();
    let recovered: TriangleMesh = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, mesh);
}

// ─── Normal Tests ─────────────────────────────────────────────

#[test]
fn unit_triangle_normal_is_z() {
    let n = face_normal(Vec3::ZERO, Vec3::X, Vec3::Y);
    assert!((n - Vec3::Z).length() < 1e-6);
    assert!((n.length() - 1.0).abs() < 1e-6);
}

#[test]
fn reversed_winding_flips_normal() {
    let n = face_normal(Vec3::ZERO, Vec3::Y, Vec3::X);
    assert!((n + Vec3::Z).length() < 1e-6);
}

#[test]
fn degenerate_normal_is_nan() {
    let n = face_normal(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);
    assert!(n.is_nan());
}

#[test]
fn grid_normals_point_up() {
    let mesh = quad_grid(3, 3, 2.0, 2.0);
    let geometry = FaceGeometry::from_mesh(&mesh, DegenerateFacePolicy::Reject).unwrap();
    for n in geometry.normals {
        assert!((n - Vec3::Y).length() < 1e-5, "normal {n:?}");
    }
}

#[test]
fn geometry_normals_match_face_normal() {
    let positions = [Vec3::new(0.2, 0.1, 0.0), Vec3::new(1.3, 0.4, 0.2), Vec3::new(0.1, 0.9, 0.7)];
    let (_, normals) = centroids_and_normals(&positions, &[[0, 1, 2], [0, 2, 1]]).unwrap();
    let n = face_normal(positions[0], positions[1], positions[2]);
    assert_eq!(normals[0], n);
    assert_eq!(normals[1], -n);
}

#[test]
fn sphere_normals_point_outward() {
    let center = Vec3::new(0.0, 1.0, 0.0);
    let mesh = uv_sphere(center, 0.5, 8, 16);
    let geometry = FaceGeometry::from_mesh(&mesh, DegenerateFacePolicy::Reject).unwrap();
    for (c, n) in geometry.centroids.iter().zip(&geometry.normals) {
        assert!((*c - center).dot(*n) > 0.0);
    }
}

// ─── FaceGeometry Tests ───────────────────────────────────────

#[test]
fn centroid_is_vertex_mean() {
    let positions = [Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0), Vec3::new(0.0, 3.0, 0.0)];
    let (centroids, normals) = centroids_and_normals(&positions, &[[0, 1, 2]]).unwrap();
    assert!((centroids[0] - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-6);
    assert!((normals[0] - Vec3::Z).length() < 1e-6);
}

#[test]
fn geometry_is_index_aligned() {
    let mesh = quad_grid(2, 2, 1.0, 1.0);
    let geometry = FaceGeometry::from_mesh(&mesh, DegenerateFacePolicy::Propagate).unwrap();
    assert_eq!(geometry.len(), mesh.triangle_count());
    assert_eq!(geometry.normals.len(), geometry.centroids.len());
    assert_eq!(geometry.degenerate_count, 0);
}

#[test]
fn empty_face_list_fails() {
    let err = centroids_and_normals(&[Vec3::ZERO], &[]).unwrap_err();
    assert!(matches!(err, PenetraError::InvalidMesh(_)));
}

#[test]
fn out_of_range_face_fails() {
    assert!(centroids_and_normals(&[Vec3::ZERO, Vec3::X], &[[0, 1, 2]]).is_err());
}

#[test]
fn degenerate_face_propagates_by_default() {
    let positions = [Vec3::ZERO, Vec3::X, Vec3::X * 2.0];
    let geometry =
        FaceGeometry::compute(&positions, &[[0, 1, 2]], DegenerateFacePolicy::Propagate).unwrap();
    assert_eq!(geometry.degenerate_count, 1);
    assert!(geometry.normals[0].is_nan());
}

#[test]
fn degenerate_face_rejected_when_requested() {
    let positions = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::X * 2.0];
    let err = FaceGeometry::compute(
        &positions,
        &[[0, 1, 2], [0, 1, 3]],
        DegenerateFacePolicy::Reject,
    )
    .unwrap_err();
    assert!(matches!(err, PenetraError::DegenerateFace { face: 1, .. }));
}
