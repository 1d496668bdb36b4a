//! Integration tests for penetra-loss.

use penetra_loss::{
    ClothSample, CollisionPenalty, CollisionPenaltyConfig, DegenerateFacePolicy, Example,
    ObstacleSample, PenaltyOutput, RampSchedule, SearchStrategy,
};
use penetra_math::Vec3;
use penetra_mesh::generators::{quad_grid, uv_sphere};
use penetra_mesh::TriangleMesh;
use penetra_types::PenetraError;
use proptest::prelude::*;

/// Flat 2×2 m floor at `y = 0` with `+Y` normals.
fn floor() -> ObstacleSample {
    ObstacleSample::stationary(quad_grid(1, 1, 2.0, 2.0)).unwrap()
}

/// Cloth vertices spread over the floor, current at `current_y`, predicted
/// at `predicted_y`.
fn flat_cloth(current_y: f32, predicted_y: f32) -> ClothSample {
    let xz = [(-0.5, -0.5), (0.5, -0.5), (0.0, 0.0), (-0.5, 0.5), (0.5, 0.5)];
    let current: Vec<Vec3> = xz.iter().map(|&(x, z)| Vec3::new(x, current_y, z)).collect();
    let predicted: Vec<Vec3> = xz.iter().map(|&(x, z)| Vec3::new(x, predicted_y, z)).collect();
    ClothSample::from_positions(&current, &predicted).unwrap()
}

fn plane_example(predicted_y: f32) -> Example {
    Example::new(flat_cloth(0.01, predicted_y), floor())
}

/// Cloth grid draped over a sphere, predicted to sink `drop` meters.
fn sphere_example(drop: f32) -> Example {
    let obstacle = ObstacleSample::stationary(uv_sphere(Vec3::ZERO, 0.5, 8, 12)).unwrap();
    let current = quad_grid(6, 6, 1.2, 1.2)
        .translated(Vec3::new(0.0, 0.52, 0.0))
        .positions();
    let predicted: Vec<Vec3> = current.iter().map(|p| *p - Vec3::Y * drop).collect();
    Example::new(
        ClothSample::from_positions(&current, &predicted).unwrap(),
        obstacle,
    )
}

fn criterion(config: CollisionPenaltyConfig) -> CollisionPenalty {
    CollisionPenalty::new(config).unwrap()
}

fn approx_eq(a: f64, b: f64, rel: f64) -> bool {
    (a - b).abs() <= rel * a.abs().max(b.abs()).max(f64::MIN_POSITIVE)
}

// ─── Schedule Tests ───────────────────────────────────────────

#[test]
fn default_schedule_holds_then_ramps_then_saturates() {
    let schedule = CollisionPenaltyConfig::default().schedule().unwrap();
    assert_eq!(schedule.weight(0), 1e3);
    assert_eq!(schedule.weight(50_000), 1e3);
    assert_eq!(schedule.weight(100_000), 50_500.0);
    assert_eq!(schedule.weight(150_000), 1e5);
    assert_eq!(schedule.weight(200_000), 1e5);
    assert_eq!(schedule.weight(u64::MAX), 1e5);
}

#[test]
fn schedule_progress_is_clamped() {
    let schedule = RampSchedule::new(0.0, 1.0, 10, 20).unwrap();
    assert_eq!(schedule.progress(0), 0.0);
    assert_eq!(schedule.progress(20), 0.5);
    assert_eq!(schedule.progress(1_000), 1.0);
    assert_eq!(schedule.ramp_end(), 30);
}

#[test]
fn schedule_endpoints_match_weight() {
    let schedule = RampSchedule::new(3.0, 12.0, 5, 10).unwrap();
    assert_eq!(schedule.weight_start(), schedule.weight(0));
    assert_eq!(schedule.weight_max(), schedule.weight(schedule.ramp_end()));
}

#[test]
fn schedule_may_ramp_down() {
    let schedule = RampSchedule::new(10.0, 2.0, 0, 4).unwrap();
    assert_eq!(schedule.weight(2), 6.0);
    assert_eq!(schedule.weight(10), 2.0);
}

#[test]
fn zero_length_ramp_rejected() {
    let result = RampSchedule::new(1.0, 2.0, 0, 0);
    assert!(matches!(result, Err(PenetraError::InvalidConfig(_))));
}

#[test]
fn non_finite_weight_rejected() {
    assert!(RampSchedule::new(f64::NAN, 2.0, 0, 1).is_err());
    assert!(RampSchedule::new(1.0, f64::INFINITY, 0, 1).is_err());
}

proptest! {
    #[test]
    fn rising_schedule_is_monotone_and_bounded(
        start in 0.0_f64..1e4,
        extra in 0.0_f64..1e5,
        ramp_start in 0_u64..1_000_000,
        ramp_len in 1_u64..1_000_000,
        a in 0_u64..3_000_000,
        b in 0_u64..3_000_000,
    ) {
        let schedule = RampSchedule::new(start, start + extra, ramp_start, ramp_len).unwrap();
        let (lo, hi) = (a.min(b), a.max(b));
        prop_assert!(schedule.weight(lo) <= schedule.weight(hi));
        prop_assert!(schedule.weight(lo) >= start);
        prop_assert!(schedule.weight(hi) <= start + extra);
    }
}

// ─── Config Tests ─────────────────────────────────────────────

#[test]
fn config_defaults() {
    let config = CollisionPenaltyConfig::default();
    assert_eq!(config.weight_start, 1e3);
    assert_eq!(config.weight_max, 1e5);
    assert_eq!(config.start_rampup_iteration, 50_000);
    assert_eq!(config.n_rampup_iterations, 100_000);
    assert_eq!(config.eps, 1e-3);
    assert_eq!(config.degenerate_faces, DegenerateFacePolicy::Propagate);
    assert_eq!(config.search, SearchStrategy::BruteForce);
    assert!(config.validate().is_ok());
}

#[test]
fn constant_config_has_flat_schedule() {
    let penalty = criterion(CollisionPenaltyConfig::constant(7.0));
    assert_eq!(penalty.weight(0), 7.0);
    assert_eq!(penalty.weight(1_000_000), 7.0);
}

#[test]
fn config_from_partial_toml() {
    let config: CollisionPenaltyConfig = toml::from_str(
        r#"
        weight_start = 10.0
        eps = 0.002
        degenerate_faces = "reject"

        [search]
        kind = "grid"
        cell_size = 0.5
        "#,
    )
    .unwrap();
    assert_eq!(config.weight_start, 10.0);
    assert_eq!(config.weight_max, 1e5);
    assert_eq!(config.eps, 0.002);
    assert_eq!(config.degenerate_faces, DegenerateFacePolicy::Reject);
    assert_eq!(config.search, SearchStrategy::Grid { cell_size: Some(0.5) });
}

#[test]
fn config_toml_roundtrip() {
    let config = CollisionPenaltyConfig {
        search: SearchStrategy::Grid { cell_size: None },
        ..CollisionPenaltyConfig::constant(3.0)
    };
    let text = toml::to_string(&config).unwrap();
    let back: CollisionPenaltyConfig = toml::from_str(&text).unwrap();
    assert_eq!(config, back);
}

#[test]
fn invalid_configs_rejected() {
    let zero_ramp = CollisionPenaltyConfig {
        n_rampup_iterations: 0,
        ..Default::default()
    };
    let negative_eps = CollisionPenaltyConfig {
        eps: -1e-3,
        ..Default::default()
    };
    let zero_cell = CollisionPenaltyConfig {
        search: SearchStrategy::Grid { cell_size: Some(0.0) },
        ..Default::default()
    };
    for config in [zero_ramp, negative_eps, zero_cell] {
        assert!(matches!(
            CollisionPenalty::new(config),
            Err(PenetraError::InvalidConfig(_))
        ));
    }
}

#[test]
fn search_strategy_selects_implementation() {
    let brute = criterion(CollisionPenaltyConfig::default());
    assert_eq!(brute.search_name(), "brute_force");

    let grid = criterion(CollisionPenaltyConfig {
        search: SearchStrategy::Grid { cell_size: None },
        ..Default::default()
    });
    assert_eq!(grid.search_name(), "grid");
}

// ─── Sample Tests ─────────────────────────────────────────────

#[test]
fn cloth_channel_mismatch_rejected() {
    let mut cloth = flat_cloth(0.0, 0.0);
    cloth.pred_z.pop();
    let err = cloth.validate().unwrap_err();
    assert!(matches!(err, PenetraError::ShapeMismatch { expected: 5, found: 4, .. }));
}

#[test]
fn cloth_from_mismatched_positions_rejected() {
    let result = ClothSample::from_positions(&[Vec3::ZERO; 3], &[Vec3::ZERO; 2]);
    assert!(matches!(result, Err(PenetraError::ShapeMismatch { .. })));
}

#[test]
fn obstacle_snapshot_vertex_mismatch_rejected() {
    let mesh = quad_grid(1, 1, 1.0, 1.0);
    let mut target = mesh.clone();
    target.pos_x.push(0.0);
    target.pos_y.push(0.0);
    target.pos_z.push(0.0);
    let result = ObstacleSample::new(mesh, target);
    assert!(matches!(result, Err(PenetraError::ShapeMismatch { .. })));
}

#[test]
fn obstacle_snapshot_connectivity_mismatch_rejected() {
    let mesh = quad_grid(1, 1, 1.0, 1.0);
    let mut target = mesh.clone();
    target.indices.swap(0, 1);
    let result = ObstacleSample::new(mesh, target);
    assert!(matches!(result, Err(PenetraError::InvalidMesh(_))));
}

#[test]
fn moving_obstacle_keeps_faces() {
    let mesh = quad_grid(1, 1, 1.0, 1.0);
    let target = mesh.translated(Vec3::Y).positions();
    let obstacle = ObstacleSample::moving(mesh, &target).unwrap();
    assert_eq!(obstacle.face_count(), 2);
    assert_eq!(obstacle.target.position_vec3(0).y, 1.0);
}

// ─── Penalty Tests ────────────────────────────────────────────

#[test]
fn name_is_collision_penalty() {
    let penalty = criterion(CollisionPenaltyConfig::default());
    assert_eq!(penalty.name(), "collision_penalty");
}

#[test]
fn cloth_above_margin_costs_nothing() {
    let penalty = criterion(CollisionPenaltyConfig::default());
    let out = penalty.total_loss(&[plane_example(0.01)], 0).unwrap();
    assert_eq!(out.loss, 0.0);
    assert_eq!(out.penetrating_vertices(), 0);
}

#[test]
fn plane_penetration_grows_with_depth() {
    let penalty = criterion(CollisionPenaltyConfig::default());
    let mut previous = 0.0;
    for predicted_y in [-0.002_f32, -0.01, -0.05, -0.2] {
        let out = penalty.total_loss(&[plane_example(predicted_y)], 0).unwrap();
        assert!(out.loss.is_finite());
        assert!(out.loss > previous, "loss {} at y = {predicted_y}", out.loss);
        assert_eq!(out.penetrating_vertices(), 5);
        previous = out.loss;
    }
}

#[test]
fn plane_penalty_value() {
    // depth = 0.001 - (-0.002) = 0.003 for each of the 5 vertices.
    let penalty = criterion(CollisionPenaltyConfig::constant(1.0));
    let report = penalty.example_loss(&plane_example(-0.002)).unwrap();
    let expected = 5.0 * 0.003_f64.powi(3);
    assert!(approx_eq(report.loss, expected, 1e-3), "{}", report.loss);
    assert!((report.max_depth - 0.003).abs() < 1e-6);
    assert_eq!(report.vertex_count, 5);
    assert_eq!(report.face_count, 2);
}

#[test]
fn loss_scales_with_iteration_weight() {
    let penalty = criterion(CollisionPenaltyConfig::default());
    let batch = [plane_example(-0.01)];
    let early = penalty.total_loss(&batch, 0).unwrap();
    let late = penalty.total_loss(&batch, 150_000).unwrap();
    assert_eq!(early.weight, 1e3);
    assert_eq!(late.weight, 1e5);
    assert_eq!(late.iteration, 150_000);
    assert!(approx_eq(late.loss, early.loss * 100.0, 1e-12));
}

#[test]
fn target_geometry_decides_penetration() {
    // Cloth sits above the current floor but below where it moves next.
    let mesh = quad_grid(1, 1, 2.0, 2.0);
    let lifted = mesh.translated(Vec3::new(0.0, 0.05, 0.0)).positions();
    let obstacle = ObstacleSample::moving(mesh, &lifted).unwrap();
    let example = Example::new(flat_cloth(0.02, 0.02), obstacle);

    let penalty = criterion(CollisionPenaltyConfig::constant(1.0));
    let report = penalty.example_loss(&example).unwrap();
    assert_eq!(report.penetrating_vertices, 5);
    assert!((report.max_depth - 0.031).abs() < 1e-5);
}

/// Two horizontal triangles: face 0 at `y = 0` around the origin, face 1 at
/// `y = 1` around `x = 10`. Both normals are `+Y`.
fn two_ledges() -> TriangleMesh {
    TriangleMesh::from_positions(
        &[
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(-1.0, 0.0, 2.0),
            Vec3::new(2.0, 0.0, -1.0),
            Vec3::new(9.0, 1.0, -1.0),
            Vec3::new(9.0, 1.0, 2.0),
            Vec3::new(12.0, 1.0, -1.0),
        ],
        &[0, 1, 2, 3, 4, 5],
    )
    .unwrap()
}

#[test]
fn correspondence_uses_current_step_faces() {
    // The obstacle slides 10 m along X. At the current step the cloth vertex
    // is nearest the high ledge (face 1); at the target step the low ledge
    // (face 0) has moved under it. The penalty must measure against face 1
    // at its target position: depth = eps - (0.5 - 1.0).
    let mesh = two_ledges();
    let slid = mesh.translated(Vec3::new(10.0, 0.0, 0.0)).positions();
    let obstacle = ObstacleSample::moving(mesh, &slid).unwrap();
    let vertex = [Vec3::new(9.9, 0.5, 0.0)];
    let cloth = ClothSample::from_positions(&vertex, &vertex).unwrap();

    let penalty = criterion(CollisionPenaltyConfig::constant(1.0));
    let report = penalty.example_loss(&Example::new(cloth, obstacle)).unwrap();

    assert_eq!(report.penetrating_vertices, 1);
    assert!((report.max_depth - 0.501).abs() < 1e-5);
    assert!(approx_eq(report.loss, 0.501_f64.powi(3), 1e-4), "{}", report.loss);
}

#[test]
fn batch_of_copies_matches_single_example() {
    let penalty = criterion(CollisionPenaltyConfig::default());
    let example = plane_example(-0.01);
    let single = penalty.total_loss(std::slice::from_ref(&example), 0).unwrap();
    for b in [2, 4] {
        let batch = vec![example.clone(); b];
        let out = penalty.total_loss(&batch, 0).unwrap();
        assert_eq!(out.examples.len(), b);
        assert!(approx_eq(out.loss, single.loss, 1e-12), "B = {b}");
    }
}

#[test]
fn batch_loss_is_weighted_mean() {
    let penalty = criterion(CollisionPenaltyConfig::constant(2.0));
    let shallow = plane_example(-0.01);
    let deep = plane_example(-0.05);
    let a = penalty.example_loss(&shallow).unwrap().loss;
    let b = penalty.example_loss(&deep).unwrap().loss;

    let out = penalty.total_loss(&[shallow, deep], 0).unwrap();
    assert!(approx_eq(out.loss, (a + b) / 2.0 * 2.0, 1e-12));
    assert!(approx_eq(out.unweighted(), (a + b) / 2.0, 1e-12));
    assert_eq!(out.examples[0].loss, a);
    assert_eq!(out.examples[1].loss, b);
}

#[test]
fn repeated_evaluation_is_deterministic() {
    let penalty = criterion(CollisionPenaltyConfig::default());
    let batch: Vec<Example> = (1..=8).map(|i| sphere_example(0.01 * i as f32)).collect();
    let first = penalty.total_loss(&batch, 120_000).unwrap();
    let second = penalty.total_loss(&batch, 120_000).unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_batch_rejected() {
    let penalty = criterion(CollisionPenaltyConfig::default());
    assert!(matches!(
        penalty.total_loss(&[], 0),
        Err(PenetraError::EmptyBatch)
    ));
}

#[test]
fn malformed_example_fails_whole_batch() {
    let penalty = criterion(CollisionPenaltyConfig::default());
    let mut bad = plane_example(-0.01);
    bad.cloth.pred_x.push(0.0);
    let result = penalty.total_loss(&[plane_example(-0.01), bad], 0);
    assert!(matches!(result, Err(PenetraError::ShapeMismatch { .. })));
}

#[test]
fn out_of_range_face_index_rejected() {
    let penalty = criterion(CollisionPenaltyConfig::default());
    let mut mesh = quad_grid(1, 1, 1.0, 1.0);
    mesh.indices[0] = 99;
    let example = Example {
        cloth: flat_cloth(0.01, 0.0),
        obstacle: ObstacleSample {
            current: mesh.clone(),
            target: mesh,
        },
    };
    let result = penalty.total_loss(&[example], 0);
    assert!(matches!(result, Err(PenetraError::InvalidMesh(_))));
}

#[test]
fn grid_and_brute_force_agree() {
    let brute = criterion(CollisionPenaltyConfig::default());
    let grid = criterion(CollisionPenaltyConfig {
        search: SearchStrategy::Grid { cell_size: None },
        ..Default::default()
    });
    let batch: Vec<Example> = [0.0, 0.03, 0.08].map(sphere_example).to_vec();

    let a: PenaltyOutput = brute.total_loss(&batch, 75_000).unwrap();
    let b: PenaltyOutput = grid.total_loss(&batch, 75_000).unwrap();
    assert_eq!(a, b);
    assert!(a.loss > 0.0);
}

// ─── Degenerate Face Tests ────────────────────────────────────

fn sliver_example() -> Example {
    let sliver = TriangleMesh::from_positions(
        &[Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0)],
        &[0, 1, 2],
    )
    .unwrap();
    Example::new(
        flat_cloth(0.01, -0.01),
        ObstacleSample::stationary(sliver).unwrap(),
    )
}

#[test]
fn degenerate_face_propagates_nan_by_default() {
    let penalty = criterion(CollisionPenaltyConfig::default());
    let out = penalty.total_loss(&[sliver_example()], 0).unwrap();
    assert!(out.loss.is_nan());
}

#[test]
fn degenerate_face_rejected_on_request() {
    let penalty = criterion(CollisionPenaltyConfig {
        degenerate_faces: DegenerateFacePolicy::Reject,
        ..Default::default()
    });
    let result = penalty.total_loss(&[sliver_example()], 0);
    assert!(matches!(
        result,
        Err(PenetraError::DegenerateFace { face: 0, .. })
    ));
}

// ─── Gradient Tests ───────────────────────────────────────────

#[test]
fn gradient_matches_finite_difference() {
    let penalty = criterion(CollisionPenaltyConfig::constant(10.0));
    let batch = vec![plane_example(-0.01), plane_example(0.05)];
    let (out, gradients) = penalty.total_loss_with_gradient(&batch, 0).unwrap();
    assert_eq!(gradients.len(), 2);
    assert_eq!(gradients[0].len(), 5);

    // Second example is clear of the floor.
    assert!(gradients[1].iter().all(|g| *g == Vec3::ZERO));

    let h = 1e-4_f32;
    let loss_at = |dy: f32| {
        let mut shifted = batch.clone();
        shifted[0].cloth.pred_y[2] += dy;
        penalty.total_loss(&shifted, 0).unwrap().loss
    };
    let numeric = (loss_at(h) - loss_at(-h)) / (2.0 * h as f64);
    let analytic = gradients[0][2].y as f64;

    assert!(analytic < 0.0);
    assert!(approx_eq(analytic, numeric, 1e-2), "{analytic} vs {numeric}");
    assert!(out.loss > 0.0);
}

#[test]
fn gradient_free_evaluation_matches() {
    let penalty = criterion(CollisionPenaltyConfig::default());
    let batch = vec![sphere_example(0.05)];
    let plain = penalty.total_loss(&batch, 0).unwrap();
    let (with_grad, _) = penalty.total_loss_with_gradient(&batch, 0).unwrap();
    assert_eq!(plain, with_grad);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn loss_is_never_negative(
        predicted_y in -0.5_f32..0.5,
        iteration in 0_u64..400_000,
    ) {
        let penalty = criterion(CollisionPenaltyConfig::default());
        let out = penalty.total_loss(&[plane_example(predicted_y)], iteration).unwrap();
        prop_assert!(out.loss >= 0.0);
    }
}
