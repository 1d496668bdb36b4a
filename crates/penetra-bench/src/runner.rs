//! Benchmark runner: evaluates scenario batches and collects timings.

use std::time::Instant;

use penetra_loss::{CollisionPenalty, CollisionPenaltyConfig, PenaltyOutput, SearchStrategy};
use penetra_types::{PenetraError, PenetraResult};

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Search strategies compared by default.
    pub fn default_strategies() -> Vec<SearchStrategy> {
        vec![
            SearchStrategy::BruteForce,
            SearchStrategy::Grid { cell_size: None },
        ]
    }

    /// Evaluate a scenario's batch `scenario.repetitions` times with the
    /// given search strategy and default penalty parameters.
    pub fn run(scenario: &Scenario, search: SearchStrategy) -> PenetraResult<BenchmarkMetrics> {
        if scenario.repetitions == 0 {
            return Err(PenetraError::InvalidConfig(
                "Benchmark repetitions must be >= 1".into(),
            ));
        }

        let penalty = CollisionPenalty::new(CollisionPenaltyConfig {
            search,
            ..Default::default()
        })?;

        let mut eval_times: Vec<f64> = Vec::with_capacity(scenario.repetitions as usize);
        let mut last = PenaltyOutput::default();

        let total_start = Instant::now();
        for _ in 0..scenario.repetitions {
            let start = Instant::now();
            last = penalty.total_loss(&scenario.batch, scenario.iteration)?;
            eval_times.push(start.elapsed().as_secs_f64());
        }
        let total_wall_time = total_start.elapsed().as_secs_f64();

        let avg_eval = eval_times.iter().sum::<f64>() / eval_times.len() as f64;
        let min_eval = eval_times.iter().copied().fold(f64::MAX, f64::min);
        let max_eval = eval_times.iter().copied().fold(0.0, f64::max);

        tracing::info!(
            scenario = scenario.kind.name(),
            search = penalty.search_name(),
            avg_ms = avg_eval * 1000.0,
            loss = last.loss,
            "benchmark complete"
        );

        Ok(BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            search: penalty.search_name().to_string(),
            examples: scenario.batch.len(),
            cloth_vertices: scenario.cloth_vertices(),
            obstacle_faces: scenario.obstacle_faces(),
            repetitions: scenario.repetitions,
            total_wall_time,
            avg_eval_time: avg_eval,
            min_eval_time: min_eval,
            max_eval_time: max_eval,
            max_depth: last.max_depth(),
            penetrating_vertices: last.penetrating_vertices(),
            loss: last.loss,
            weight: last.weight,
        })
    }

    /// Run every scenario with every strategy in `searches`.
    pub fn run_all(searches: &[SearchStrategy]) -> PenetraResult<Vec<BenchmarkMetrics>> {
        let mut results = Vec::new();
        for &kind in ScenarioKind::all() {
            let scenario = Scenario::from_kind(kind)?;
            for &search in searches {
                results.push(Self::run(&scenario, search)?);
            }
        }
        Ok(results)
    }
}
