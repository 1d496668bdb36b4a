//! Benchmark metrics: data collected during a benchmark run.

use serde::{Deserialize, Serialize};

/// Metrics collected from one scenario run with one search strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    /// Scenario name.
    pub scenario: String,
    /// Correspondence search name.
    pub search: String,
    /// Examples per batch.
    pub examples: usize,
    /// Cloth vertices over the whole batch.
    pub cloth_vertices: usize,
    /// Obstacle faces over the whole batch.
    pub obstacle_faces: usize,
    /// Number of timed evaluations.
    pub repetitions: u32,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Average wall-clock time per batch evaluation (seconds).
    pub avg_eval_time: f64,
    /// Minimum evaluation time.
    pub min_eval_time: f64,
    /// Maximum evaluation time.
    pub max_eval_time: f64,
    /// Weighted batch loss of the last evaluation.
    pub loss: f64,
    /// Ramp weight applied.
    pub weight: f64,
    /// Deepest interpenetration over the batch (meters).
    pub max_depth: f32,
    /// Penetrating cloth vertices over the batch.
    pub penetrating_vertices: usize,
}

impl BenchmarkMetrics {
    /// CSV header matching [`to_csv_row`](Self::to_csv_row).
    pub fn to_csv_header() -> String {
        "scenario,search,examples,cloth_vertices,obstacle_faces,repetitions,total_wall_time_s,avg_eval_ms,min_eval_ms,max_eval_ms,loss,weight,max_depth,penetrating_vertices".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{:.6},{:.4},{:.4},{:.4},{:.6e},{:.1},{:.6},{}",
            self.scenario,
            self.search,
            self.examples,
            self.cloth_vertices,
            self.obstacle_faces,
            self.repetitions,
            self.total_wall_time,
            self.avg_eval_time * 1000.0,
            self.min_eval_time * 1000.0,
            self.max_eval_time * 1000.0,
            self.loss,
            self.weight,
            self.max_depth,
            self.penetrating_vertices,
        )
    }

    /// Format multiple metrics as a complete CSV string.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}
