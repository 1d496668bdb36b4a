//! # penetra-bench
//!
//! Benchmark suite for the collision penalty.
//!
//! Provides 2 procedural batch scenarios, timing per correspondence search,
//! and CSV/JSON export for regression tracking.

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::BenchmarkMetrics;
pub use runner::BenchmarkRunner;
pub use scenarios::{Scenario, ScenarioKind};
