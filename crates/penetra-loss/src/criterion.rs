//! Batch collision-penalty criterion.
//!
//! Per example:
//! 1. Face geometry of the obstacle at the current and target steps
//! 2. Correspondence: cloth current positions → nearest current centroid
//! 3. Penetration: cloth predicted positions against the target-step
//!    centroid and normal of each matched face
//!
//! The batch loss is `sum(example losses) / B * weight(iteration)`.

use penetra_contact::{Correspondence, NearestFaceSearch, PenetrationMetric};
use penetra_math::Vec3;
use penetra_mesh::FaceGeometry;
use penetra_types::{PenetraError, PenetraResult};
use rayon::prelude::*;

use crate::config::CollisionPenaltyConfig;
use crate::report::{ExampleReport, PenaltyOutput};
use crate::sample::Example;
use crate::schedule::RampSchedule;

/// Collision-penalty loss over batches of independent examples.
///
/// Holds only immutable configuration, so one instance can serve any
/// number of concurrent callers.
pub struct CollisionPenalty {
    config: CollisionPenaltyConfig,
    schedule: RampSchedule,
    metric: PenetrationMetric,
    search: Box<dyn NearestFaceSearch>,
}

impl CollisionPenalty {
    /// Loss name reported to training logs.
    pub const NAME: &'static str = "collision_penalty";

    /// Validates `config` and builds the criterion.
    pub fn new(config: CollisionPenaltyConfig) -> PenetraResult<Self> {
        config.validate()?;
        Ok(Self {
            schedule: config.schedule()?,
            metric: PenetrationMetric::new(config.eps),
            search: config.search.build(),
            config,
        })
    }

    /// Replaces the configured search with a custom implementation.
    pub fn with_search(mut self, search: Box<dyn NearestFaceSearch>) -> Self {
        self.search = search;
        self
    }

    pub fn name(&self) -> &str {
        Self::NAME
    }

    pub fn config(&self) -> &CollisionPenaltyConfig {
        &self.config
    }

    pub fn schedule(&self) -> &RampSchedule {
        &self.schedule
    }

    /// Name of the active correspondence search.
    pub fn search_name(&self) -> &str {
        self.search.name()
    }

    /// Loss weight at `iteration`.
    pub fn weight(&self, iteration: u64) -> f64 {
        self.schedule.weight(iteration)
    }

    /// Unweighted penalty of a single example.
    pub fn example_loss(&self, example: &Example) -> PenetraResult<ExampleReport> {
        example.validate()?;
        Ok(self.evaluate_example(example, false)?.0)
    }

    /// Weighted, batch-normalized loss.
    ///
    /// Fails on an empty batch or if any example is malformed; no partial
    /// result is produced.
    pub fn total_loss(&self, batch: &[Example], iteration: u64) -> PenetraResult<PenaltyOutput> {
        Ok(self.run(batch, iteration, false)?.0)
    }

    /// Like [`total_loss`](Self::total_loss), plus the derivative of the
    /// batch loss with respect to every predicted cloth position, one
    /// `Vec` per example.
    pub fn total_loss_with_gradient(
        &self,
        batch: &[Example],
        iteration: u64,
    ) -> PenetraResult<(PenaltyOutput, Vec<Vec<Vec3>>)> {
        self.run(batch, iteration, true)
    }

    fn run(
        &self,
        batch: &[Example],
        iteration: u64,
        with_gradient: bool,
    ) -> PenetraResult<(PenaltyOutput, Vec<Vec<Vec3>>)> {
        if batch.is_empty() {
            return Err(PenetraError::EmptyBatch);
        }

        // Shape checks for the whole batch before any geometry work.
        for example in batch {
            example.validate()?;
        }

        let weight = self.weight(iteration);

        let results = batch
            .par_iter()
            .enumerate()
            .map(|(i, example)| {
                let result = self.evaluate_example(example, with_gradient)?;
                tracing::debug!(
                    example = i,
                    vertices = result.0.vertex_count,
                    faces = result.0.face_count,
                    penetrating = result.0.penetrating_vertices,
                    max_depth = result.0.max_depth,
                    loss = result.0.loss,
                    "example_penalty"
                );
                Ok(result)
            })
            .collect::<PenetraResult<Vec<_>>>()?;

        let b = batch.len() as f64;
        let sum: f64 = results.iter().map(|(report, _)| report.loss).sum();
        let loss = sum / b * weight;

        tracing::info!(
            iteration,
            weight,
            examples = batch.len(),
            loss,
            search = self.search.name(),
            "collision_penalty"
        );

        let scale = (weight / b) as f32;
        let (examples, gradients): (Vec<ExampleReport>, Vec<Vec<Vec3>>) = results
            .into_iter()
            .map(|(report, grad)| {
                let grad = grad
                    .map(|g| g.into_iter().map(|v| v * scale).collect::<Vec<_>>())
                    .unwrap_or_default();
                (report, grad)
            })
            .unzip();

        Ok((
            PenaltyOutput {
                loss,
                weight,
                iteration,
                examples,
            },
            gradients,
        ))
    }

    /// Assumes `example` has already been validated.
    fn evaluate_example(
        &self,
        example: &Example,
        with_gradient: bool,
    ) -> PenetraResult<(ExampleReport, Option<Vec<Vec3>>)> {
        let policy = self.config.degenerate_faces;
        let obstacle = &example.obstacle;
        let current = FaceGeometry::compute(
            &obstacle.current.positions(),
            &obstacle.current.faces(),
            policy,
        )?;
        let target = FaceGeometry::compute(
            &obstacle.target.positions(),
            &obstacle.target.faces(),
            policy,
        )?;

        let correspondence = Correspondence::find(
            self.search.as_ref(),
            &example.cloth.current_positions(),
            &current,
        )?;
        let (points, normals) = correspondence.gather_geometry(&target)?;

        let predicted = example.cloth.predicted_positions();
        let summary = self.metric.evaluate(&predicted, &points, &normals)?;
        let gradient = if with_gradient {
            Some(self.metric.gradient(&predicted, &points, &normals)?)
        } else {
            None
        };

        Ok((
            ExampleReport {
                vertex_count: example.cloth.vertex_count(),
                face_count: obstacle.face_count(),
                penetrating_vertices: summary.penetrating_vertices,
                max_depth: summary.max_depth,
                loss: summary.loss,
            },
            gradient,
        ))
    }
}
