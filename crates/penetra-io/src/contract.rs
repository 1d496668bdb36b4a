//! Penalty input/output contract types.
//!
//! Batches travel as JSON; penalty configs as TOML. Both are plain serde
//! types so the CLI and external tooling share one format.

use std::path::Path;

use penetra_loss::{CollisionPenaltyConfig, Example, PenaltyOutput};
use penetra_types::{PenetraError, PenetraResult};
use serde::{Deserialize, Serialize};

/// One batch to evaluate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenaltyInput {
    /// Training iteration the loss weight is taken at.
    #[serde(default)]
    pub iteration: u64,

    /// Penalty parameters. `None` uses the defaults.
    #[serde(default)]
    pub config: Option<CollisionPenaltyConfig>,

    /// Independent cloth/obstacle pairs.
    pub examples: Vec<Example>,
}

impl PenaltyInput {
    pub fn new(iteration: u64, examples: Vec<Example>) -> Self {
        Self {
            iteration,
            config: None,
            examples,
        }
    }

    /// Parses a batch from JSON text.
    pub fn from_json(text: &str) -> PenetraResult<Self> {
        serde_json::from_str(text).map_err(|e| PenetraError::Serialization(e.to_string()))
    }

    /// Reads a batch from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> PenetraResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let input = Self::from_json(&text)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            examples = input.examples.len(),
            "loaded penalty input"
        );
        Ok(input)
    }

    pub fn to_json(&self) -> PenetraResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PenetraError::Serialization(e.to_string()))
    }

    /// Config to evaluate with: `overridden` if given, else the embedded
    /// one, else the defaults.
    pub fn resolve_config(
        &self,
        overridden: Option<CollisionPenaltyConfig>,
    ) -> CollisionPenaltyConfig {
        overridden
            .or_else(|| self.config.clone())
            .unwrap_or_default()
    }
}

/// Parses a penalty config from TOML text. Missing fields take defaults.
pub fn config_from_toml(text: &str) -> PenetraResult<CollisionPenaltyConfig> {
    toml::from_str(text).map_err(|e| PenetraError::Serialization(e.to_string()))
}

/// Reads a penalty config from a TOML file.
pub fn load_config(path: impl AsRef<Path>) -> PenetraResult<CollisionPenaltyConfig> {
    let text = std::fs::read_to_string(path)?;
    config_from_toml(&text)
}

/// Result of one evaluation, as written by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenaltyReport {
    /// Loss name (`collision_penalty`).
    pub name: String,

    /// Correspondence search that produced the result.
    pub search: String,

    /// Loss, weight, and per-example diagnostics.
    #[serde(flatten)]
    pub output: PenaltyOutput,
}

impl PenaltyReport {
    pub fn to_json(&self) -> PenetraResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PenetraError::Serialization(e.to_string()))
    }

    /// Writes the report as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> PenetraResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
