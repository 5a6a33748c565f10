//! High-level generation entry point that validates a biome config once and builds levels from it.

mod hazards;
mod pipeline;
mod recipes;

use crate::types::Biome;

use super::config::{BiomeConfig, ConfigError};
use super::model::Level;

/// Builds levels for one biome configuration. Each call to
/// [`LevelGenerator::generate`] owns its own random stream, so one generator
/// can serve several threads at once.
#[derive(Clone, Debug)]
pub struct LevelGenerator {
    config: BiomeConfig,
}

impl LevelGenerator {
    pub fn new(config: BiomeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Generator backed by the built-in preset for `biome`.
    pub fn for_biome(biome: Biome) -> Self {
        Self { config: BiomeConfig::preset(biome) }
    }

    /// Skips validation for configs derived from a preset.
    pub(super) fn from_preset(config: BiomeConfig) -> Self {
        debug_assert_eq!(config.validate(), Ok(()));
        Self { config }
    }

    pub fn config(&self) -> &BiomeConfig {
        &self.config
    }

    pub fn generate(&self, seed: u64) -> Level {
        pipeline::build_level(&self.config, seed)
    }
}
