//! Procedural tile-map generation split into coherent submodules.
//!
//! Stages run in a fixed order per level: hub layout, links, hazards,
//! smoothing, connectivity repair, then freezing and placement sampling.

pub mod config;
pub mod connect;
pub mod grid;
pub mod model;
pub mod progression;
pub mod refine;
pub mod seed;
pub mod shapes;
pub mod spawns;
pub mod tunnel;
pub mod validate;

mod generator;

pub use config::{BiomeConfig, ConfigError, Recipe, TerrainTable};
pub use generator::LevelGenerator;
pub use grid::{Grid, GridBuilder, TerrainView};
pub use model::Level;
pub use seed::{GenRng, derive_level_seed};

use crate::types::Biome;

/// Generates one level of `biome` from its built-in preset.
pub fn generate(biome: Biome, seed: u64) -> Level {
    LevelGenerator::for_biome(biome).generate(seed)
}

/// Generates level `level_index` of the run started with `run_seed`.
///
/// The biome follows [`progression::biome_for_level`]; the level seed mixes
/// the run seed, the index, and the biome.
pub fn generate_level(run_seed: u64, level_index: u32) -> Level {
    let config = progression::config_for_level(level_index);
    let seed = derive_level_seed(run_seed, level_index, config.biome);
    LevelGenerator::from_preset(config).generate(seed)
}
