//! Run progression: which biome each level uses and how spawn pressure grows with depth.

use crate::types::Biome;

use super::config::{BiomeConfig, Span};

/// Order in which a run visits the biomes; it wraps around into the next depth tier.
pub const BIOME_ROTATION: [Biome; 11] = [
    Biome::Meadow,
    Biome::Forest,
    Biome::Swamp,
    Biome::Cave,
    Biome::IceCavern,
    Biome::Crypt,
    Biome::Dungeon,
    Biome::Castle,
    Biome::SkyIslands,
    Biome::Volcano,
    Biome::WorldMap,
];

/// Extra spawn pressure per completed rotation, in percent.
const SPAWN_BONUS_PER_TIER: usize = 15;
const MAX_SPAWN_BONUS: usize = 100;

pub fn biome_for_level(level_index: u32) -> Biome {
    BIOME_ROTATION[level_index as usize % BIOME_ROTATION.len()]
}

/// Number of full rotations completed before `level_index`.
pub fn depth_tier(level_index: u32) -> u32 {
    level_index / BIOME_ROTATION.len() as u32
}

/// Preset for the level's biome with entity counts scaled by depth tier.
pub fn config_for_level(level_index: u32) -> BiomeConfig {
    let mut config = BiomeConfig::preset(biome_for_level(level_index));
    let bonus = (depth_tier(level_index) as usize * SPAWN_BONUS_PER_TIER).min(MAX_SPAWN_BONUS);
    config.spawns.count = scale_span(config.spawns.count, bonus);
    config
}

fn scale_span(span: Span<usize>, bonus_percent: usize) -> Span<usize> {
    Span::new(span.min + span.min * bonus_percent / 100, span.max + span.max * bonus_percent / 100)
}
