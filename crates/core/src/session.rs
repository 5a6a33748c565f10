//! One run's level lifecycle: a single live level, replaced whenever the player descends.

use crate::mapgen::{Level, generate_level};
use crate::types::Biome;

#[derive(Clone, Debug)]
pub struct LevelSession {
    run_seed: u64,
    level_index: u32,
    level: Level,
}

impl LevelSession {
    /// Starts a run at level 0.
    pub fn enter(run_seed: u64) -> Self {
        Self::enter_at(run_seed, 0)
    }

    pub fn enter_at(run_seed: u64, level_index: u32) -> Self {
        Self { run_seed, level_index, level: generate_level(run_seed, level_index) }
    }

    /// Replaces the current level with the next one. The old level is dropped.
    pub fn descend(&mut self) -> &Level {
        self.level_index = self.level_index.saturating_add(1);
        self.level = generate_level(self.run_seed, self.level_index);
        &self.level
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn level_index(&self) -> u32 {
        self.level_index
    }

    pub fn run_seed(&self) -> u64 {
        self.run_seed
    }

    pub fn biome(&self) -> Biome {
        self.level.biome()
    }

    /// Hands the current level to a consumer that outlives the session.
    pub fn into_level(self) -> Level {
        self.level
    }
}
