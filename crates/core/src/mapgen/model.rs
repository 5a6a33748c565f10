//! The generated level and the read-only queries the rest of the game runs against it.

use xxhash_rust::xxh3::xxh3_64;

use crate::types::{Biome, Pos, Terrain};

use super::config::TerrainTable;
use super::grid::{Grid, TerrainView};
use super::seed::GenRng;
use super::spawns::{nearest_matching, sample_positions};

/// A finished level. Immutable once generated; share it freely between readers.
#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    pub(super) biome: Biome,
    pub(super) seed: u64,
    pub(super) grid: Grid,
    pub(super) terrain: TerrainTable,
    pub(super) hubs: Vec<Pos>,
    pub(super) special_hub: Option<usize>,
    pub(super) player_start: Pos,
    pub(super) portal: Pos,
    pub(super) entity_spawns: Vec<Pos>,
    pub(super) decorations: Vec<Pos>,
    pub(super) entity_exclusion_radius: f32,
}

impl Level {
    pub fn biome(&self) -> Biome {
        self.biome
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn terrain_table(&self) -> &TerrainTable {
        &self.terrain
    }

    /// Terrain at `(x, y)`; the biome's blocked code when out of range.
    pub fn terrain_at(&self, x: i32, y: i32) -> Terrain {
        self.grid.get(Pos::new(x, y))
    }

    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.terrain.is_walkable(self.terrain_at(x, y))
    }

    /// Exactly the complement of [`Level::is_walkable`]; out of range is always an obstacle.
    pub fn is_obstacle(&self, x: i32, y: i32) -> bool {
        !self.is_walkable(x, y)
    }

    pub fn is_hazard(&self, x: i32, y: i32) -> bool {
        self.terrain.is_hazard(self.terrain_at(x, y))
    }

    pub fn nearest_walkable(&self, pos: Pos) -> Option<Pos> {
        nearest_matching(&self.grid, pos, |terrain| self.terrain.is_walkable(terrain))
    }

    pub fn player_start_position(&self) -> Pos {
        self.player_start
    }

    pub fn portal_position(&self) -> Pos {
        self.portal
    }

    /// Hub anchors in placement order; the special hub, when present, is last.
    pub fn hub_list(&self) -> &[Pos] {
        &self.hubs
    }

    pub fn special_hub(&self) -> Option<Pos> {
        self.special_hub.and_then(|index| self.hubs.get(index).copied())
    }

    /// Spawn points drawn during generation.
    pub fn entity_spawns(&self) -> &[Pos] {
        &self.entity_spawns
    }

    pub fn decorations(&self) -> &[Pos] {
        &self.decorations
    }

    /// Fresh walkable positions at least `exclusion_radius` from the player start.
    ///
    /// Draws from the caller's stream, so repeated calls with a fresh
    /// `GenRng` of the same seed return the same positions.
    pub fn sample_entity_positions(
        &self,
        rng: &mut GenRng,
        count: usize,
        exclusion_radius: f32,
    ) -> Vec<Pos> {
        sample_positions(
            &self.grid,
            rng,
            |terrain| self.terrain.is_walkable(terrain),
            count,
            self.player_start,
            exclusion_radius,
        )
    }

    /// Exclusion radius the level used for its own entity spawns.
    pub fn entity_exclusion_radius(&self) -> f32 {
        self.entity_exclusion_radius
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.biome.name().as_bytes());
        bytes.extend(self.seed.to_le_bytes());
        bytes.extend((self.width() as u32).to_le_bytes());
        bytes.extend((self.height() as u32).to_le_bytes());
        bytes.extend(self.grid.cells().iter().map(|terrain| terrain.code()));

        push_positions(&mut bytes, &self.hubs);
        bytes.extend(self.special_hub.map_or(u32::MAX, |index| index as u32).to_le_bytes());
        push_position(&mut bytes, self.player_start);
        push_position(&mut bytes, self.portal);
        push_positions(&mut bytes, &self.entity_spawns);
        push_positions(&mut bytes, &self.decorations);
        bytes
    }

    /// xxh3 digest of [`Level::canonical_bytes`].
    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }

    /// One string per row: terrain glyphs with `@` at the start and `>` at the portal.
    pub fn ascii_rows(&self) -> Vec<String> {
        (0..self.height())
            .map(|y| {
                self.grid
                    .row(y)
                    .iter()
                    .enumerate()
                    .map(|(x, terrain)| {
                        let pos = Pos { y: y as i32, x: x as i32 };
                        if pos == self.player_start {
                            '@'
                        } else if pos == self.portal {
                            '>'
                        } else {
                            terrain.glyph()
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

fn push_position(bytes: &mut Vec<u8>, pos: Pos) {
    bytes.extend(pos.y.to_le_bytes());
    bytes.extend(pos.x.to_le_bytes());
}

fn push_positions(bytes: &mut Vec<u8>, positions: &[Pos]) {
    bytes.extend((positions.len() as u32).to_le_bytes());
    for &pos in positions {
        push_position(bytes, pos);
    }
}
