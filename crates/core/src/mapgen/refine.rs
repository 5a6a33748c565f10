//! Cellular smoothing that rounds off carved edges, followed by border re-enforcement.

use crate::types::{Pos, Terrain, TerrainSet};

use super::config::TerrainTable;
use super::grid::{GridBuilder, TerrainView};
use super::shapes::enforce_border;

const OPEN_THRESHOLD: usize = 6;
const CLOSE_THRESHOLD: usize = 2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SmoothStats {
    pub opened: usize,
    pub closed: usize,
}

/// Runs `passes` smoothing passes over interior cells.
///
/// A `blocked_code` cell with at least six `walkable_code` Moore neighbours
/// opens; a `walkable_code` cell with two or fewer closes. Hazard cells are
/// never read as candidates and never written. Each pass reads a snapshot
/// taken before the pass, so the result does not depend on scan order.
pub fn smooth(
    grid: &mut GridBuilder,
    passes: u32,
    walkable_code: Terrain,
    blocked_code: Terrain,
    hazard_codes: TerrainSet,
    margin: i32,
) -> SmoothStats {
    let mut stats = SmoothStats::default();
    let width = grid.width() as i32;
    let height = grid.height() as i32;

    for _ in 0..passes {
        let snapshot = grid.clone();
        for y in margin..height - margin {
            for x in margin..width - margin {
                let pos = Pos { y, x };
                let current = snapshot.get(pos);
                if hazard_codes.contains(current) {
                    continue;
                }
                if current == blocked_code {
                    let open = snapshot.count_neighbors(pos, |terrain| terrain == walkable_code);
                    if open >= OPEN_THRESHOLD {
                        grid.set(pos, walkable_code);
                        stats.opened += 1;
                    }
                } else if current == walkable_code {
                    let open = snapshot.count_neighbors(pos, |terrain| terrain == walkable_code);
                    if open <= CLOSE_THRESHOLD {
                        grid.set(pos, blocked_code);
                        stats.closed += 1;
                    }
                }
            }
        }
    }
    stats
}

/// Smooths with the biome's floor and background codes, then restores the border ring.
pub(crate) fn refine_terrain(
    grid: &mut GridBuilder,
    table: &TerrainTable,
    passes: u32,
    border: i32,
) -> SmoothStats {
    let stats = smooth(grid, passes, table.floor, table.background, table.hazards, border);
    enforce_border(grid, border, table.blocked);
    stats
}
