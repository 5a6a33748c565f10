//! Hazard pools and the flows that feed them (lava runs, rivers).

use crate::types::{Pos, TerrainSet};

use super::super::config::{PoolParams, TerrainTable};
use super::super::grid::{GridBuilder, TerrainView};
use super::super::seed::GenRng;
use super::super::shapes::{carve_blob, place_blobs};
use super::super::tunnel::{CarveRule, PathOutcome, carve_path};

pub(super) struct HazardContext<'a> {
    pub(super) grid: &'a mut GridBuilder,
    pub(super) rng: &'a mut GenRng,
    pub(super) params: &'a PoolParams,
    pub(super) table: &'a TerrainTable,
    pub(super) border: i32,
    pub(super) hubs: &'a [Pos],
    /// Where flows start; a random near-edge point when absent.
    pub(super) source: Option<Pos>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) struct HazardReport {
    pub(super) pools: usize,
    pub(super) pool_cells: usize,
    pub(super) flows: usize,
    pub(super) halted_flows: usize,
}

/// Pools only replace the background code and flows only run through it, so
/// hazards laid after the links never cut a corridor or a hub.
pub(super) fn place_hazards(context: &mut HazardContext<'_>) -> HazardReport {
    let mut report = HazardReport::default();
    let background = TerrainSet::of(&[context.table.background]);
    let width = context.grid.width();
    let height = context.grid.height();

    let pools = place_blobs(
        context.rng,
        width,
        height,
        &context.params.pools,
        context.border,
        context.hubs,
    );
    for pool in &pools {
        report.pool_cells += carve_blob(
            context.grid,
            context.rng,
            pool,
            context.params.fill,
            background,
            context.border,
        );
    }
    report.pools = pools.len();

    let flow_count = context.rng.range_usize(context.params.flows.min, context.params.flows.max);
    let protected = TerrainSet::all().without(context.table.background);
    for _ in 0..flow_count {
        let from = match context.source {
            Some(source) => source,
            None => near_edge_point(context.rng, width, height, context.border),
        };
        let to = if pools.is_empty() {
            interior_point(context.rng, width, height, context.border)
        } else {
            pools[context.rng.index(pools.len())].center
        };
        let flow_width =
            context.rng.range_i32(context.params.flow_width.min, context.params.flow_width.max);
        let rule = CarveRule::corridor(
            context.params.fill,
            flow_width,
            context.params.flow_windiness,
            protected,
        )
        .with_margin(context.border)
        .halting_near(context.params.flows_halt_near);

        if let PathOutcome::Halted(_) = carve_path(context.grid, context.rng, from, to, &rule) {
            report.halted_flows += 1;
        }
        report.flows += 1;
    }
    report
}

fn interior_point(rng: &mut GenRng, width: usize, height: usize, border: i32) -> Pos {
    Pos {
        x: rng.range_i32(border + 1, (width as i32 - border - 2).max(border + 1)),
        y: rng.range_i32(border + 1, (height as i32 - border - 2).max(border + 1)),
    }
}

/// A point a few cells inside one randomly chosen edge.
fn near_edge_point(rng: &mut GenRng, width: usize, height: usize, border: i32) -> Pos {
    let inset = border + rng.range_i32(1, 3);
    let far_x = width as i32 - 1 - inset;
    let far_y = height as i32 - 1 - inset;
    let along = interior_point(rng, width, height, border);
    match rng.index(4) {
        0 => Pos { y: inset, x: along.x },
        1 => Pos { y: far_y, x: along.x },
        2 => Pos { y: along.y, x: inset },
        _ => Pos { y: along.y, x: far_x },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::config::{BiomeConfig, Recipe, Span};
    use crate::types::{Biome, Terrain};

    fn pool_params(biome: Biome) -> (BiomeConfig, PoolParams) {
        let config = BiomeConfig::preset(biome);
        let params = match &config.recipe {
            Recipe::CaveChambers(recipe) => recipe.pools,
            Recipe::ClearingsAndPaths(recipe) => recipe.water,
            _ => None,
        };
        let params = params.unwrap_or_else(|| panic!("{biome} has hazard pools"));
        (config, params)
    }

    #[test]
    fn hazards_never_overwrite_walkable_cells() {
        let (config, params) = pool_params(Biome::Volcano);
        let mut grid = GridBuilder::new(config.width, config.height, config.terrain.background);
        for y in 20..40 {
            for x in 10..170 {
                grid.set(Pos::new(x, y), Terrain::Floor);
            }
        }
        let before = grid.count_matching(|terrain| terrain == Terrain::Floor);

        for seed in 0..8 {
            let mut rng = GenRng::from_seed(seed);
            let mut working = grid.clone();
            let report = place_hazards(&mut HazardContext {
                grid: &mut working,
                rng: &mut rng,
                params: &params,
                table: &config.terrain,
                border: config.border,
                hubs: &[],
                source: Some(Pos::new(90, 30)),
            });
            assert_eq!(working.count_matching(|terrain| terrain == Terrain::Floor), before);
            assert!(report.pools > 0);
            assert!(working.count_matching(|terrain| terrain == Terrain::Lava) > 0);
        }
    }

    #[test]
    fn rivers_stop_at_existing_water() {
        let (config, mut params) = pool_params(Biome::Forest);
        params.flows = Span::new(3, 3);
        let mut halted = 0;
        for seed in 0..6 {
            let mut grid = GridBuilder::new(config.width, config.height, config.terrain.background);
            let mut rng = GenRng::from_seed(seed);
            let report = place_hazards(&mut HazardContext {
                grid: &mut grid,
                rng: &mut rng,
                params: &params,
                table: &config.terrain,
                border: config.border,
                hubs: &[],
                source: None,
            });
            assert_eq!(report.flows, 3);
            halted += report.halted_flows;
        }
        assert!(halted > 0, "at least one river should end at a pond");
    }
}
