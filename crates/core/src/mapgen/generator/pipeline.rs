//! Level-construction pipeline that composes the mapgen stages in a fixed order.

use tracing::{debug, debug_span, info, warn};

use crate::types::{Pos, Terrain};

use super::super::config::{BiomeConfig, SpawnParams, TerrainTable};
use super::super::connect::{carve_links, plan_links};
use super::super::grid::{Grid, GridBuilder, TerrainView, farthest_matching_tile};
use super::super::model::Level;
use super::super::refine::refine_terrain;
use super::super::seed::GenRng;
use super::super::spawns::{player_start, sample_positions};
use super::super::validate::{repair_connectivity, unreachable_hubs};
use super::hazards::{HazardContext, place_hazards};
use super::recipes::lay_out_hubs;

/// hubs → links → hazards → smoothing → repair → freeze → placements.
pub(super) fn build_level(config: &BiomeConfig, seed: u64) -> Level {
    let _span = debug_span!("generate", biome = %config.biome, seed).entered();
    let table = &config.terrain;
    let mut rng = GenRng::from_seed(seed);
    let mut grid =
        GridBuilder::new(config.width, config.height, table.background).with_blocked(table.blocked);

    let layout = lay_out_hubs(&mut grid, &mut rng, config);
    debug!(
        recipe = config.recipe.name(),
        hubs = layout.hubs.len(),
        special = layout.special.is_some(),
        carved = layout.carved_cells,
        "hubs placed"
    );

    let links = config.recipe.links();
    let edges = plan_links(&layout.hubs, layout.special, links, &mut rng);
    carve_links(&mut grid, &mut rng, &layout.hubs, &edges, links, table, config.border);
    debug!(edges = edges.len(), "links carved");

    if let Some(pools) = config.recipe.pools() {
        let source = layout.special.map(|index| layout.hubs[index]);
        let report = place_hazards(&mut HazardContext {
            grid: &mut grid,
            rng: &mut rng,
            params: pools,
            table,
            border: config.border,
            hubs: &layout.hubs,
            source,
        });
        debug!(
            fill = ?pools.fill,
            pools = report.pools,
            pool_cells = report.pool_cells,
            flows = report.flows,
            halted = report.halted_flows,
            "hazards placed"
        );
    }

    let smoothing = refine_terrain(&mut grid, table, config.smoothing_passes, config.border);
    debug!(opened = smoothing.opened, closed = smoothing.closed, "terrain smoothed");

    let repair = repair_connectivity(&mut grid, &layout.hubs, table, config.border);
    if repair.touched_hubs() {
        warn!(
            reopened_hubs = repair.reopened_hubs,
            dug_hubs = repair.dug_hubs,
            dug_cells = repair.dug_cells,
            cleared_cells = repair.cleared_cells,
            "connectivity repaired"
        );
    } else if !repair.is_clean() {
        debug!(cleared_cells = repair.cleared_cells, "stray pockets cleared");
    }
    debug_assert!(
        unreachable_hubs(&grid, &layout.hubs, table.walkable).is_empty(),
        "every hub must be reachable from hub 0 after repair"
    );

    let grid = grid.freeze();
    let walkable = |terrain: Terrain| table.is_walkable(terrain);
    let start = player_start(&grid, &layout.hubs, walkable);
    let portal = portal_tile(&grid, &layout.hubs, start, table);

    let mut entity_spawns = scatter(&grid, &mut rng, &config.spawns, start, walkable);
    entity_spawns.retain(|&pos| pos != portal);
    let decorable = |terrain: Terrain| table.decorable.contains(terrain);
    let mut decorations = scatter(&grid, &mut rng, &config.decorations, start, decorable);
    decorations.retain(|pos| *pos != portal && !entity_spawns.contains(pos));

    info!(
        biome = %config.biome,
        seed,
        hubs = layout.hubs.len(),
        walkable = grid.count_matching(walkable),
        spawns = entity_spawns.len(),
        decorations = decorations.len(),
        "level generated"
    );

    Level {
        biome: config.biome,
        seed,
        grid,
        terrain: *table,
        hubs: layout.hubs,
        special_hub: layout.special,
        player_start: start,
        portal,
        entity_spawns,
        decorations,
        entity_exclusion_radius: config.spawns.exclusion_radius,
    }
}

fn scatter(
    grid: &Grid,
    rng: &mut GenRng,
    params: &SpawnParams,
    start: Pos,
    predicate: impl Fn(Terrain) -> bool,
) -> Vec<Pos> {
    let count = rng.range_usize(params.count.min, params.count.max);
    sample_positions(grid, rng, predicate, count, start, params.exclusion_radius)
}

/// The hub farthest from `start`; the farthest walkable tile when no other hub exists.
fn portal_tile(grid: &Grid, hubs: &[Pos], start: Pos, table: &TerrainTable) -> Pos {
    hubs.iter()
        .copied()
        .filter(|&hub| hub != start && table.is_walkable(grid.get(hub)))
        .max_by_key(|&hub| (hub.distance_squared(start), hub))
        .unwrap_or_else(|| {
            farthest_matching_tile(grid, start, |terrain| table.is_walkable(terrain))
        })
}
