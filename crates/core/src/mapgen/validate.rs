//! Flood-fill reachability checks and the post-refine connectivity repair.

use std::collections::VecDeque;

use crate::types::{Pos, Terrain, TerrainSet};

use super::config::TerrainTable;
use super::grid::{GridBuilder, TerrainView, cell_index, position_of};

/// 4-connected flood fill over cells whose code is in `passable`.
///
/// Returns one flag per cell in row-major order. Everything is `false` when
/// `start` itself is not passable.
pub fn reachable_from(view: &impl TerrainView, start: Pos, passable: TerrainSet) -> Vec<bool> {
    let mut seen = vec![false; view.width() * view.height()];
    let Some(start_index) = cell_index(view.width(), view.height(), start) else {
        return seen;
    };
    if !passable.contains(view.cells()[start_index]) {
        return seen;
    }

    seen[start_index] = true;
    let mut open = VecDeque::from([start]);
    while let Some(pos) = open.pop_front() {
        for next in pos.orthogonal_neighbors() {
            let Some(index) = cell_index(view.width(), view.height(), next) else {
                continue;
            };
            if seen[index] || !passable.contains(view.cells()[index]) {
                continue;
            }
            seen[index] = true;
            open.push_back(next);
        }
    }
    seen
}

/// Indices of hubs a flood fill from hub 0 does not reach.
pub fn unreachable_hubs(view: &impl TerrainView, hubs: &[Pos], passable: TerrainSet) -> Vec<usize> {
    let Some(&origin) = hubs.first() else {
        return Vec::new();
    };
    let reach = reachable_from(view, origin, passable);
    hubs.iter()
        .enumerate()
        .filter(|(_, hub)| {
            cell_index(view.width(), view.height(), **hub).is_none_or(|index| !reach[index])
        })
        .map(|(index, _)| index)
        .collect()
}

/// Number of 4-connected regions formed by `passable` cells.
pub fn count_regions(view: &impl TerrainView, passable: TerrainSet) -> usize {
    let mut seen = vec![false; view.width() * view.height()];
    let mut regions = 0;
    for index in 0..seen.len() {
        if seen[index] || !passable.contains(view.cells()[index]) {
            continue;
        }
        regions += 1;
        let reach = reachable_from(view, position_of(view.width(), index), passable);
        for (flag, reached) in seen.iter_mut().zip(reach) {
            *flag |= reached;
        }
    }
    regions
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct RepairReport {
    pub(crate) reopened_hubs: usize,
    pub(crate) dug_hubs: usize,
    pub(crate) dug_cells: usize,
    pub(crate) cleared_cells: usize,
}

impl RepairReport {
    pub(crate) fn is_clean(&self) -> bool {
        *self == Self::default()
    }

    /// A hub had to be reopened or dug to; stray pocket clearing alone does not count.
    pub(crate) fn touched_hubs(&self) -> bool {
        self.reopened_hubs > 0 || self.dug_hubs > 0
    }
}

/// Makes every hub reachable from hub 0 and clears walkable pockets no hub can reach.
///
/// Hub cells lost to smoothing are reopened. A hub still cut off gets a
/// breadth-first dig toward the reached region, first around hazards and
/// only through them when nothing else works. Stray walkable cells left
/// unreached afterwards are turned back into the blocked code.
pub(crate) fn repair_connectivity(
    grid: &mut GridBuilder,
    hubs: &[Pos],
    table: &TerrainTable,
    margin: i32,
) -> RepairReport {
    let mut report = RepairReport::default();
    let Some(&origin) = hubs.first() else {
        return report;
    };

    for &hub in hubs {
        if !table.is_walkable(grid.get(hub)) && grid.is_interior(hub, margin) {
            grid.set(hub, table.floor);
            report.reopened_hubs += 1;
        }
    }

    let mut reach = reachable_from(grid, origin, table.walkable);
    for &hub in hubs.iter().skip(1) {
        let Some(hub_index) = cell_index(grid.width(), grid.height(), hub) else {
            continue;
        };
        if reach[hub_index] {
            continue;
        }
        let route = dig_route(grid, hub, &reach, table.hazards, margin)
            .or_else(|| dig_route(grid, hub, &reach, TerrainSet::EMPTY, margin));
        let Some(route) = route else {
            continue;
        };
        for pos in route {
            if !table.is_walkable(grid.get(pos)) {
                grid.set(pos, table.corridor);
                report.dug_cells += 1;
            }
        }
        report.dug_hubs += 1;
        reach = reachable_from(grid, origin, table.walkable);
    }

    for (index, reached) in reach.iter().enumerate() {
        let pos = position_of(grid.width(), index);
        if !reached && table.is_walkable(grid.get(pos)) {
            grid.set(pos, table.blocked);
            report.cleared_cells += 1;
        }
    }
    report
}

/// Shortest route from `from` to any reached cell, avoiding `avoid` and the margin.
fn dig_route(
    grid: &GridBuilder,
    from: Pos,
    reach: &[bool],
    avoid: TerrainSet,
    margin: i32,
) -> Option<Vec<Pos>> {
    let width = grid.width();
    let start = cell_index(width, grid.height(), from)?;
    let mut parent = vec![usize::MAX; reach.len()];
    parent[start] = start;
    let mut open = VecDeque::from([from]);

    while let Some(pos) = open.pop_front() {
        for next in pos.orthogonal_neighbors() {
            if !grid.is_interior(next, margin) {
                continue;
            }
            let Some(index) = cell_index(width, grid.height(), next) else {
                continue;
            };
            if parent[index] != usize::MAX || avoid.contains(grid.get(next)) {
                continue;
            }
            parent[index] = cell_index(width, grid.height(), pos).unwrap_or(start);
            if reach[index] {
                return Some(walk_back(width, &parent, index, start));
            }
            open.push_back(next);
        }
    }
    None
}

fn walk_back(width: usize, parent: &[usize], end: usize, start: usize) -> Vec<Pos> {
    let mut route = Vec::new();
    let mut cursor = end;
    while cursor != start {
        route.push(position_of(width, cursor));
        cursor = parent[cursor];
    }
    route.push(position_of(width, start));
    route
}

/// True when every in-range cell within `thickness` of the edge holds `code`.
pub fn border_is_intact(view: &impl TerrainView, thickness: i32, code: Terrain) -> bool {
    view.cells().iter().enumerate().all(|(index, &terrain)| {
        let pos = position_of(view.width(), index);
        view.is_interior(pos, thickness) || terrain == code
    })
}
