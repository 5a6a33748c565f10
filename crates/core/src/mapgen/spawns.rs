//! Placement sampling: player start, entity scatter, and decoration scatter.

use crate::types::{Pos, Terrain};

use super::grid::{TerrainView, position_of};
use super::seed::GenRng;

/// Draws up to `count` distinct cells matching `predicate`, none closer than
/// `exclusion_radius` to `exclusion_center`.
///
/// Candidates are drawn without replacement; a rejected draw is discarded and
/// does not count. Returns fewer than `count` positions when the pool runs out.
pub fn sample_positions(
    view: &impl TerrainView,
    rng: &mut GenRng,
    predicate: impl Fn(Terrain) -> bool,
    count: usize,
    exclusion_center: Pos,
    exclusion_radius: f32,
) -> Vec<Pos> {
    let mut pool: Vec<Pos> = view
        .cells()
        .iter()
        .enumerate()
        .filter(|(_, terrain)| predicate(**terrain))
        .map(|(index, _)| position_of(view.width(), index))
        .collect();
    let radius = f64::from(exclusion_radius.max(0.0));
    let radius_squared = radius * radius;

    let mut accepted = Vec::with_capacity(count.min(pool.len()));
    while accepted.len() < count && !pool.is_empty() {
        let candidate = pool.swap_remove(rng.index(pool.len()));
        if candidate.distance_squared(exclusion_center) as f64 >= radius_squared {
            accepted.push(candidate);
        }
    }
    accepted
}

/// Closest cell matching `predicate`, searching Chebyshev rings outward from `from`.
///
/// Within the first ring holding a match the smallest Euclidean distance wins,
/// then the smaller `(y, x)`.
pub fn nearest_matching(
    view: &impl TerrainView,
    from: Pos,
    predicate: impl Fn(Terrain) -> bool,
) -> Option<Pos> {
    let max_radius = view.width().max(view.height()) as i32;
    for radius in 0..=max_radius {
        let mut best: Option<(i64, Pos)> = None;
        for pos in ring(from, radius) {
            if !view.in_bounds(pos) || !predicate(view.get(pos)) {
                continue;
            }
            let candidate = (pos.distance_squared(from), pos);
            if best.is_none_or(|current| candidate < current) {
                best = Some(candidate);
            }
        }
        if let Some((_, pos)) = best {
            return Some(pos);
        }
    }
    None
}

fn ring(center: Pos, radius: i32) -> impl Iterator<Item = Pos> {
    (-radius..=radius).flat_map(move |dy| {
        (-radius..=radius)
            .filter(move |dx| dx.abs() == radius || dy.abs() == radius)
            .map(move |dx| Pos { y: center.y + dy, x: center.x + dx })
    })
}

/// Hub 0 when there is one, else the walkable cell nearest the map center,
/// else the center itself.
pub fn player_start(
    view: &impl TerrainView,
    hubs: &[Pos],
    walkable: impl Fn(Terrain) -> bool,
) -> Pos {
    let center = Pos { y: view.height() as i32 / 2, x: view.width() as i32 / 2 };
    let origin = hubs.first().copied().unwrap_or(center);
    if view.in_bounds(origin) && walkable(view.get(origin)) {
        return origin;
    }
    nearest_matching(view, origin, walkable).unwrap_or(center)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::collection::vec;
    use proptest::prelude::*;

    use super::*;
    use crate::mapgen::grid::GridBuilder;

    fn is_floor(terrain: Terrain) -> bool {
        terrain == Terrain::Floor
    }

    fn outside(pos: Pos, center: Pos, radius: f32) -> bool {
        pos.distance_squared(center) as f64 >= f64::from(radius) * f64::from(radius)
    }

    #[test]
    fn small_pool_is_returned_whole() {
        let mut grid = GridBuilder::new(10, 10, Terrain::Wall);
        for x in 2..6 {
            grid.set(Pos::new(x, 4), Terrain::Floor);
        }
        let mut rng = GenRng::from_seed(2);
        let picked = sample_positions(&grid, &mut rng, is_floor, 50, Pos::new(0, 0), 0.0);
        let unique: BTreeSet<Pos> = picked.iter().copied().collect();
        assert_eq!(picked.len(), 4);
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn everything_inside_the_exclusion_radius_yields_nothing() {
        let grid = GridBuilder::new(6, 6, Terrain::Floor);
        let mut rng = GenRng::from_seed(5);
        let picked = sample_positions(&grid, &mut rng, is_floor, 10, Pos::new(3, 3), 20.0);
        assert!(picked.is_empty());
    }

    #[test]
    fn ring_search_finds_the_closest_walkable_cell() {
        let mut grid = GridBuilder::new(21, 21, Terrain::Wall);
        grid.set(Pos::new(16, 10), Terrain::Floor);
        grid.set(Pos::new(13, 13), Terrain::Floor);
        assert_eq!(nearest_matching(&grid, Pos::new(10, 10), is_floor), Some(Pos::new(13, 13)));

        let empty = GridBuilder::new(5, 5, Terrain::Wall);
        assert_eq!(nearest_matching(&empty, Pos::new(2, 2), is_floor), None);
    }

    #[test]
    fn player_start_prefers_hub_zero_then_center_search_then_center() {
        let mut grid = GridBuilder::new(20, 20, Terrain::Wall);
        grid.set(Pos::new(4, 4), Terrain::Floor);
        grid.set(Pos::new(12, 10), Terrain::Floor);
        assert_eq!(player_start(&grid, &[Pos::new(4, 4)], is_floor), Pos::new(4, 4));
        assert_eq!(player_start(&grid, &[], is_floor), Pos::new(12, 10));

        let solid = GridBuilder::new(20, 20, Terrain::Wall);
        assert_eq!(player_start(&solid, &[], is_floor), Pos::new(10, 10));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]
        #[test]
        fn samples_are_distinct_bounded_and_outside_the_exclusion(
            seed in any::<u64>(),
            count in 0_usize..80,
            center_x in 0_i32..30,
            center_y in 0_i32..20,
            radius in 0.0_f32..25.0,
            open_cells in vec((0_i32..30, 0_i32..20), 0..200),
        ) {
            let mut grid = GridBuilder::new(30, 20, Terrain::Wall);
            for (x, y) in open_cells {
                grid.set(Pos::new(x, y), Terrain::Floor);
            }
            let center = Pos::new(center_x, center_y);
            let eligible = grid
                .cells()
                .iter()
                .enumerate()
                .filter(|(index, terrain)| {
                    is_floor(**terrain) && outside(position_of(30, *index), center, radius)
                })
                .count();

            let mut rng = GenRng::from_seed(seed);
            let picked = sample_positions(&grid, &mut rng, is_floor, count, center, radius);
            let unique: BTreeSet<Pos> = picked.iter().copied().collect();

            prop_assert_eq!(unique.len(), picked.len());
            prop_assert_eq!(picked.len(), count.min(eligible));
            for pos in picked {
                prop_assert!(is_floor(grid.get(pos)));
                prop_assert!(outside(pos, center, radius));
            }
        }
    }
}
