//! Meandering corridor carver shared by tunnels, paths, bridges, rivers, and lava flows.

use std::collections::BTreeSet;

use crate::types::{Pos, Terrain, TerrainSet};

use super::grid::{GridBuilder, TerrainView};
use super::seed::GenRng;

const STEP_LENGTH: f32 = 1.5;
const ARRIVAL_DISTANCE: f32 = 3.0;
const WANDER_FREQUENCY: f32 = 0.12;
const JITTER: f32 = 0.25;

/// How a single path is painted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarveRule {
    pub fill: Terrain,
    /// Radius of the disk stamped at every step.
    pub width: i32,
    pub windiness: f32,
    /// Codes the path never overwrites.
    pub protected: TerrainSet,
    /// The walk stops once its disk would touch one of these codes it did not paint itself.
    pub halt_near: TerrainSet,
    /// Cells closer than this to the edge are never touched.
    pub margin: i32,
}

impl CarveRule {
    pub fn corridor(fill: Terrain, width: i32, windiness: f32, protected: TerrainSet) -> Self {
        Self { fill, width, windiness, protected, halt_near: TerrainSet::EMPTY, margin: 1 }
    }

    pub fn with_margin(mut self, margin: i32) -> Self {
        self.margin = margin;
        self
    }

    pub fn halting_near(mut self, halt_near: TerrainSet) -> Self {
        self.halt_near = halt_near;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathOutcome {
    Arrived,
    /// Stopped early next to a `halt_near` cell; holds the last cursor cell.
    Halted(Pos),
}

struct Walk<'a> {
    grid: &'a mut GridBuilder,
    rule: &'a CarveRule,
    painted: BTreeSet<Pos>,
}

impl Walk<'_> {
    fn should_halt(&self, center: Pos) -> bool {
        if self.rule.halt_near.is_empty() {
            return false;
        }
        disk(center, self.rule.width).any(|pos| {
            self.grid.is_interior(pos, self.rule.margin)
                && self.rule.halt_near.contains(self.grid.get(pos))
                && !self.painted.contains(&pos)
        })
    }

    fn stamp(&mut self, center: Pos) {
        for pos in disk(center, self.rule.width) {
            if !self.grid.is_interior(pos, self.rule.margin) {
                continue;
            }
            if self.rule.protected.contains(self.grid.get(pos)) {
                continue;
            }
            self.grid.set(pos, self.rule.fill);
            if !self.rule.halt_near.is_empty() {
                self.painted.insert(pos);
            }
        }
    }
}

fn disk(center: Pos, radius: i32) -> impl Iterator<Item = Pos> {
    let radius = radius.max(0);
    (-radius..=radius).flat_map(move |dy| {
        (-radius..=radius)
            .filter(move |dx| dx * dx + dy * dy <= radius * radius)
            .map(move |dx| Pos { y: center.y + dy, x: center.x + dx })
    })
}

/// Carves a corridor from `from` to `to`.
///
/// A floating cursor seeks the target in 1.5-cell steps. Each step mixes the
/// direct heading with a perpendicular sway of `sin(|cursor| * k) * windiness`
/// and a little per-axis jitter. The seek loop is capped at
/// `8 * manhattan / step` iterations; whatever distance remains afterwards is
/// covered by a straight approach that always ends on `to`. Consecutive disk
/// centers are joined cell by cell, so a width of 1 or more never leaves a gap.
pub fn carve_path(
    grid: &mut GridBuilder,
    rng: &mut GenRng,
    from: Pos,
    to: Pos,
    rule: &CarveRule,
) -> PathOutcome {
    let low = rule.margin as f32;
    let high_x = (grid.width() as i32 - 1 - rule.margin) as f32;
    let high_y = (grid.height() as i32 - 1 - rule.margin) as f32;
    let iteration_cap = ((8 * from.manhattan(to)) as f32 / STEP_LENGTH).ceil() as usize + 1;

    let mut walk = Walk { grid, rule, painted: BTreeSet::new() };
    let target = (to.x as f32, to.y as f32);
    let mut cursor = (from.x as f32, from.y as f32);
    let mut last = from;

    for _ in 0..iteration_cap {
        let (to_x, to_y) = (target.0 - cursor.0, target.1 - cursor.1);
        let remaining = (to_x * to_x + to_y * to_y).sqrt();
        if remaining <= ARRIVAL_DISTANCE {
            break;
        }

        let center = round(cursor);
        if let Some(stop) = trace(&mut walk, last, center) {
            return PathOutcome::Halted(stop);
        }
        last = center;

        let direct = (to_x / remaining, to_y / remaining);
        let perpendicular = (-direct.1, direct.0);
        let cursor_length = (cursor.0 * cursor.0 + cursor.1 * cursor.1).sqrt();
        let sway = (cursor_length * WANDER_FREQUENCY).sin() * rule.windiness;
        let heading = (
            direct.0 + perpendicular.0 * sway + rng.range_f32(-JITTER, JITTER),
            direct.1 + perpendicular.1 * sway + rng.range_f32(-JITTER, JITTER),
        );
        let heading_length = (heading.0 * heading.0 + heading.1 * heading.1).sqrt();
        let heading = if heading_length > f32::EPSILON {
            (heading.0 / heading_length, heading.1 / heading_length)
        } else {
            direct
        };

        cursor = (
            (cursor.0 + heading.0 * STEP_LENGTH).clamp(low, high_x.max(low)),
            (cursor.1 + heading.1 * STEP_LENGTH).clamp(low, high_y.max(low)),
        );
    }

    match trace(&mut walk, last, to) {
        Some(stop) => PathOutcome::Halted(stop),
        None => PathOutcome::Arrived,
    }
}

/// Stamps every cell on the straight line from `start` to `end`, so that
/// consecutive stamps always overlap. Returns the cell where a halt happened.
fn trace(walk: &mut Walk<'_>, start: Pos, end: Pos) -> Option<Pos> {
    let steps = start.x.abs_diff(end.x).max(start.y.abs_diff(end.y)).max(1);
    for step in 0..=steps {
        let t = step as f32 / steps as f32;
        let center = Pos {
            y: (start.y as f32 + (end.y - start.y) as f32 * t).round() as i32,
            x: (start.x as f32 + (end.x - start.x) as f32 * t).round() as i32,
        };
        if walk.should_halt(center) {
            return Some(center);
        }
        walk.stamp(center);
    }
    None
}

fn round(point: (f32, f32)) -> Pos {
    Pos { y: point.1.round() as i32, x: point.0.round() as i32 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::validate::reachable_from;

    const WALKABLE: TerrainSet = TerrainSet::of(&[Terrain::Floor]);

    #[test]
    fn carved_path_links_both_endpoints() {
        for seed in 0..20 {
            let mut grid = GridBuilder::new(60, 40, Terrain::Wall);
            let mut rng = GenRng::from_seed(seed);
            let from = Pos::new(5, 5);
            let to = Pos::new(52, 33);
            let rule = CarveRule::corridor(Terrain::Floor, 1, 0.8, TerrainSet::EMPTY);
            assert_eq!(carve_path(&mut grid, &mut rng, from, to, &rule), PathOutcome::Arrived);

            let reach = reachable_from(&grid, from, WALKABLE);
            assert!(reach[(to.y as usize) * 60 + to.x as usize], "seed {seed} left a gap");
        }
    }

    #[test]
    fn protected_cells_survive_the_path() {
        let mut grid = GridBuilder::new(40, 20, Terrain::Wall);
        for y in 1..19 {
            grid.set(Pos::new(20, y), Terrain::Lava);
        }
        let mut rng = GenRng::from_seed(3);
        let rule = CarveRule::corridor(Terrain::Floor, 2, 0.5, TerrainSet::of(&[Terrain::Lava]));
        carve_path(&mut grid, &mut rng, Pos::new(4, 10), Pos::new(35, 10), &rule);

        for y in 1..19 {
            assert_eq!(grid.get(Pos::new(20, y)), Terrain::Lava);
        }
        assert_eq!(grid.get(Pos::new(4, 10)), Terrain::Floor);
        assert_eq!(grid.get(Pos::new(35, 10)), Terrain::Floor);
    }

    #[test]
    fn path_never_touches_the_margin() {
        let mut grid = GridBuilder::new(30, 30, Terrain::Wall);
        let mut rng = GenRng::from_seed(11);
        let rule = CarveRule::corridor(Terrain::Floor, 3, 2.0, TerrainSet::EMPTY).with_margin(2);
        carve_path(&mut grid, &mut rng, Pos::new(3, 3), Pos::new(26, 26), &rule);

        for index in 0..30 {
            for ring in 0..2 {
                assert_eq!(grid.get(Pos::new(index, ring)), Terrain::Wall);
                assert_eq!(grid.get(Pos::new(ring, index)), Terrain::Wall);
                assert_eq!(grid.get(Pos::new(index, 29 - ring)), Terrain::Wall);
                assert_eq!(grid.get(Pos::new(29 - ring, index)), Terrain::Wall);
            }
        }
    }

    #[test]
    fn extreme_windiness_still_terminates_and_arrives() {
        let mut grid = GridBuilder::new(80, 60, Terrain::Wall);
        let mut rng = GenRng::from_seed(5);
        let rule = CarveRule::corridor(Terrain::Floor, 0, 50.0, TerrainSet::EMPTY);
        let outcome = carve_path(&mut grid, &mut rng, Pos::new(10, 10), Pos::new(70, 50), &rule);
        assert_eq!(outcome, PathOutcome::Arrived);
        assert_eq!(grid.get(Pos::new(70, 50)), Terrain::Floor);
    }

    #[test]
    fn flow_halts_when_reaching_an_existing_pool() {
        let mut grid = GridBuilder::new(50, 20, Terrain::Obstacle);
        for y in 6..14 {
            for x in 30..36 {
                grid.set(Pos::new(x, y), Terrain::Water);
            }
        }
        let mut rng = GenRng::from_seed(9);
        let water = TerrainSet::of(&[Terrain::Water]);
        let rule = CarveRule::corridor(Terrain::Water, 1, 0.0, TerrainSet::EMPTY)
            .halting_near(water);
        let outcome = carve_path(&mut grid, &mut rng, Pos::new(3, 10), Pos::new(46, 10), &rule);

        let PathOutcome::Halted(stop) = outcome else {
            panic!("river should halt at the pool, got {outcome:?}");
        };
        assert!(stop.x < 30, "halted inside or past the pool at {stop:?}");
        assert_eq!(grid.get(Pos::new(3, 10)), Terrain::Water);
        assert_eq!(grid.get(Pos::new(44, 10)), Terrain::Obstacle);
    }
}
