//! Terrain buffers: a mutable builder used during generation and the frozen grid handed out after.

use crate::types::{Pos, Terrain};

/// Read access shared by the builder and the frozen grid.
///
/// Out-of-range reads resolve to [`TerrainView::blocked`]; neighbour scans rely on that.
pub trait TerrainView {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn blocked(&self) -> Terrain;
    fn cells(&self) -> &[Terrain];

    fn in_bounds(&self, pos: Pos) -> bool {
        in_bounds(self.width(), self.height(), pos)
    }

    fn get(&self, pos: Pos) -> Terrain {
        match cell_index(self.width(), self.height(), pos) {
            Some(index) => self.cells()[index],
            None => self.blocked(),
        }
    }

    /// True when `pos` lies at least `margin` cells away from every edge.
    fn is_interior(&self, pos: Pos, margin: i32) -> bool {
        pos.x >= margin
            && pos.y >= margin
            && i64::from(pos.x) < self.width() as i64 - i64::from(margin)
            && i64::from(pos.y) < self.height() as i64 - i64::from(margin)
    }

    /// Counts Moore neighbours matching `predicate`, ignoring positions off the grid.
    fn count_neighbors(&self, pos: Pos, predicate: impl Fn(Terrain) -> bool) -> usize {
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let neighbor = Pos { y: pos.y + dy, x: pos.x + dx };
                if let Some(index) = cell_index(self.width(), self.height(), neighbor)
                    && predicate(self.cells()[index])
                {
                    count += 1;
                }
            }
        }
        count
    }

    fn count_matching(&self, predicate: impl Fn(Terrain) -> bool) -> usize {
        self.cells().iter().filter(|&&terrain| predicate(terrain)).count()
    }
}

pub(crate) fn in_bounds(width: usize, height: usize, pos: Pos) -> bool {
    pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < width && (pos.y as usize) < height
}

pub(crate) fn cell_index(width: usize, height: usize, pos: Pos) -> Option<usize> {
    in_bounds(width, height, pos).then(|| (pos.y as usize) * width + (pos.x as usize))
}

pub(crate) fn position_of(width: usize, index: usize) -> Pos {
    Pos { y: (index / width) as i32, x: (index % width) as i32 }
}

/// Mutable terrain buffer. Only exists while a level is being generated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridBuilder {
    width: usize,
    height: usize,
    cells: Vec<Terrain>,
    blocked: Terrain,
}

impl GridBuilder {
    /// Creates a `width × height` buffer filled with `default_code`, which also
    /// serves as the out-of-range value until [`GridBuilder::with_blocked`] says otherwise.
    pub fn new(width: usize, height: usize, default_code: Terrain) -> Self {
        Self { width, height, cells: vec![default_code; width * height], blocked: default_code }
    }

    pub fn with_blocked(mut self, blocked: Terrain) -> Self {
        self.blocked = blocked;
        self
    }

    /// No-op when `pos` is off the grid.
    pub fn set(&mut self, pos: Pos, terrain: Terrain) {
        if let Some(index) = cell_index(self.width, self.height, pos) {
            self.cells[index] = terrain;
        }
    }

    pub fn fill(&mut self, terrain: Terrain) {
        self.cells.fill(terrain);
    }

    pub fn freeze(self) -> Grid {
        Grid { width: self.width, height: self.height, cells: self.cells, blocked: self.blocked }
    }
}

impl TerrainView for GridBuilder {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn blocked(&self) -> Terrain {
        self.blocked
    }

    fn cells(&self) -> &[Terrain] {
        &self.cells
    }
}

/// Immutable terrain grid produced by [`GridBuilder::freeze`]. Safe to share across threads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Terrain>,
    blocked: Terrain,
}

impl Grid {
    pub fn row(&self, y: usize) -> &[Terrain] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }
}

impl TerrainView for Grid {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn blocked(&self) -> Terrain {
        self.blocked
    }

    fn cells(&self) -> &[Terrain] {
        &self.cells
    }
}

/// Farthest tile matching `predicate` from `origin` by Manhattan distance,
/// breaking ties toward the larger `(y, x)`.
pub(crate) fn farthest_matching_tile(
    view: &impl TerrainView,
    origin: Pos,
    predicate: impl Fn(Terrain) -> bool,
) -> Pos {
    let mut best = origin;
    let mut best_distance = 0_u32;
    for (index, &terrain) in view.cells().iter().enumerate() {
        if !predicate(terrain) {
            continue;
        }
        let pos = position_of(view.width(), index);
        let distance = origin.manhattan(pos);
        if distance > best_distance || (distance == best_distance && pos > best) {
            best = pos;
            best_distance = distance;
        }
    }
    best
}
