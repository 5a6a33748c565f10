//! Region stamps: noisy ellipses, rectangular rooms, and the enclosing border.

use crate::types::{Pos, Terrain, TerrainSet};

use super::config::{BlobParams, RoomRecipe, RoomSize};
use super::grid::{GridBuilder, TerrainView};
use super::seed::GenRng;

/// A noisy ellipse: chamber, clearing, island, or pool.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlobShape {
    pub center: Pos,
    pub radius_x: i32,
    pub radius_y: i32,
    pub noise: f32,
}

/// Stamps `shape` with `fill` onto every cell whose current code is in `overwritable`.
///
/// A cell is inside when `(dx/rx)² + (dy/ry)² < 1 + p`, with `p` drawn per cell
/// from `[0, noise)`. Cells closer than `margin` to the edge are never touched.
/// Returns the number of cells written.
pub fn carve_blob(
    grid: &mut GridBuilder,
    rng: &mut GenRng,
    shape: &BlobShape,
    fill: Terrain,
    overwritable: TerrainSet,
    margin: i32,
) -> usize {
    let radius_x = shape.radius_x.max(1);
    let radius_y = shape.radius_y.max(1);
    let noise = shape.noise.max(0.0);
    let reach = (1.0 + noise).sqrt();
    let extent_x = (radius_x as f32 * reach).ceil() as i32 + 1;
    let extent_y = (radius_y as f32 * reach).ceil() as i32 + 1;

    let mut carved = 0;
    for y in (shape.center.y - extent_y)..=(shape.center.y + extent_y) {
        for x in (shape.center.x - extent_x)..=(shape.center.x + extent_x) {
            let pos = Pos { y, x };
            if !grid.is_interior(pos, margin) {
                continue;
            }
            let dx = (x - shape.center.x) as f32 / radius_x as f32;
            let dy = (y - shape.center.y) as f32 / radius_y as f32;
            let perturbation = if noise > 0.0 { rng.unit_f32() * noise } else { 0.0 };
            if dx * dx + dy * dy >= 1.0 + perturbation {
                continue;
            }
            let current = grid.get(pos);
            if current != fill && overwritable.contains(current) {
                grid.set(pos, fill);
                carved += 1;
            }
        }
    }
    carved
}

/// Picks up to `params.count` blob shapes with centers at least `params.spacing` apart.
///
/// Gives up after three attempts per requested blob, so the result may be shorter.
pub(crate) fn place_blobs(
    rng: &mut GenRng,
    width: usize,
    height: usize,
    params: &BlobParams,
    margin: i32,
    occupied: &[Pos],
) -> Vec<BlobShape> {
    let target = rng.range_usize(params.count.min, params.count.max);
    let mut shapes: Vec<BlobShape> = Vec::with_capacity(target);
    let spacing_squared = i64::from(params.spacing) * i64::from(params.spacing);

    for _ in 0..target * 3 {
        if shapes.len() >= target {
            break;
        }
        let radius_x = rng.range_i32(params.radius_x.min, params.radius_x.max);
        let radius_y = rng.range_i32(params.radius_y.min, params.radius_y.max);
        let center = Pos {
            x: random_axis(rng, width, margin, radius_x),
            y: random_axis(rng, height, margin, radius_y),
        };
        let too_close = occupied
            .iter()
            .copied()
            .chain(shapes.iter().map(|shape| shape.center))
            .any(|other| other.distance_squared(center) < spacing_squared);
        if too_close {
            continue;
        }
        shapes.push(BlobShape { center, radius_x, radius_y, noise: params.noise });
    }
    shapes
}

/// Random coordinate keeping `radius` clear of the margin when the axis allows it.
fn random_axis(rng: &mut GenRng, length: usize, margin: i32, radius: i32) -> i32 {
    let length = length as i32;
    let low = margin + 1 + radius;
    let high = length - margin - 2 - radius;
    if low <= high {
        rng.range_i32(low, high)
    } else {
        let fallback_low = margin + 1;
        let fallback_high = (length - margin - 2).max(fallback_low);
        rng.range_i32(fallback_low, fallback_high)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoomRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl RoomRect {
    fn right(self) -> i32 {
        self.x + self.width - 1
    }

    fn bottom(self) -> i32 {
        self.y + self.height - 1
    }

    pub fn center(self) -> Pos {
        Pos { y: self.y + self.height / 2, x: self.x + self.width / 2 }
    }

    pub fn expanded(self, margin: i32) -> Self {
        Self {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + 2 * margin,
            height: self.height + 2 * margin,
        }
    }

    pub fn intersects(self, other: &Self) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }
}

/// Writes `fill` over the room's inside, leaving its one-cell outline alone.
pub fn carve_room(grid: &mut GridBuilder, room: &RoomRect, fill: Terrain) {
    for y in (room.y + 1)..room.bottom() {
        for x in (room.x + 1)..room.right() {
            grid.set(Pos { y, x }, fill);
        }
    }
}

/// Rolls rooms at random and keeps those whose margin-expanded box is clear of
/// every room accepted so far. Runs three attempts per requested room.
pub(crate) fn place_rooms(
    rng: &mut GenRng,
    width: usize,
    height: usize,
    recipe: &RoomRecipe,
    border: i32,
) -> Vec<RoomRect> {
    let target_room_count = rng.range_usize(recipe.rooms.min, recipe.rooms.max);
    let mut rooms: Vec<RoomRect> = Vec::with_capacity(target_room_count);

    for _ in 0..target_room_count * 3 {
        if rooms.len() >= target_room_count {
            break;
        }
        let size = RoomSize {
            width: rng.range_i32(recipe.room_width.min, recipe.room_width.max),
            height: rng.range_i32(recipe.room_height.min, recipe.room_height.max),
        };
        if let Some(candidate) = roll_room(rng, width, height, size, border)
            && fits_between(&rooms, &candidate, recipe.margin)
        {
            rooms.push(candidate);
        }
    }
    rooms
}

/// Tries to fit one room of `size` clear of `rooms`, for special rooms placed last.
pub(crate) fn place_extra_room(
    rng: &mut GenRng,
    width: usize,
    height: usize,
    size: RoomSize,
    margin: i32,
    border: i32,
    rooms: &[RoomRect],
) -> Option<RoomRect> {
    (0..12).find_map(|_| {
        roll_room(rng, width, height, size, border)
            .filter(|candidate| fits_between(rooms, candidate, margin))
    })
}

fn roll_room(
    rng: &mut GenRng,
    width: usize,
    height: usize,
    size: RoomSize,
    border: i32,
) -> Option<RoomRect> {
    let max_x = width as i32 - border - size.width;
    let max_y = height as i32 - border - size.height;
    if max_x < border || max_y < border {
        return None;
    }
    let x = rng.range_i32(border, max_x);
    let y = rng.range_i32(border, max_y);
    Some(RoomRect { x, y, width: size.width, height: size.height })
}

fn fits_between(rooms: &[RoomRect], candidate: &RoomRect, margin: i32) -> bool {
    let candidate_with_margin = candidate.expanded(margin);
    !rooms.iter().any(|existing_room| existing_room.intersects(&candidate_with_margin))
}

/// Forces the outermost `thickness` rings to `code`.
pub fn enforce_border(grid: &mut GridBuilder, thickness: i32, code: Terrain) {
    let width = grid.width() as i32;
    let height = grid.height() as i32;
    for y in 0..height {
        for x in 0..width {
            let pos = Pos { y, x };
            if !grid.is_interior(pos, thickness) {
                grid.set(pos, code);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::config::{BiomeConfig, Recipe, Span};
    use crate::types::Biome;

    const WALLS: TerrainSet = TerrainSet::of(&[Terrain::Wall]);

    #[test]
    fn noiseless_ellipse_fills_center_and_leaves_far_cells() {
        let mut grid = GridBuilder::new(40, 40, Terrain::Wall);
        let mut rng = GenRng::from_seed(1);
        let shape = BlobShape { center: Pos::new(20, 20), radius_x: 10, radius_y: 8, noise: 0.0 };
        let carved = carve_blob(&mut grid, &mut rng, &shape, Terrain::Floor, WALLS, 2);

        assert!(carved > 0);
        assert_eq!(grid.get(Pos::new(20, 20)), Terrain::Floor);
        assert_eq!(grid.get(Pos::new(35, 20)), Terrain::Wall);
        assert_eq!(grid.get(Pos::new(29, 20)), Terrain::Floor);
        assert_eq!(grid.get(Pos::new(30, 20)), Terrain::Wall);
        assert_eq!(grid.get(Pos::new(20, 28)), Terrain::Wall);
    }

    #[test]
    fn ellipse_only_overwrites_listed_codes_and_skips_margin() {
        let mut grid = GridBuilder::new(20, 20, Terrain::Wall);
        grid.set(Pos::new(10, 10), Terrain::Lava);
        let mut rng = GenRng::from_seed(7);
        let shape = BlobShape { center: Pos::new(4, 10), radius_x: 8, radius_y: 4, noise: 0.4 };
        carve_blob(&mut grid, &mut rng, &shape, Terrain::Floor, WALLS, 2);

        assert_eq!(grid.get(Pos::new(10, 10)), Terrain::Lava);
        for y in 0..20 {
            assert_eq!(grid.get(Pos::new(0, y)), Terrain::Wall);
            assert_eq!(grid.get(Pos::new(1, y)), Terrain::Wall);
        }
        assert_eq!(grid.get(Pos::new(2, 10)), Terrain::Floor);
    }

    #[test]
    fn room_carve_keeps_outline() {
        let mut grid = GridBuilder::new(20, 20, Terrain::Wall);
        let room = RoomRect { x: 5, y: 5, width: 6, height: 4 };
        carve_room(&mut grid, &room, Terrain::Floor);

        assert_eq!(grid.count_matching(|terrain| terrain == Terrain::Floor), 4 * 2);
        assert_eq!(grid.get(Pos::new(5, 6)), Terrain::Wall);
        assert_eq!(grid.get(Pos::new(6, 6)), Terrain::Floor);
        assert_eq!(grid.get(Pos::new(9, 7)), Terrain::Floor);
        assert_eq!(grid.get(Pos::new(10, 7)), Terrain::Wall);
        assert!(grid.get(room.center()) == Terrain::Floor);
    }

    #[test]
    fn room_layout_places_rooms_without_margin_overlap() {
        let config = BiomeConfig::preset(Biome::Dungeon);
        let Recipe::RoomsAndCorridors(recipe) = config.recipe else {
            panic!("dungeon preset should use rooms and corridors");
        };
        for seed in [3_u64, 42, 9_001] {
            let mut rng = GenRng::from_seed(seed);
            let rooms = place_rooms(&mut rng, config.width, config.height, &recipe, config.border);
            assert!(rooms.len() >= 4, "expected at least four rooms, got {}", rooms.len());
            assert!(rooms.len() <= recipe.rooms.max);

            for left_index in 0..rooms.len() {
                for right_index in (left_index + 1)..rooms.len() {
                    assert!(
                        !rooms[left_index].expanded(recipe.margin).intersects(&rooms[right_index]),
                        "rooms too close: {:?} vs {:?}",
                        rooms[left_index],
                        rooms[right_index]
                    );
                }
            }
        }
    }

    #[test]
    fn oversized_extra_room_is_skipped() {
        let mut rng = GenRng::from_seed(5);
        let room = place_extra_room(&mut rng, 20, 20, RoomSize { width: 30, height: 6 }, 4, 1, &[]);
        assert_eq!(room, None);
    }

    #[test]
    fn blob_centers_respect_spacing() {
        let params = BlobParams {
            count: Span::new(12, 12),
            radius_x: Span::new(3, 5),
            radius_y: Span::new(3, 5),
            noise: 0.2,
            spacing: 15,
        };
        let mut rng = GenRng::from_seed(77);
        let occupied = [Pos::new(50, 40)];
        let shapes = place_blobs(&mut rng, 100, 80, &params, 2, &occupied);
        assert!(!shapes.is_empty());
        for (index, shape) in shapes.iter().enumerate() {
            assert!(shape.center.distance_squared(occupied[0]) >= 15 * 15);
            for other in &shapes[index + 1..] {
                assert!(shape.center.distance_squared(other.center) >= 15 * 15);
            }
        }
    }

    #[test]
    fn border_enforcement_covers_requested_rings() {
        let mut grid = GridBuilder::new(10, 8, Terrain::Floor);
        enforce_border(&mut grid, 2, Terrain::Wall);
        for y in 0..8 {
            for x in 0..10 {
                let pos = Pos::new(x, y);
                let ring = x.min(y).min(9 - x).min(7 - y);
                let expected = if ring < 2 { Terrain::Wall } else { Terrain::Floor };
                assert_eq!(grid.get(pos), expected, "unexpected code at {pos:?}");
            }
        }
    }
}
