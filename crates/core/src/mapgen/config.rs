//! Biome parameter sets: terrain semantics, generation recipe, and placement counts.
//!
//! One engine serves every biome; biomes differ only in the values defined here.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Biome, Terrain, TerrainSet};

/// Inclusive integer range, written as `[min, max]` in config files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "(T, T)",
    into = "(T, T)",
    bound(serialize = "T: Serialize + Copy", deserialize = "T: Deserialize<'de>")
)]
pub struct Span<T> {
    pub min: T,
    pub max: T,
}

impl<T> From<(T, T)> for Span<T> {
    fn from((min, max): (T, T)) -> Self {
        Self { min, max }
    }
}

impl<T> From<Span<T>> for (T, T) {
    fn from(span: Span<T>) -> Self {
        (span.min, span.max)
    }
}

impl<T> Span<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: PartialOrd> Span<T> {
    fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

/// Which codes a biome uses and how the rest of the game should treat them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainTable {
    /// Initial fill of a fresh grid.
    pub background: Terrain,
    /// Out-of-range value and border ring code.
    pub blocked: Terrain,
    /// Written by hub carvers (chambers, rooms, clearings, islands).
    pub floor: Terrain,
    /// Written by the link carver.
    pub corridor: Terrain,
    pub walkable: TerrainSet,
    /// Never smoothed, never overwritten by links.
    pub hazards: TerrainSet,
    pub decorable: TerrainSet,
    /// Extra codes links leave untouched (for example island ground under a bridge).
    pub corridor_protected: TerrainSet,
}

impl TerrainTable {
    const fn enclosed(floor: Terrain, hazards: TerrainSet) -> Self {
        Self {
            background: Terrain::Wall,
            blocked: Terrain::Wall,
            floor,
            corridor: floor,
            walkable: TerrainSet::of(&[floor]),
            hazards,
            decorable: TerrainSet::of(&[floor]),
            corridor_protected: TerrainSet::EMPTY,
        }
    }

    const fn outdoor(hazards: TerrainSet) -> Self {
        Self {
            background: Terrain::Obstacle,
            blocked: Terrain::Obstacle,
            floor: Terrain::Ground,
            corridor: Terrain::Path,
            walkable: TerrainSet::of(&[Terrain::Ground, Terrain::Path]),
            hazards,
            decorable: TerrainSet::of(&[Terrain::Ground]),
            corridor_protected: TerrainSet::EMPTY,
        }
    }

    const fn archipelago(sea: Terrain, link: Terrain) -> Self {
        Self {
            background: sea,
            blocked: sea,
            floor: Terrain::Ground,
            corridor: link,
            walkable: TerrainSet::of(&[Terrain::Ground, link]),
            hazards: TerrainSet::EMPTY,
            decorable: TerrainSet::of(&[Terrain::Ground]),
            corridor_protected: TerrainSet::of(&[Terrain::Ground]),
        }
    }

    pub fn is_walkable(&self, terrain: Terrain) -> bool {
        self.walkable.contains(terrain)
    }

    pub fn is_hazard(&self, terrain: Terrain) -> bool {
        self.hazards.contains(terrain)
    }

    /// Codes a link may never overwrite.
    pub fn link_protected(&self) -> TerrainSet {
        self.hazards.union(self.corridor_protected)
    }
}

/// Elliptical hub shapes: chambers, clearings, islands, pools.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlobParams {
    pub count: Span<usize>,
    pub radius_x: Span<i32>,
    pub radius_y: Span<i32>,
    /// Upper bound of the per-cell perturbation added to the ellipse threshold.
    pub noise: f32,
    /// Minimum distance between accepted blob centers.
    pub spacing: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinkParams {
    pub width: Span<i32>,
    pub windiness: f32,
    /// Nearest neighbours each hub links to.
    pub links_per_hub: Span<usize>,
    /// Random extra edges added for loops.
    #[serde(default)]
    pub extra_edges: usize,
}

/// Hazard pools plus the flows (lava runs, rivers) that feed them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoolParams {
    pub fill: Terrain,
    pub flows: Span<usize>,
    pub flow_width: Span<i32>,
    pub flow_windiness: f32,
    /// A flow stops once it would touch one of these codes it did not paint itself.
    #[serde(default)]
    pub flows_halt_near: TerrainSet,
    pub pools: BlobParams,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSize {
    pub width: i32,
    pub height: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChamberRecipe {
    pub chambers: BlobParams,
    pub tunnels: LinkParams,
    pub crater: Option<BlobParams>,
    pub pools: Option<PoolParams>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomRecipe {
    pub rooms: Span<usize>,
    pub room_width: Span<i32>,
    pub room_height: Span<i32>,
    /// Clearance kept between room rectangles.
    pub margin: i32,
    pub corridors: LinkParams,
    pub throne_room: Option<RoomSize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClearingRecipe {
    pub clearings: BlobParams,
    pub paths: LinkParams,
    pub water: Option<PoolParams>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IslandRecipe {
    pub islands: BlobParams,
    pub bridges: LinkParams,
    pub mainland: Option<BlobParams>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recipe {
    CaveChambers(ChamberRecipe),
    RoomsAndCorridors(RoomRecipe),
    ClearingsAndPaths(ClearingRecipe),
    IslandsAndBridges(IslandRecipe),
}

impl Recipe {
    pub const fn name(&self) -> &'static str {
        match self {
            Recipe::CaveChambers(_) => "cave_chambers",
            Recipe::RoomsAndCorridors(_) => "rooms_and_corridors",
            Recipe::ClearingsAndPaths(_) => "clearings_and_paths",
            Recipe::IslandsAndBridges(_) => "islands_and_bridges",
        }
    }

    pub fn links(&self) -> &LinkParams {
        match self {
            Recipe::CaveChambers(recipe) => &recipe.tunnels,
            Recipe::RoomsAndCorridors(recipe) => &recipe.corridors,
            Recipe::ClearingsAndPaths(recipe) => &recipe.paths,
            Recipe::IslandsAndBridges(recipe) => &recipe.bridges,
        }
    }

    pub fn pools(&self) -> Option<&PoolParams> {
        match self {
            Recipe::CaveChambers(recipe) => recipe.pools.as_ref(),
            Recipe::ClearingsAndPaths(recipe) => recipe.water.as_ref(),
            Recipe::RoomsAndCorridors(_) | Recipe::IslandsAndBridges(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnParams {
    pub count: Span<usize>,
    /// Minimum distance from the player start.
    pub exclusion_radius: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiomeConfig {
    pub biome: Biome,
    pub width: usize,
    pub height: usize,
    /// Thickness of the blocked ring around the map; carvers never touch it.
    pub border: i32,
    pub smoothing_passes: u32,
    pub terrain: TerrainTable,
    pub recipe: Recipe,
    pub spawns: SpawnParams,
    pub decorations: SpawnParams,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    GridTooSmall { width: usize, height: usize, minimum: usize },
    BorderOutOfRange(i32),
    EmptyRange { field: &'static str },
    NonPositive { field: &'static str },
    NotFinite { field: &'static str },
    OutOfRange { field: &'static str, max: usize },
    HazardCode { role: &'static str, terrain: Terrain },
    NotWalkable { role: &'static str, terrain: Terrain },
    WalkableBlocked(Terrain),
    WalkablePoolFill(Terrain),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridTooSmall { width, height, minimum } => {
                write!(f, "grid {width}x{height} is too small (each side needs at least {minimum})")
            }
            Self::BorderOutOfRange(border) => write!(f, "border {border} must be 1 or 2"),
            Self::EmptyRange { field } => write!(f, "{field}: min is greater than max"),
            Self::NonPositive { field } => write!(f, "{field} must be positive"),
            Self::NotFinite { field } => write!(f, "{field} must be a finite, non-negative number"),
            Self::OutOfRange { field, max } => write!(f, "{field} must be at most {max}"),
            Self::HazardCode { role, terrain } => {
                write!(f, "{role} code {terrain:?} cannot also be a hazard")
            }
            Self::NotWalkable { role, terrain } => {
                write!(f, "{role} code {terrain:?} must be listed as walkable")
            }
            Self::WalkableBlocked(terrain) => {
                write!(f, "blocked code {terrain:?} cannot be walkable")
            }
            Self::WalkablePoolFill(terrain) => {
                write!(f, "pool fill {terrain:?} cannot be walkable")
            }
        }
    }
}

impl Error for ConfigError {}

const MIN_INTERIOR: usize = 8;
/// Upper bound for every count: hubs, rooms, links, flows, spawns.
const MAX_COUNT: usize = 4096;
const MAX_CELLS: usize = 1 << 20;
const MAX_SMOOTHING_PASSES: u32 = 16;
const MAX_NOISE: f32 = 4.0;

impl BiomeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=2).contains(&self.border) {
            return Err(ConfigError::BorderOutOfRange(self.border));
        }
        let minimum = 2 * self.border as usize + MIN_INTERIOR;
        if self.width < minimum || self.height < minimum {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
                minimum,
            });
        }
        if self.width.checked_mul(self.height).is_none_or(|cells| cells > MAX_CELLS) {
            return Err(ConfigError::OutOfRange { field: "width * height", max: MAX_CELLS });
        }
        if self.smoothing_passes > MAX_SMOOTHING_PASSES {
            return Err(ConfigError::OutOfRange {
                field: "smoothing_passes",
                max: MAX_SMOOTHING_PASSES as usize,
            });
        }
        self.validate_terrain()?;
        let side = self.width.min(self.height) as i32;

        match &self.recipe {
            Recipe::CaveChambers(recipe) => {
                check_blob("chambers", &recipe.chambers, side)?;
                if let Some(crater) = &recipe.crater {
                    check_blob("crater", crater, side)?;
                }
                if let Some(pools) = &recipe.pools {
                    check_pools(pools, &self.terrain, side)?;
                }
            }
            Recipe::RoomsAndCorridors(recipe) => {
                check_count("rooms", &recipe.rooms)?;
                check_positive_span("room_width", &recipe.room_width, 3)?;
                check_at_most("room_width", recipe.room_width.max, self.width as i32)?;
                check_positive_span("room_height", &recipe.room_height, 3)?;
                check_at_most("room_height", recipe.room_height.max, self.height as i32)?;
                if recipe.margin < 0 {
                    return Err(ConfigError::NonPositive { field: "margin" });
                }
                check_at_most("margin", recipe.margin, side)?;
                if let Some(throne) = &recipe.throne_room {
                    if throne.width < 3 || throne.height < 3 {
                        return Err(ConfigError::NonPositive { field: "throne_room" });
                    }
                    check_at_most("throne_room", throne.width, self.width as i32)?;
                    check_at_most("throne_room", throne.height, self.height as i32)?;
                }
            }
            Recipe::ClearingsAndPaths(recipe) => {
                check_blob("clearings", &recipe.clearings, side)?;
                if let Some(water) = &recipe.water {
                    check_pools(water, &self.terrain, side)?;
                }
            }
            Recipe::IslandsAndBridges(recipe) => {
                check_blob("islands", &recipe.islands, side)?;
                if let Some(mainland) = &recipe.mainland {
                    check_blob("mainland", mainland, side)?;
                }
            }
        }
        check_links(self.recipe.links(), side)?;

        check_count("spawns.count", &self.spawns.count)?;
        check_finite("spawns.exclusion_radius", self.spawns.exclusion_radius)?;
        check_count("decorations.count", &self.decorations.count)?;
        check_finite("decorations.exclusion_radius", self.decorations.exclusion_radius)
    }

    fn validate_terrain(&self) -> Result<(), ConfigError> {
        let table = &self.terrain;
        for (role, terrain) in [
            ("background", table.background),
            ("blocked", table.blocked),
            ("floor", table.floor),
            ("corridor", table.corridor),
        ] {
            if table.is_hazard(terrain) {
                return Err(ConfigError::HazardCode { role, terrain });
            }
        }
        for (role, terrain) in [("floor", table.floor), ("corridor", table.corridor)] {
            if !table.is_walkable(terrain) {
                return Err(ConfigError::NotWalkable { role, terrain });
            }
        }
        if table.is_walkable(table.blocked) {
            return Err(ConfigError::WalkableBlocked(table.blocked));
        }
        Ok(())
    }
}

fn check_span<T: PartialOrd>(field: &'static str, span: &Span<T>) -> Result<(), ConfigError> {
    if span.is_ordered() { Ok(()) } else { Err(ConfigError::EmptyRange { field }) }
}

fn check_count(field: &'static str, span: &Span<usize>) -> Result<(), ConfigError> {
    check_span(field, span)?;
    if span.max > MAX_COUNT {
        return Err(ConfigError::OutOfRange { field, max: MAX_COUNT });
    }
    Ok(())
}

fn check_at_most(field: &'static str, value: i32, max: i32) -> Result<(), ConfigError> {
    if value > max {
        return Err(ConfigError::OutOfRange { field, max: max.max(0) as usize });
    }
    Ok(())
}

fn check_positive_span(
    field: &'static str,
    span: &Span<i32>,
    minimum: i32,
) -> Result<(), ConfigError> {
    check_span(field, span)?;
    if span.min < minimum {
        return Err(ConfigError::NonPositive { field });
    }
    Ok(())
}

fn check_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 { Ok(()) } else { Err(ConfigError::NotFinite { field }) }
}

fn check_blob(field: &'static str, blob: &BlobParams, side: i32) -> Result<(), ConfigError> {
    check_count(field, &blob.count)?;
    check_positive_span(field, &blob.radius_x, 1)?;
    check_at_most(field, blob.radius_x.max, side)?;
    check_positive_span(field, &blob.radius_y, 1)?;
    check_at_most(field, blob.radius_y.max, side)?;
    check_finite(field, blob.noise)?;
    if blob.noise > MAX_NOISE {
        return Err(ConfigError::OutOfRange { field, max: MAX_NOISE as usize });
    }
    if blob.spacing < 0 {
        return Err(ConfigError::NonPositive { field });
    }
    Ok(())
}

fn check_links(links: &LinkParams, side: i32) -> Result<(), ConfigError> {
    check_span("links.width", &links.width)?;
    if links.width.min < 0 {
        return Err(ConfigError::NonPositive { field: "links.width" });
    }
    check_at_most("links.width", links.width.max, side)?;
    check_positive_span_usize("links.links_per_hub", &links.links_per_hub)?;
    check_count("links.links_per_hub", &links.links_per_hub)?;
    if links.extra_edges > MAX_COUNT {
        return Err(ConfigError::OutOfRange { field: "links.extra_edges", max: MAX_COUNT });
    }
    check_finite("links.windiness", links.windiness)
}

fn check_positive_span_usize(field: &'static str, span: &Span<usize>) -> Result<(), ConfigError> {
    check_span(field, span)?;
    if span.min == 0 {
        return Err(ConfigError::NonPositive { field });
    }
    Ok(())
}

fn check_pools(pools: &PoolParams, table: &TerrainTable, side: i32) -> Result<(), ConfigError> {
    check_blob("pools", &pools.pools, side)?;
    check_count("pools.flows", &pools.flows)?;
    check_span("pools.flow_width", &pools.flow_width)?;
    if pools.flow_width.min < 0 {
        return Err(ConfigError::NonPositive { field: "pools.flow_width" });
    }
    check_at_most("pools.flow_width", pools.flow_width.max, side)?;
    check_finite("pools.flow_windiness", pools.flow_windiness)?;
    if table.is_walkable(pools.fill) {
        return Err(ConfigError::WalkablePoolFill(pools.fill));
    }
    Ok(())
}

const fn blob(
    count: (usize, usize),
    radius_x: (i32, i32),
    radius_y: (i32, i32),
    noise: f32,
    spacing: i32,
) -> BlobParams {
    BlobParams {
        count: Span::new(count.0, count.1),
        radius_x: Span::new(radius_x.0, radius_x.1),
        radius_y: Span::new(radius_y.0, radius_y.1),
        noise,
        spacing,
    }
}

const fn links(
    width: (i32, i32),
    windiness: f32,
    links_per_hub: (usize, usize),
    extra_edges: usize,
) -> LinkParams {
    LinkParams {
        width: Span::new(width.0, width.1),
        windiness,
        links_per_hub: Span::new(links_per_hub.0, links_per_hub.1),
        extra_edges,
    }
}

const fn spawns(count: (usize, usize), exclusion_radius: f32) -> SpawnParams {
    SpawnParams { count: Span::new(count.0, count.1), exclusion_radius }
}

const LAVA: TerrainSet = TerrainSet::of(&[Terrain::Lava]);
const WATER: TerrainSet = TerrainSet::of(&[Terrain::Water]);

impl BiomeConfig {
    /// Built-in parameter set for `biome`.
    pub fn preset(biome: Biome) -> Self {
        let (width, height, border, terrain, recipe, spawn_count, decoration_count) = match biome {
            Biome::Cave => (
                160,
                120,
                2,
                TerrainTable::enclosed(Terrain::Floor, TerrainSet::EMPTY),
                Recipe::CaveChambers(ChamberRecipe {
                    chambers: blob((8, 12), (6, 11), (5, 9), 0.35, 18),
                    tunnels: links((1, 2), 0.6, (1, 2), 0),
                    crater: None,
                    pools: None,
                }),
                (35, 55),
                (20, 40),
            ),
            Biome::IceCavern => (
                170,
                130,
                2,
                TerrainTable::enclosed(Terrain::Floor, WATER),
                Recipe::CaveChambers(ChamberRecipe {
                    chambers: blob((9, 13), (7, 12), (5, 9), 0.3, 20),
                    tunnels: links((1, 2), 0.5, (1, 2), 0),
                    crater: None,
                    pools: Some(PoolParams {
                        fill: Terrain::Water,
                        pools: blob((4, 7), (3, 6), (2, 5), 0.4, 10),
                        flows: Span::new(0, 1),
                        flow_width: Span::new(1, 1),
                        flow_windiness: 0.7,
                        flows_halt_near: WATER,
                    }),
                }),
                (45, 65),
                (25, 45),
            ),
            Biome::Volcano => (
                180,
                140,
                2,
                TerrainTable::enclosed(Terrain::Floor, LAVA),
                Recipe::CaveChambers(ChamberRecipe {
                    chambers: blob((8, 12), (6, 10), (5, 8), 0.4, 20),
                    tunnels: links((1, 2), 0.7, (1, 3), 0),
                    crater: Some(blob((1, 1), (10, 13), (9, 11), 0.25, 0)),
                    pools: Some(PoolParams {
                        fill: Terrain::Lava,
                        pools: blob((5, 8), (3, 7), (3, 6), 0.45, 12),
                        flows: Span::new(2, 4),
                        flow_width: Span::new(1, 2),
                        flow_windiness: 0.8,
                        flows_halt_near: TerrainSet::EMPTY,
                    }),
                }),
                (80, 110),
                (30, 50),
            ),
            Biome::Crypt => (
                150,
                120,
                1,
                TerrainTable::enclosed(Terrain::Floor, TerrainSet::EMPTY),
                Recipe::RoomsAndCorridors(RoomRecipe {
                    rooms: Span::new(14, 20),
                    room_width: Span::new(6, 11),
                    room_height: Span::new(5, 9),
                    margin: 4,
                    corridors: links((1, 1), 0.15, (1, 2), 0),
                    throne_room: None,
                }),
                (40, 60),
                (20, 35),
            ),
            Biome::Dungeon => (
                170,
                130,
                1,
                TerrainTable::enclosed(Terrain::Floor, TerrainSet::EMPTY),
                Recipe::RoomsAndCorridors(RoomRecipe {
                    rooms: Span::new(10, 16),
                    room_width: Span::new(8, 16),
                    room_height: Span::new(7, 12),
                    margin: 4,
                    corridors: links((1, 2), 0.25, (1, 3), 4),
                    throne_room: None,
                }),
                (60, 85),
                (25, 40),
            ),
            Biome::Castle => (
                180,
                140,
                2,
                TerrainTable::enclosed(Terrain::Floor, TerrainSet::EMPTY),
                Recipe::RoomsAndCorridors(RoomRecipe {
                    rooms: Span::new(8, 12),
                    room_width: Span::new(12, 20),
                    room_height: Span::new(10, 16),
                    margin: 4,
                    corridors: links((2, 2), 0.05, (1, 2), 1),
                    throne_room: Some(RoomSize { width: 24, height: 18 }),
                }),
                (70, 95),
                (30, 50),
            ),
            Biome::Forest => (
                190,
                140,
                2,
                TerrainTable::outdoor(WATER),
                Recipe::ClearingsAndPaths(ClearingRecipe {
                    clearings: blob((9, 14), (7, 12), (6, 10), 0.5, 22),
                    paths: links((1, 2), 1.0, (1, 3), 0),
                    water: Some(PoolParams {
                        fill: Terrain::Water,
                        pools: blob((2, 4), (3, 6), (3, 5), 0.35, 16),
                        flows: Span::new(1, 2),
                        flow_width: Span::new(1, 1),
                        flow_windiness: 1.2,
                        flows_halt_near: WATER,
                    }),
                }),
                (35, 50),
                (50, 80),
            ),
            Biome::Swamp => (
                180,
                140,
                2,
                TerrainTable::outdoor(WATER),
                Recipe::ClearingsAndPaths(ClearingRecipe {
                    clearings: blob((10, 15), (6, 10), (5, 9), 0.6, 20),
                    paths: links((1, 1), 1.3, (1, 2), 0),
                    water: Some(PoolParams {
                        fill: Terrain::Water,
                        pools: blob((6, 9), (4, 8), (3, 6), 0.5, 12),
                        flows: Span::new(2, 3),
                        flow_width: Span::new(1, 2),
                        flow_windiness: 1.4,
                        flows_halt_near: WATER,
                    }),
                }),
                (55, 75),
                (40, 70),
            ),
            Biome::Meadow => (
                200,
                150,
                2,
                TerrainTable::outdoor(WATER),
                Recipe::ClearingsAndPaths(ClearingRecipe {
                    clearings: blob((8, 12), (10, 16), (8, 12), 0.3, 28),
                    paths: links((1, 2), 0.8, (1, 2), 0),
                    water: Some(PoolParams {
                        fill: Terrain::Water,
                        pools: blob((1, 2), (4, 7), (3, 5), 0.3, 20),
                        flows: Span::new(0, 1),
                        flow_width: Span::new(1, 2),
                        flow_windiness: 1.0,
                        flows_halt_near: WATER,
                    }),
                }),
                (35, 45),
                (60, 90),
            ),
            Biome::SkyIslands => (
                180,
                140,
                2,
                TerrainTable::archipelago(Terrain::Void, Terrain::Bridge),
                Recipe::IslandsAndBridges(IslandRecipe {
                    islands: blob((8, 12), (6, 10), (5, 8), 0.3, 24),
                    bridges: links((1, 1), 0.3, (1, 2), 0),
                    mainland: None,
                }),
                (45, 65),
                (25, 40),
            ),
            Biome::WorldMap => (
                200,
                150,
                2,
                TerrainTable::archipelago(Terrain::Water, Terrain::Path),
                Recipe::IslandsAndBridges(IslandRecipe {
                    islands: blob((5, 7), (12, 20), (9, 14), 0.7, 40),
                    bridges: links((1, 2), 0.5, (1, 2), 0),
                    mainland: Some(blob((1, 1), (18, 24), (13, 17), 0.6, 0)),
                }),
                (35, 50),
                (40, 60),
            ),
        };

        Self {
            biome,
            width,
            height,
            border,
            smoothing_passes: 1,
            terrain,
            recipe,
            spawns: spawns(spawn_count, 12.0),
            decorations: spawns(decoration_count, 4.0),
        }
    }
}
