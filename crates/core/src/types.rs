use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Integer tile coordinate. Field order keeps the derived `Ord` row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn manhattan(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn distance_squared(self, other: Pos) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }

    pub fn orthogonal_neighbors(self) -> [Pos; 4] {
        [
            Pos { y: self.y - 1, x: self.x },
            Pos { y: self.y, x: self.x + 1 },
            Pos { y: self.y + 1, x: self.x },
            Pos { y: self.y, x: self.x - 1 },
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    Wall,
    Floor,
    Ground,
    Obstacle,
    Water,
    Path,
    Lava,
    Void,
    Bridge,
}

impl Terrain {
    pub const ALL: [Terrain; 9] = [
        Terrain::Wall,
        Terrain::Floor,
        Terrain::Ground,
        Terrain::Obstacle,
        Terrain::Water,
        Terrain::Path,
        Terrain::Lava,
        Terrain::Void,
        Terrain::Bridge,
    ];

    /// Stable byte code used in canonical level encodings.
    pub const fn code(self) -> u8 {
        match self {
            Terrain::Wall => 0,
            Terrain::Floor => 1,
            Terrain::Ground => 2,
            Terrain::Obstacle => 3,
            Terrain::Water => 4,
            Terrain::Path => 5,
            Terrain::Lava => 6,
            Terrain::Void => 7,
            Terrain::Bridge => 8,
        }
    }

    pub const fn glyph(self) -> char {
        match self {
            Terrain::Wall => '#',
            Terrain::Floor => '.',
            Terrain::Ground => ',',
            Terrain::Obstacle => 'T',
            Terrain::Water => '~',
            Terrain::Path => ':',
            Terrain::Lava => '%',
            Terrain::Void => ' ',
            Terrain::Bridge => '=',
        }
    }
}

/// Small copyable set of terrain codes.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Terrain>", into = "Vec<Terrain>")]
pub struct TerrainSet(u16);

impl TerrainSet {
    pub const EMPTY: TerrainSet = TerrainSet(0);

    pub const fn of(terrains: &[Terrain]) -> Self {
        let mut bits = 0_u16;
        let mut index = 0;
        while index < terrains.len() {
            bits |= 1 << terrains[index].code();
            index += 1;
        }
        Self(bits)
    }

    pub const fn all() -> Self {
        Self::of(&Terrain::ALL)
    }

    pub const fn contains(self, terrain: Terrain) -> bool {
        self.0 & (1 << terrain.code()) != 0
    }

    pub const fn with(self, terrain: Terrain) -> Self {
        Self(self.0 | (1 << terrain.code()))
    }

    pub const fn without(self, terrain: Terrain) -> Self {
        Self(self.0 & !(1 << terrain.code()))
    }

    pub const fn union(self, other: TerrainSet) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Terrain> {
        Terrain::ALL.into_iter().filter(move |&terrain| self.contains(terrain))
    }
}

impl fmt::Debug for TerrainSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl From<Vec<Terrain>> for TerrainSet {
    fn from(terrains: Vec<Terrain>) -> Self {
        Self::of(&terrains)
    }
}

impl From<TerrainSet> for Vec<Terrain> {
    fn from(set: TerrainSet) -> Self {
        set.iter().collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Biome {
    Cave,
    IceCavern,
    Volcano,
    Crypt,
    Dungeon,
    Castle,
    Forest,
    Swamp,
    Meadow,
    SkyIslands,
    WorldMap,
}

impl Biome {
    pub const ALL: [Biome; 11] = [
        Biome::Cave,
        Biome::IceCavern,
        Biome::Volcano,
        Biome::Crypt,
        Biome::Dungeon,
        Biome::Castle,
        Biome::Forest,
        Biome::Swamp,
        Biome::Meadow,
        Biome::SkyIslands,
        Biome::WorldMap,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Biome::Cave => "cave",
            Biome::IceCavern => "ice_cavern",
            Biome::Volcano => "volcano",
            Biome::Crypt => "crypt",
            Biome::Dungeon => "dungeon",
            Biome::Castle => "castle",
            Biome::Forest => "forest",
            Biome::Swamp => "swamp",
            Biome::Meadow => "meadow",
            Biome::SkyIslands => "sky_islands",
            Biome::WorldMap => "world_map",
        }
    }

    pub(crate) const fn code(self) -> u64 {
        match self {
            Biome::Cave => 0,
            Biome::IceCavern => 1,
            Biome::Volcano => 2,
            Biome::Crypt => 3,
            Biome::Dungeon => 4,
            Biome::Castle => 5,
            Biome::Forest => 6,
            Biome::Swamp => 7,
            Biome::Meadow => 8,
            Biome::SkyIslands => 9,
            Biome::WorldMap => 10,
        }
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Biome {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        Biome::ALL.into_iter().find(|biome| biome.name() == normalized).ok_or_else(|| {
            let known: Vec<&str> = Biome::ALL.iter().map(|biome| biome.name()).collect();
            format!("unknown biome '{raw}' (expected one of: {})", known.join(", "))
        })
    }
}

/// Converts between tile coordinates and the caller's world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileSpace {
    pub tile_size: f32,
}

impl TileSpace {
    pub const fn new(tile_size: f32) -> Self {
        Self { tile_size }
    }

    /// World-space center of a tile.
    pub fn to_world(self, pos: Pos) -> (f32, f32) {
        ((pos.x as f32 + 0.5) * self.tile_size, (pos.y as f32 + 0.5) * self.tile_size)
    }

    pub fn to_tile(self, world_x: f32, world_y: f32) -> Pos {
        Pos {
            y: (world_y / self.tile_size).floor() as i32,
            x: (world_x / self.tile_size).floor() as i32,
        }
    }
}
