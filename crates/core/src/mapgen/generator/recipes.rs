//! Hub layout per recipe: where the chambers, rooms, clearings, or islands go.

use crate::types::{Pos, TerrainSet};

use super::super::config::{BiomeConfig, BlobParams, Recipe, RoomRecipe};
use super::super::grid::GridBuilder;
use super::super::seed::GenRng;
use super::super::shapes::{carve_blob, carve_room, place_blobs, place_extra_room, place_rooms};

pub(super) struct HubLayout {
    pub(super) hubs: Vec<Pos>,
    /// Index of the special hub; always the last entry when present.
    pub(super) special: Option<usize>,
    pub(super) carved_cells: usize,
}

pub(super) fn lay_out_hubs(
    grid: &mut GridBuilder,
    rng: &mut GenRng,
    config: &BiomeConfig,
) -> HubLayout {
    match &config.recipe {
        Recipe::CaveChambers(recipe) => {
            lay_out_blobs(grid, rng, config, &recipe.chambers, recipe.crater.as_ref())
        }
        Recipe::RoomsAndCorridors(recipe) => lay_out_rooms(grid, rng, config, recipe),
        Recipe::ClearingsAndPaths(recipe) => {
            lay_out_blobs(grid, rng, config, &recipe.clearings, None)
        }
        Recipe::IslandsAndBridges(recipe) => {
            lay_out_blobs(grid, rng, config, &recipe.islands, recipe.mainland.as_ref())
        }
    }
}

fn lay_out_blobs(
    grid: &mut GridBuilder,
    rng: &mut GenRng,
    config: &BiomeConfig,
    regular: &BlobParams,
    special: Option<&BlobParams>,
) -> HubLayout {
    let overwritable = TerrainSet::of(&[config.terrain.background]);
    let mut shapes = place_blobs(rng, config.width, config.height, regular, config.border, &[]);

    let mut special_index = None;
    if let Some(special) = special {
        let taken: Vec<Pos> = shapes.iter().map(|shape| shape.center).collect();
        let extra = place_blobs(rng, config.width, config.height, special, config.border, &taken);
        if let Some(&shape) = extra.first() {
            special_index = Some(shapes.len());
            shapes.push(shape);
        }
    }

    let mut carved_cells = 0;
    for shape in &shapes {
        carved_cells +=
            carve_blob(grid, rng, shape, config.terrain.floor, overwritable, config.border);
    }

    HubLayout {
        hubs: shapes.iter().map(|shape| shape.center).collect(),
        special: special_index,
        carved_cells,
    }
}

fn lay_out_rooms(
    grid: &mut GridBuilder,
    rng: &mut GenRng,
    config: &BiomeConfig,
    recipe: &RoomRecipe,
) -> HubLayout {
    let mut rooms = place_rooms(rng, config.width, config.height, recipe, config.border);

    let mut special_index = None;
    if let Some(size) = recipe.throne_room
        && let Some(throne) = place_extra_room(
            rng,
            config.width,
            config.height,
            size,
            recipe.margin,
            config.border,
            &rooms,
        )
    {
        special_index = Some(rooms.len());
        rooms.push(throne);
    }

    let mut carved_cells = 0;
    for room in &rooms {
        carve_room(grid, room, config.terrain.floor);
        carved_cells += ((room.width - 2).max(0) * (room.height - 2).max(0)) as usize;
    }

    HubLayout {
        hubs: rooms.iter().map(|room| room.center()).collect(),
        special: special_index,
        carved_cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::grid::TerrainView;
    use crate::types::Biome;

    #[test]
    fn every_hub_sits_on_its_carved_floor() {
        for biome in Biome::ALL {
            let config = BiomeConfig::preset(biome);
            let mut grid = GridBuilder::new(config.width, config.height, config.terrain.background);
            let mut rng = GenRng::from_seed(31);
            let layout = lay_out_hubs(&mut grid, &mut rng, &config);

            assert!(layout.hubs.len() >= 2, "{biome} placed {} hubs", layout.hubs.len());
            assert!(layout.carved_cells > 0);
            for hub in &layout.hubs {
                assert_eq!(grid.get(*hub), config.terrain.floor, "{biome} hub {hub:?}");
            }
        }
    }

    #[test]
    fn special_hub_is_last_when_the_recipe_has_one() {
        for biome in [Biome::Volcano, Biome::WorldMap] {
            let config = BiomeConfig::preset(biome);
            let mut grid = GridBuilder::new(config.width, config.height, config.terrain.background);
            let mut rng = GenRng::from_seed(77);
            let layout = lay_out_hubs(&mut grid, &mut rng, &config);
            assert_eq!(layout.special, Some(layout.hubs.len() - 1), "{biome}");
        }

        let config = BiomeConfig::preset(Biome::Cave);
        let mut grid = GridBuilder::new(config.width, config.height, config.terrain.background);
        let mut rng = GenRng::from_seed(77);
        assert_eq!(lay_out_hubs(&mut grid, &mut rng, &config).special, None);
    }
}
