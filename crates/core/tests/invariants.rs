use std::collections::BTreeSet;

use tilegen::mapgen::grid::{GridBuilder, TerrainView};
use tilegen::mapgen::refine::smooth;
use tilegen::mapgen::shapes::enforce_border;
use tilegen::mapgen::validate::{border_is_intact, count_regions, reachable_from, unreachable_hubs};
use tilegen::mapgen::{GenRng, LevelGenerator};
use tilegen::{Biome, Pos, Terrain, TerrainSet};

const SWEEP_SEEDS: u64 = 110;

fn biome_for(seed: u64) -> Biome {
    Biome::ALL[seed as usize % Biome::ALL.len()]
}

#[test]
fn every_hub_is_reachable_from_the_first_across_many_seeds() {
    for seed in 0..SWEEP_SEEDS {
        let biome = biome_for(seed);
        let level = LevelGenerator::for_biome(biome).generate(seed.wrapping_mul(0x9e37_79b9));
        let walkable = level.terrain_table().walkable;

        let cut_off = unreachable_hubs(level.grid(), level.hub_list(), walkable);
        assert!(cut_off.is_empty(), "{biome} seed {seed}: hubs {cut_off:?} cut off");
        assert_eq!(count_regions(level.grid(), walkable), 1, "{biome} seed {seed}");

        let reached = reachable_from(level.grid(), level.hub_list()[0], walkable);
        for (index, &terrain) in level.grid().cells().iter().enumerate() {
            if walkable.contains(terrain) {
                assert!(reached[index], "{biome} seed {seed}: walkable cell {index} stranded");
            }
        }
    }
}

#[test]
fn generated_borders_stay_blocked() {
    for seed in 0..SWEEP_SEEDS {
        let biome = biome_for(seed);
        let generator = LevelGenerator::for_biome(biome);
        let level = generator.generate(seed);
        let blocked = level.terrain_table().blocked;
        assert!(
            border_is_intact(level.grid(), generator.config().border, blocked),
            "{biome} seed {seed}"
        );
    }
}

#[test]
fn walkable_and_obstacle_queries_agree_everywhere() {
    for biome in Biome::ALL {
        let level = LevelGenerator::for_biome(biome).generate(31);
        let (width, height) = (level.width() as i32, level.height() as i32);
        for y in 0..height {
            for x in 0..width {
                assert_ne!(level.is_walkable(x, y), level.is_obstacle(x, y), "{biome} ({x},{y})");
            }
        }
        for (x, y) in [(-1, 0), (0, -1), (width, 0), (0, height), (i32::MIN, i32::MAX)] {
            assert!(!level.is_walkable(x, y));
            assert!(level.is_obstacle(x, y));
            assert!(!level.is_hazard(x, y));
            assert_eq!(level.terrain_at(x, y), level.terrain_table().blocked);
        }
    }
}

#[test]
fn smoothing_never_turns_lava_walkable() {
    let mut grid = GridBuilder::new(24, 18, Terrain::Wall);
    for y in 2..16 {
        for x in 2..22 {
            let terrain = if (x + y) % 5 == 0 { Terrain::Lava } else { Terrain::Floor };
            grid.set(Pos::new(x, y), terrain);
        }
    }
    for x in 8..12 {
        grid.set(Pos::new(x, 3), Terrain::Wall);
    }
    enforce_border(&mut grid, 1, Terrain::Wall);
    let lava_before: Vec<bool> =
        grid.cells().iter().map(|&terrain| terrain == Terrain::Lava).collect();

    smooth(&mut grid, 4, Terrain::Floor, Terrain::Wall, TerrainSet::of(&[Terrain::Lava]), 1);

    for (index, &was_lava) in lava_before.iter().enumerate() {
        if was_lava {
            assert_eq!(grid.cells()[index], Terrain::Lava, "cell {index}");
        }
    }
}

#[test]
fn volcano_lava_survives_generation_unwalkable() {
    for seed in 0..12 {
        let level = LevelGenerator::for_biome(Biome::Volcano).generate(seed);
        let table = level.terrain_table();
        assert!(!table.walkable.contains(Terrain::Lava));
        for (index, &terrain) in level.grid().cells().iter().enumerate() {
            if terrain == Terrain::Lava {
                let x = (index % level.width()) as i32;
                let y = (index / level.width()) as i32;
                assert!(level.is_hazard(x, y));
                assert!(level.is_obstacle(x, y));
            }
        }
    }
}

#[test]
fn sampled_entities_are_distinct_bounded_and_outside_the_start_radius() {
    let level = LevelGenerator::for_biome(Biome::Dungeon).generate(8);
    let start = level.player_start_position();
    let radius = 6.0_f32;
    let radius_squared = f64::from(radius) * f64::from(radius);

    let mut rng = GenRng::from_seed(1);
    let picked = level.sample_entity_positions(&mut rng, 25, radius);
    assert!(picked.len() <= 25);
    assert_eq!(picked.iter().collect::<BTreeSet<_>>().len(), picked.len());
    for pos in &picked {
        assert!(level.is_walkable(pos.x, pos.y));
        assert!(pos.distance_squared(start) as f64 >= radius_squared);
    }

    let pool = level
        .grid()
        .cells()
        .iter()
        .enumerate()
        .filter(|&(index, &terrain)| {
            let pos = Pos::new((index % level.width()) as i32, (index / level.width()) as i32);
            level.terrain_table().is_walkable(terrain)
                && pos.distance_squared(start) as f64 >= radius_squared
        })
        .count();
    let mut rng = GenRng::from_seed(2);
    let everything = level.sample_entity_positions(&mut rng, usize::MAX, radius);
    assert_eq!(everything.len(), pool);
}
