//! Printable level summaries and the invariant audit used by the sweep binary.

use serde::Serialize;
use tilegen::mapgen::grid::TerrainView;
use tilegen::mapgen::validate::{border_is_intact, count_regions, unreachable_hubs};
use tilegen::{Biome, Level, Pos};

#[derive(Clone, Debug, Serialize)]
pub struct LevelSummary {
    pub biome: Biome,
    pub seed: u64,
    pub width: usize,
    pub height: usize,
    pub fingerprint: String,
    pub player_start: Pos,
    pub portal: Pos,
    pub hubs: Vec<Pos>,
    pub special_hub: Option<Pos>,
    pub entity_spawns: Vec<Pos>,
    pub decorations: Vec<Pos>,
    pub rows: Vec<String>,
}

impl LevelSummary {
    pub fn of(level: &Level) -> Self {
        Self {
            biome: level.biome(),
            seed: level.seed(),
            width: level.width(),
            height: level.height(),
            fingerprint: format!("{:016x}", level.fingerprint()),
            player_start: level.player_start_position(),
            portal: level.portal_position(),
            hubs: level.hub_list().to_vec(),
            special_hub: level.special_hub(),
            entity_spawns: level.entity_spawns().to_vec(),
            decorations: level.decorations().to_vec(),
            rows: level.ascii_rows(),
        }
    }
}

/// Every broken invariant found in `level`, as readable messages.
pub fn audit_level(level: &Level, border: i32) -> Vec<String> {
    let table = level.terrain_table();
    let mut problems = Vec::new();

    if !border_is_intact(level.grid(), border, table.blocked) {
        problems.push(format!("border ring of {border} is not all {:?}", table.blocked));
    }
    let cut_off = unreachable_hubs(level.grid(), level.hub_list(), table.walkable);
    if !cut_off.is_empty() {
        problems.push(format!("hubs {cut_off:?} unreachable from hub 0"));
    }
    let regions = count_regions(level.grid(), table.walkable);
    if regions > 1 {
        problems.push(format!("{regions} separate walkable regions"));
    }

    let (width, height) = (level.width() as i32, level.height() as i32);
    for y in 0..height {
        for x in 0..width {
            if level.is_walkable(x, y) == level.is_obstacle(x, y) {
                problems.push(format!("walkable/obstacle disagree at ({x},{y})"));
            }
        }
    }
    if level.is_walkable(-1, -1) || level.is_walkable(width, height) {
        problems.push("out-of-range cell reported walkable".to_string());
    }

    let start = level.player_start_position();
    let portal = level.portal_position();
    if !level.grid().in_bounds(start) || !level.is_walkable(start.x, start.y) {
        problems.push(format!("player start {start:?} is not walkable"));
    }
    if !level.is_walkable(portal.x, portal.y) || portal == start {
        problems.push(format!("portal {portal:?} is unusable"));
    }

    let radius = f64::from(level.entity_exclusion_radius());
    for spawn in level.entity_spawns() {
        if !level.is_walkable(spawn.x, spawn.y)
            || (spawn.distance_squared(start) as f64) < radius * radius
        {
            problems.push(format!("entity spawn {spawn:?} breaks placement rules"));
        }
    }
    problems
}
