use std::fs;
use std::path::Path;

use tempfile::tempdir;

use super::*;
use crate::mapgen::config::{Recipe, Span};
use crate::types::{Biome, Terrain, TerrainSet};

#[test]
fn every_preset_survives_toml_and_json_files() {
    let dir = tempdir().unwrap();
    for biome in Biome::ALL {
        let preset = BiomeConfig::preset(biome);
        for extension in ["toml", "json"] {
            let path = dir.path().join(format!("{biome}.{extension}"));
            save_biome_config(&path, &preset).unwrap();
            let loaded = load_biome_config(&path).unwrap();
            assert_eq!(loaded, preset, "{biome} via .{extension}");
        }
    }
}

#[test]
fn spans_are_written_as_pairs() {
    let cave = BiomeConfig::preset(Biome::Cave);
    let text = render_biome_config(&cave, ConfigFormat::Toml).unwrap();
    assert!(text.contains("kind = \"cave_chambers\""), "{text}");
    assert!(text.contains("radius_x = ["), "{text}");
}

#[test]
fn hand_edited_toml_is_validated() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("crypt.toml");
    let mut config = BiomeConfig::preset(Biome::Crypt);
    if let Recipe::RoomsAndCorridors(recipe) = &mut config.recipe {
        recipe.room_width = Span::new(12, 6);
    }
    fs::write(&path, render_biome_config(&config, ConfigFormat::Toml).unwrap()).unwrap();

    let error = load_biome_config(&path).unwrap_err();
    assert!(
        matches!(error, ConfigLoadError::Invalid(ConfigError::EmptyRange { field: "room_width" })),
        "unexpected error: {error}"
    );
}

#[test]
fn malformed_json_reports_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ \"biome\": \"cave\", ").unwrap();

    let error = load_biome_config(&path).unwrap_err();
    assert!(matches!(error, ConfigLoadError::Parse { format: ConfigFormat::Json, .. }));
    assert!(error.to_string().starts_with("invalid JSON config"));
}

#[test]
fn unknown_terrain_name_is_a_parse_error() {
    let text = render_biome_config(&BiomeConfig::preset(Biome::Volcano), ConfigFormat::Json)
        .unwrap()
        .replace("\"lava\"", "\"magma\"");
    let error = parse_biome_config(&text, ConfigFormat::Json).unwrap_err();
    assert!(matches!(error, ConfigLoadError::Parse { .. }), "unexpected error: {error}");
}

#[test]
fn unsupported_extension_is_rejected_before_reading() {
    let error = load_biome_config(Path::new("does/not/exist/biome.yaml")).unwrap_err();
    assert!(matches!(
        error,
        ConfigLoadError::UnsupportedExtension(ref extension) if extension == "yaml"
    ));
}

#[test]
fn missing_file_reports_io_error() {
    let dir = tempdir().unwrap();
    let error = load_biome_config(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(error, ConfigLoadError::Io(_)));
}

#[test]
fn optional_fields_fall_back_to_defaults() {
    let mut config = BiomeConfig::preset(Biome::Forest);
    if let Recipe::ClearingsAndPaths(recipe) = &mut config.recipe {
        recipe.paths.extra_edges = 0;
        if let Some(water) = &mut recipe.water {
            water.flows_halt_near = TerrainSet::EMPTY;
        }
    }
    let text = render_biome_config(&config, ConfigFormat::Json).unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let recipe = &mut value["recipe"];
    recipe["paths"].as_object_mut().unwrap().remove("extra_edges");
    recipe["water"].as_object_mut().unwrap().remove("flows_halt_near");

    let loaded = parse_biome_config(&value.to_string(), ConfigFormat::Json).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.terrain.floor, Terrain::Ground);
}
