use std::fs;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use super::*;
use crate::config::RoomLayout;

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

const GRID_TOML: &str = r#"
tile_size = 400.0
grid_size_x = 3
grid_size_y = 2
default_floor_meshes = ["floor_a", "floor_b"]

[[cells]]
x = 0
y = 0
element_type = "wall_or_door"
meshes = ["wall_a", "wall_b"]
edge = "south"

[[cells]]
x = 2
y = 1
meshes = []
"#;

#[test]
fn loads_grid_form_from_toml() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "room.toml", GRID_TOML);

    let config = load_room_config(&path).unwrap();
    assert_eq!(config.tile_size(), 400.0);
    assert_eq!(config.grid_size_x(), 3);
    assert_eq!(config.grid_size_y(), 2);

    let RoomLayout::Grid { cells, default_floor_meshes } = config.layout() else {
        panic!("expected grid layout");
    };
    assert_eq!(default_floor_meshes, &vec![AssetHandle::new("floor_a"), AssetHandle::new("floor_b")]);
    assert_eq!(cells.len(), 2);

    let wall = &cells[&GridCoord::new(0, 0)];
    assert_eq!(wall.element_type, ElementType::WallOrDoor);
    assert_eq!(wall.edge, Some(Edge::South));
    assert_eq!(wall.possible_meshes.len(), 2);

    // Missing element_type defaults to floor.
    let suppressed = &cells[&GridCoord::new(2, 1)];
    assert_eq!(suppressed.element_type, ElementType::FloorOrProp);
    assert!(suppressed.possible_meshes.is_empty());
}

#[test]
fn toml_and_json_describe_the_same_room() {
    let dir = tempdir().unwrap();
    let toml_path = write_file(dir.path(), "room.toml", GRID_TOML);
    let json_path = write_file(
        dir.path(),
        "room.json",
        r#"{
            "tile_size": 400.0,
            "grid_size_x": 3,
            "grid_size_y": 2,
            "default_floor_meshes": ["floor_a", "floor_b"],
            "cells": [
                { "x": 0, "y": 0, "element_type": "wall_or_door",
                  "meshes": ["wall_a", "wall_b"], "edge": "south" },
                { "x": 2, "y": 1, "meshes": [] }
            ]
        }"#,
    );

    let from_toml = load_room_config(&toml_path).unwrap();
    let from_json = load_room_config(&json_path).unwrap();
    assert_eq!(from_toml, from_json);
    assert_eq!(from_toml.fingerprint(), from_json.fingerprint());
}

#[test]
fn loads_flat_slot_form() {
    let dir = tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "slots.toml",
        r#"
[[geometry_slots]]
meshes = ["crate", "barrel"]
position = [100.0, 50.0, 0.0]
yaw_degrees = 90.0

[[geometry_slots]]
element_type = "wall_or_door"
meshes = []
"#,
    );

    let config = load_room_config(&path).unwrap();
    assert_eq!(config.tile_size(), 400.0, "tile size should fall back to the default");
    let RoomLayout::Slots(slots) = config.layout() else {
        panic!("expected flat-slot layout");
    };
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].relative_transform.position, Vec3::new(100.0, 50.0, 0.0));
    assert_eq!(slots[0].relative_transform.yaw_degrees, 90.0);
    assert_eq!(slots[1].element_type, ElementType::WallOrDoor);
}

#[test]
fn rejects_duplicate_cells() {
    let dir = tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "dup.toml",
        r#"
grid_size_x = 2
grid_size_y = 2

[[cells]]
x = 1
y = 1
meshes = ["a"]

[[cells]]
x = 1
y = 1
meshes = ["b"]
"#,
    );

    let err = load_room_config(&path).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateCell(coord) if coord == GridCoord::new(1, 1)));
}

#[test]
fn rejects_mixed_layout_forms() {
    let file = RoomConfigFile::from_toml_str(
        r#"
grid_size_x = 1
grid_size_y = 1
default_floor_meshes = ["floor"]

[[geometry_slots]]
meshes = ["crate"]
"#,
    )
    .unwrap();

    assert!(matches!(file.into_config(), Err(ConfigError::MixedLayout)));
}

#[test]
fn rejects_grid_extent_next_to_flat_slots() {
    for extent in ["grid_size_x = 4", "grid_size_y = 2"] {
        let file = RoomConfigFile::from_toml_str(&format!(
            "{extent}\n\n[[geometry_slots]]\nmeshes = [\"crate\"]\n"
        ))
        .unwrap();
        assert!(matches!(file.into_config(), Err(ConfigError::MixedLayout)), "{extent}");
    }
}

#[test]
fn rejects_unknown_fields() {
    let err = RoomConfigFile::from_toml_str("tile_sise = 10.0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { format: "toml", .. }));
}

#[test]
fn rejects_unsupported_extension_before_reading() {
    let err = load_room_config(Path::new("does/not/exist.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat { ref extension } if extension == "yaml"));
}

#[test]
fn missing_file_reports_io_error() {
    let dir = tempdir().unwrap();
    let err = load_room_config(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn rejects_invalid_tile_size_from_file() {
    let file = RoomConfigFile::from_json_str(r#"{ "tile_size": -5.0 }"#).unwrap();
    assert!(matches!(file.into_config(), Err(ConfigError::InvalidTileSize(_))));
}
