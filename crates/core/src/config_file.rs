//! File-backed room configuration in TOML or JSON.
//!
//! The format is picked from the file extension. Both formats share one
//! schema: a tile size, a grid extent, `default_floor_meshes` plus `cells`
//! overrides for the grid form, or `geometry_slots` for the flat-slot form.
//! Supplying both forms in one file is an error, and that includes a grid
//! extent next to `geometry_slots`.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, GeometrySlot, MeshSlotData, RoomConfiguration};
use crate::types::{AssetHandle, Edge, ElementType, GridCoord, LocalTransform, Vec3};

const DEFAULT_TILE_SIZE: f32 = 400.0;

fn default_tile_size() -> f32 {
    DEFAULT_TILE_SIZE
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RoomConfigFile {
    #[serde(default = "default_tile_size")]
    pub tile_size: f32,
    #[serde(default)]
    pub grid_size_x: u32,
    #[serde(default)]
    pub grid_size_y: u32,
    #[serde(default)]
    pub default_floor_meshes: Vec<AssetHandle>,
    #[serde(default)]
    pub cells: Vec<CellEntry>,
    #[serde(default)]
    pub geometry_slots: Vec<SlotEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CellEntry {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub element_type: ElementType,
    #[serde(default)]
    pub meshes: Vec<AssetHandle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge: Option<Edge>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SlotEntry {
    #[serde(default)]
    pub element_type: ElementType,
    #[serde(default)]
    pub meshes: Vec<AssetHandle>,
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default)]
    pub yaw_degrees: f32,
}

impl RoomConfigFile {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::Parse { format: "toml", message: e.to_string() })
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content)
            .map_err(|e| ConfigError::Parse { format: "json", message: e.to_string() })
    }

    pub fn into_config(self) -> Result<RoomConfiguration, ConfigError> {
        if !self.geometry_slots.is_empty() {
            let has_grid_data = !self.cells.is_empty()
                || !self.default_floor_meshes.is_empty()
                || self.grid_size_x != 0
                || self.grid_size_y != 0;
            if has_grid_data {
                return Err(ConfigError::MixedLayout);
            }
            let slots = self
                .geometry_slots
                .into_iter()
                .map(|entry| GeometrySlot {
                    element_type: entry.element_type,
                    possible_meshes: entry.meshes,
                    relative_transform: LocalTransform {
                        position: Vec3::new(entry.position[0], entry.position[1], entry.position[2]),
                        yaw_degrees: entry.yaw_degrees,
                    },
                })
                .collect();
            return RoomConfiguration::slots(self.tile_size, slots);
        }

        let mut cells = BTreeMap::new();
        for entry in self.cells {
            let coord = GridCoord::new(entry.x, entry.y);
            match cells.entry(coord) {
                Entry::Occupied(_) => return Err(ConfigError::DuplicateCell(coord)),
                Entry::Vacant(vacant) => {
                    vacant.insert(MeshSlotData {
                        element_type: entry.element_type,
                        possible_meshes: entry.meshes,
                        edge: entry.edge,
                    });
                }
            }
        }
        RoomConfiguration::grid(
            self.tile_size,
            self.grid_size_x,
            self.grid_size_y,
            cells,
            self.default_floor_meshes,
        )
    }
}

/// Load and validate a room configuration file (`.toml` or `.json`).
pub fn load_room_config(path: &Path) -> Result<RoomConfiguration, ConfigError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let parse: fn(&str) -> Result<RoomConfigFile, ConfigError> = match extension.as_str() {
        "toml" => RoomConfigFile::from_toml_str,
        "json" => RoomConfigFile::from_json_str,
        _ => return Err(ConfigError::UnsupportedFormat { extension: extension.clone() }),
    };
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse(&content)?.into_config()
}

#[cfg(test)]
mod tests;
