//! Immutable room configuration: grid extent, tile size, per-cell overrides,
//! default fill, or the alternative flat list of pre-transformed slots.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::io;

use xxhash_rust::xxh3::xxh3_64;

use crate::types::{AssetHandle, Edge, ElementType, GridCoord, LocalTransform};

/// Largest accepted grid extent along either axis.
pub const MAX_GRID_EXTENT: u32 = 4096;

/// One configured grid cell.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshSlotData {
    pub element_type: ElementType,
    pub possible_meshes: Vec<AssetHandle>,
    /// Edge a wall faces. Ignored for floors; derived from the extent when absent.
    pub edge: Option<Edge>,
}

impl MeshSlotData {
    pub fn floor<I, A>(meshes: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<AssetHandle>,
    {
        Self {
            element_type: ElementType::FloorOrProp,
            possible_meshes: meshes.into_iter().map(Into::into).collect(),
            edge: None,
        }
    }

    pub fn wall<I, A>(meshes: I, edge: Option<Edge>) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<AssetHandle>,
    {
        Self {
            element_type: ElementType::WallOrDoor,
            possible_meshes: meshes.into_iter().map(Into::into).collect(),
            edge,
        }
    }

    /// An override with no candidates; suppresses its cell.
    pub fn empty(element_type: ElementType) -> Self {
        Self { element_type, possible_meshes: Vec::new(), edge: None }
    }
}

/// A self-describing slot of the flat-slot configuration form.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometrySlot {
    pub element_type: ElementType,
    pub possible_meshes: Vec<AssetHandle>,
    pub relative_transform: LocalTransform,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RoomLayout {
    Grid { cells: BTreeMap<GridCoord, MeshSlotData>, default_floor_meshes: Vec<AssetHandle> },
    Slots(Vec<GeometrySlot>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoomConfiguration {
    tile_size: f32,
    grid_size_x: u32,
    grid_size_y: u32,
    layout: RoomLayout,
}

impl RoomConfiguration {
    pub fn grid_builder(tile_size: f32, grid_size_x: u32, grid_size_y: u32) -> GridRoomBuilder {
        GridRoomBuilder {
            tile_size,
            grid_size_x,
            grid_size_y,
            cells: BTreeMap::new(),
            default_floor_meshes: Vec::new(),
        }
    }

    pub fn grid(
        tile_size: f32,
        grid_size_x: u32,
        grid_size_y: u32,
        cells: BTreeMap<GridCoord, MeshSlotData>,
        default_floor_meshes: Vec<AssetHandle>,
    ) -> Result<Self, ConfigError> {
        validate_tile_size(tile_size)?;
        validate_extent('x', grid_size_x)?;
        validate_extent('y', grid_size_y)?;
        Ok(Self {
            tile_size,
            grid_size_x,
            grid_size_y,
            layout: RoomLayout::Grid { cells, default_floor_meshes },
        })
    }

    pub fn slots(tile_size: f32, slots: Vec<GeometrySlot>) -> Result<Self, ConfigError> {
        validate_tile_size(tile_size)?;
        for (index, slot) in slots.iter().enumerate() {
            let transform = &slot.relative_transform;
            let finite = [
                transform.position.x,
                transform.position.y,
                transform.position.z,
                transform.yaw_degrees,
            ]
            .iter()
            .all(|value| value.is_finite());
            if !finite {
                return Err(ConfigError::NonFiniteTransform { slot: index });
            }
        }
        Ok(Self { tile_size, grid_size_x: 0, grid_size_y: 0, layout: RoomLayout::Slots(slots) })
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn grid_size_x(&self) -> u32 {
        self.grid_size_x
    }

    pub fn grid_size_y(&self) -> u32 {
        self.grid_size_y
    }

    pub fn layout(&self) -> &RoomLayout {
        &self.layout
    }

    pub fn in_extent(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as u32) < self.grid_size_x
            && (coord.y as u32) < self.grid_size_y
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.tile_size.to_bits().to_le_bytes());
        bytes.extend(self.grid_size_x.to_le_bytes());
        bytes.extend(self.grid_size_y.to_le_bytes());
        match &self.layout {
            RoomLayout::Grid { cells, default_floor_meshes } => {
                bytes.push(0);
                bytes.extend((cells.len() as u32).to_le_bytes());
                for (coord, slot) in cells {
                    bytes.extend(coord.x.to_le_bytes());
                    bytes.extend(coord.y.to_le_bytes());
                    bytes.push(slot.element_type.code());
                    bytes.push(slot.edge.map_or(u8::MAX, Edge::code));
                    write_handles(&mut bytes, &slot.possible_meshes);
                }
                write_handles(&mut bytes, default_floor_meshes);
            }
            RoomLayout::Slots(slots) => {
                bytes.push(1);
                bytes.extend((slots.len() as u32).to_le_bytes());
                for slot in slots {
                    bytes.push(slot.element_type.code());
                    slot.relative_transform.write_canonical(&mut bytes);
                    write_handles(&mut bytes, &slot.possible_meshes);
                }
            }
        }
        bytes
    }

    /// Content hash peers can compare before trusting each other's plans.
    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

fn write_handles(bytes: &mut Vec<u8>, handles: &[AssetHandle]) {
    bytes.extend((handles.len() as u32).to_le_bytes());
    for handle in handles {
        handle.write_canonical(bytes);
    }
}

fn validate_tile_size(tile_size: f32) -> Result<(), ConfigError> {
    if tile_size.is_finite() && tile_size > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidTileSize(tile_size))
    }
}

fn validate_extent(axis: char, size: u32) -> Result<(), ConfigError> {
    if size > MAX_GRID_EXTENT {
        return Err(ConfigError::GridTooLarge { axis, size });
    }
    Ok(())
}

/// Incremental construction of a grid-form configuration.
/// A later `cell` call for the same coordinate replaces the earlier one.
#[derive(Clone, Debug)]
pub struct GridRoomBuilder {
    tile_size: f32,
    grid_size_x: u32,
    grid_size_y: u32,
    cells: BTreeMap<GridCoord, MeshSlotData>,
    default_floor_meshes: Vec<AssetHandle>,
}

impl GridRoomBuilder {
    pub fn default_floor<I, A>(mut self, meshes: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<AssetHandle>,
    {
        self.default_floor_meshes = meshes.into_iter().map(Into::into).collect();
        self
    }

    pub fn cell(mut self, coord: GridCoord, slot: MeshSlotData) -> Self {
        self.cells.insert(coord, slot);
        self
    }

    pub fn build(self) -> Result<RoomConfiguration, ConfigError> {
        RoomConfiguration::grid(
            self.tile_size,
            self.grid_size_x,
            self.grid_size_y,
            self.cells,
            self.default_floor_meshes,
        )
    }
}

/// Describes why a room configuration could not be built or loaded.
#[derive(Debug)]
pub enum ConfigError {
    /// Underlying I/O failure while reading a configuration file.
    Io(io::Error),
    /// The file extension does not name a supported format.
    UnsupportedFormat { extension: String },
    /// The file contents did not parse.
    Parse { format: &'static str, message: String },
    InvalidTileSize(f32),
    GridTooLarge { axis: char, size: u32 },
    DuplicateCell(GridCoord),
    /// Grid data and flat slots were both supplied.
    MixedLayout,
    NonFiniteTransform { slot: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "room config I/O error: {e}"),
            Self::UnsupportedFormat { extension } => {
                write!(f, "unsupported room config format '{extension}' (expected toml or json)")
            }
            Self::Parse { format, message } => {
                write!(f, "invalid {format} room config: {message}")
            }
            Self::InvalidTileSize(size) => {
                write!(f, "tile size must be a positive finite number, got {size}")
            }
            Self::GridTooLarge { axis, size } => {
                write!(f, "grid size {axis}={size} exceeds the limit of {MAX_GRID_EXTENT}")
            }
            Self::DuplicateCell(coord) => {
                write!(f, "cell ({}, {}) is configured more than once", coord.x, coord.y)
            }
            Self::MixedLayout => {
                write!(f, "room config mixes grid cells with flat geometry slots")
            }
            Self::NonFiniteTransform { slot } => {
                write!(f, "geometry slot {slot} has a non-finite transform")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}
