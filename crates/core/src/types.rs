use std::fmt;

use serde::{Deserialize, Serialize};

/// One addressable cell of a room grid: `x` is the column, `y` the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    /// Centered on its cell, no rotation.
    #[default]
    FloorOrProp,
    /// Aligned to one cell edge and rotated to face it.
    WallOrDoor,
}

impl ElementType {
    pub(crate) fn code(self) -> u8 {
        match self {
            Self::FloorOrProp => 0,
            Self::WallOrDoor => 1,
        }
    }
}

/// Cardinal cell edge. North is +Y, East is +X.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    North,
    East,
    South,
    West,
}

impl Edge {
    /// Tie-break order used when an edge has to be derived.
    pub const ALL: [Edge; 4] = [Edge::North, Edge::East, Edge::South, Edge::West];

    pub fn yaw_degrees(self) -> f32 {
        match self {
            Self::North => 0.0,
            Self::East => 90.0,
            Self::South => 180.0,
            Self::West => 270.0,
        }
    }

    /// Unit step from a cell center toward this edge.
    pub fn offset(self) -> (f32, f32) {
        match self {
            Self::North => (0.0, 1.0),
            Self::East => (1.0, 0.0),
            Self::South => (0.0, -1.0),
            Self::West => (-1.0, 0.0),
        }
    }

    pub(crate) fn code(self) -> u8 {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Transform relative to the room's local origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalTransform {
    pub position: Vec3,
    pub yaw_degrees: f32,
}

impl LocalTransform {
    pub const IDENTITY: Self = Self { position: Vec3::ZERO, yaw_degrees: 0.0 };

    pub const fn at(position: Vec3) -> Self {
        Self { position, yaw_degrees: 0.0 }
    }

    pub(crate) fn write_canonical(&self, bytes: &mut Vec<u8>) {
        bytes.extend(self.position.x.to_bits().to_le_bytes());
        bytes.extend(self.position.y.to_bits().to_le_bytes());
        bytes.extend(self.position.z.to_bits().to_le_bytes());
        bytes.extend(self.yaw_degrees.to_bits().to_le_bytes());
    }
}

/// Opaque reference to a visual asset. Resolving it is the renderer's job.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetHandle(pub String);

impl AssetHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn write_canonical(&self, bytes: &mut Vec<u8>) {
        bytes.extend((self.0.len() as u32).to_le_bytes());
        bytes.extend(self.0.as_bytes());
    }
}

impl fmt::Display for AssetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetHandle {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_coords_order_by_column_then_row() {
        let mut coords = vec![GridCoord::new(1, 0), GridCoord::new(0, 1), GridCoord::new(0, 0)];
        coords.sort();
        assert_eq!(coords, vec![GridCoord::new(0, 0), GridCoord::new(0, 1), GridCoord::new(1, 0)]);
    }

    #[test]
    fn edges_map_to_distinct_quarter_turns() {
        let yaws: Vec<f32> = Edge::ALL.iter().map(|edge| edge.yaw_degrees()).collect();
        assert_eq!(yaws, vec![0.0, 90.0, 180.0, 270.0]);
    }

    #[test]
    fn element_type_uses_snake_case_names() {
        let json = serde_json::to_string(&ElementType::WallOrDoor).expect("serialize");
        assert_eq!(json, "\"wall_or_door\"");
    }
}
