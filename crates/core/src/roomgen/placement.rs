//! Local transforms for grid cells.
//!
//! Floors and props sit at the cell center. Walls and doors sit on the
//! midpoint of one cell edge, rotated to the quarter turn of that edge. The
//! edge comes from the slot when configured, otherwise it is the cell edge
//! nearest the room boundary (ties resolved North, East, South, West).

use crate::types::{Edge, ElementType, GridCoord, LocalTransform, Vec3};

pub fn compute_transform(
    coord: GridCoord,
    element_type: ElementType,
    edge: Option<Edge>,
    tile_size: f32,
    extent: (u32, u32),
) -> LocalTransform {
    let half = tile_size / 2.0;
    let center_x = coord.x as f32 * tile_size + half;
    let center_y = coord.y as f32 * tile_size + half;

    match element_type {
        ElementType::FloorOrProp => LocalTransform::at(Vec3::new(center_x, center_y, 0.0)),
        ElementType::WallOrDoor => {
            let edge = edge.unwrap_or_else(|| nearest_boundary_edge(coord, extent));
            let (dx, dy) = edge.offset();
            LocalTransform {
                position: Vec3::new(center_x + dx * half, center_y + dy * half, 0.0),
                yaw_degrees: edge.yaw_degrees(),
            }
        }
    }
}

pub fn nearest_boundary_edge(coord: GridCoord, extent: (u32, u32)) -> Edge {
    let (size_x, size_y) = (i64::from(extent.0), i64::from(extent.1));
    let (x, y) = (i64::from(coord.x), i64::from(coord.y));
    let distance = |edge: Edge| match edge {
        Edge::North => size_y - 1 - y,
        Edge::East => size_x - 1 - x,
        Edge::South => y,
        Edge::West => x,
    };

    let mut best = Edge::North;
    for edge in Edge::ALL {
        if distance(edge) < distance(best) {
            best = edge;
        }
    }
    best
}
