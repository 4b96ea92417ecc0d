//! Decides which element type and candidate list apply to a grid cell.

use crate::config::{RoomConfiguration, RoomLayout};
use crate::types::{AssetHandle, Edge, ElementType, GridCoord};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedCell<'a> {
    pub element_type: ElementType,
    pub candidates: &'a [AssetHandle],
    pub edge: Option<Edge>,
}

/// Resolve a grid cell. Returns `None` for unoccupied cells and for flat-slot
/// configurations, which carry no grid.
///
/// An override with an empty candidate list suppresses the cell; it never
/// falls back to the default floor meshes.
pub fn resolve_cell(config: &RoomConfiguration, coord: GridCoord) -> Option<ResolvedCell<'_>> {
    let RoomLayout::Grid { cells, default_floor_meshes } = config.layout() else {
        return None;
    };
    match cells.get(&coord) {
        Some(slot) if slot.possible_meshes.is_empty() => None,
        Some(slot) => Some(ResolvedCell {
            element_type: slot.element_type,
            candidates: &slot.possible_meshes,
            edge: slot.edge,
        }),
        None if default_floor_meshes.is_empty() => None,
        None => Some(ResolvedCell {
            element_type: ElementType::FloorOrProp,
            candidates: default_floor_meshes,
            edge: None,
        }),
    }
}

/// Number of plan entries a generation run produces for this configuration.
pub fn occupied_count(config: &RoomConfiguration) -> usize {
    match config.layout() {
        RoomLayout::Grid { .. } => {
            let mut count = 0;
            for x in 0..config.grid_size_x() as i32 {
                for y in 0..config.grid_size_y() as i32 {
                    if resolve_cell(config, GridCoord::new(x, y)).is_some() {
                        count += 1;
                    }
                }
            }
            count
        }
        RoomLayout::Slots(slots) => {
            slots.iter().filter(|slot| !slot.possible_meshes.is_empty()).count()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeometrySlot, MeshSlotData};
    use crate::types::LocalTransform;

    fn room() -> RoomConfiguration {
        RoomConfiguration::grid_builder(100.0, 3, 3)
            .default_floor(["floor_a", "floor_b"])
            .cell(GridCoord::new(1, 1), MeshSlotData::wall(["wall"], Some(Edge::East)))
            .cell(GridCoord::new(2, 2), MeshSlotData::empty(ElementType::FloorOrProp))
            .build()
            .expect("valid config")
    }

    #[test]
    fn override_takes_precedence_over_default() {
        let config = room();
        let resolved = resolve_cell(&config, GridCoord::new(1, 1)).expect("occupied");
        assert_eq!(resolved.element_type, ElementType::WallOrDoor);
        assert_eq!(resolved.candidates, &[AssetHandle::new("wall")]);
        assert_eq!(resolved.edge, Some(Edge::East));
    }

    #[test]
    fn unconfigured_cell_uses_default_floor() {
        let config = room();
        let resolved = resolve_cell(&config, GridCoord::new(0, 2)).expect("occupied");
        assert_eq!(resolved.element_type, ElementType::FloorOrProp);
        assert_eq!(resolved.candidates.len(), 2);
    }

    #[test]
    fn empty_override_suppresses_cell() {
        assert_eq!(resolve_cell(&room(), GridCoord::new(2, 2)), None);
    }

    #[test]
    fn no_default_leaves_cell_unoccupied() {
        let config = RoomConfiguration::grid_builder(100.0, 2, 2).build().expect("valid config");
        assert_eq!(resolve_cell(&config, GridCoord::new(0, 0)), None);
    }

    #[test]
    fn occupied_count_skips_suppressed_cells() {
        assert_eq!(occupied_count(&room()), 8);
    }

    #[test]
    fn flat_slot_form_has_no_grid() {
        let slot = GeometrySlot {
            element_type: ElementType::FloorOrProp,
            possible_meshes: vec![AssetHandle::new("crate")],
            relative_transform: LocalTransform::IDENTITY,
        };
        let config = RoomConfiguration::slots(100.0, vec![slot]).expect("valid config");
        assert_eq!(resolve_cell(&config, GridCoord::new(0, 0)), None);
        assert_eq!(occupied_count(&config), 1);
    }
}
