//! Room generation: walks the configured grid (or flat slot list), resolves
//! each cell, and draws one candidate per occupied cell from the room stream.

use std::sync::Arc;

use tracing::debug;

use crate::config::{GeometrySlot, RoomConfiguration, RoomLayout};
use crate::scene::SceneAnchor;
use crate::types::GridCoord;

use super::model::{Placement, PlacementPlan, PlacementSource};
use super::placement::compute_transform;
use super::resolver::resolve_cell;
use super::seed::RoomSeed;
use super::stream::SeededStream;

/// Pure seed-to-plan function. Unoccupied cells consume no draws, so the
/// stream position depends only on the occupied cells visited before.
pub fn generate(room_seed: RoomSeed, config: &RoomConfiguration) -> PlacementPlan {
    let mut stream = room_seed.stream();
    let entries = match config.layout() {
        RoomLayout::Grid { .. } => generate_grid(&mut stream, config),
        RoomLayout::Slots(slots) => generate_slots(&mut stream, slots),
    };
    debug_assert_eq!(stream.draws(), entries.len() as u64);
    PlacementPlan { entries }
}

fn generate_grid(stream: &mut SeededStream, config: &RoomConfiguration) -> Vec<Placement> {
    let extent = (config.grid_size_x(), config.grid_size_y());
    let mut entries = Vec::new();
    // Column-major: x outer, y inner.
    for x in 0..extent.0 as i32 {
        for y in 0..extent.1 as i32 {
            let coord = GridCoord::new(x, y);
            let Some(cell) = resolve_cell(config, coord) else {
                continue;
            };
            let transform =
                compute_transform(coord, cell.element_type, cell.edge, config.tile_size(), extent);
            let index = stream.rand_index(cell.candidates.len());
            entries.push(Placement {
                asset: cell.candidates[index].clone(),
                transform,
                element_type: cell.element_type,
                source: PlacementSource::Cell(coord),
            });
        }
    }
    entries
}

fn generate_slots(stream: &mut SeededStream, slots: &[GeometrySlot]) -> Vec<Placement> {
    let mut entries = Vec::new();
    for (slot_index, slot) in slots.iter().enumerate() {
        if slot.possible_meshes.is_empty() {
            continue;
        }
        let index = stream.rand_index(slot.possible_meshes.len());
        entries.push(Placement {
            asset: slot.possible_meshes[index].clone(),
            transform: slot.relative_transform,
            element_type: slot.element_type,
            source: PlacementSource::Slot(slot_index),
        });
    }
    entries
}

/// One room instance: its configuration and locally held seed.
///
/// Every peer owns its own generator; nothing here is shared between peers.
#[derive(Clone, Debug)]
pub struct RoomGenerator {
    config: Option<Arc<RoomConfiguration>>,
    local_seed: RoomSeed,
}

impl RoomGenerator {
    pub fn new(config: Option<Arc<RoomConfiguration>>, local_seed: RoomSeed) -> Self {
        Self { config, local_seed }
    }

    pub fn config(&self) -> Option<&Arc<RoomConfiguration>> {
        self.config.as_ref()
    }

    pub fn set_config(&mut self, config: Option<Arc<RoomConfiguration>>) {
        self.config = config;
    }

    pub fn local_seed(&self) -> RoomSeed {
        self.local_seed
    }

    pub fn set_local_seed(&mut self, seed: RoomSeed) {
        self.local_seed = seed;
    }

    /// Plan for the current seed and configuration; empty without a configuration.
    pub fn generate(&self) -> PlacementPlan {
        match &self.config {
            Some(config) => generate(self.local_seed, config),
            None => PlacementPlan::default(),
        }
    }

    pub fn clear(&self, anchor: &mut impl SceneAnchor) {
        anchor.clear_plan();
    }

    /// Clear whatever the anchor holds, then attach a freshly generated plan.
    pub fn execute_population(&self, anchor: &mut impl SceneAnchor) -> PlacementPlan {
        self.clear(anchor);
        let plan = self.generate();
        debug!(
            room_seed = self.local_seed.value(),
            entries = plan.len(),
            fingerprint = plan.fingerprint(),
            "populated room"
        );
        anchor.apply_plan(&plan);
        plan
    }
}
