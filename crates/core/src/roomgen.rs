//! Deterministic seed-to-layout pipeline split into coherent submodules.

pub mod placement;
pub mod resolver;
pub mod stream;

mod generator;
mod model;
mod seed;

pub use generator::{RoomGenerator, generate};
pub use model::{Placement, PlacementPlan, PlacementSource};
pub use resolver::{ResolvedCell, occupied_count, resolve_cell};
pub use seed::{DungeonSeed, RoomSeed};
pub use stream::SeededStream;

use crate::config::RoomConfiguration;

/// Full pipeline from the synchronized dungeon seed. A missing configuration
/// yields an empty plan.
pub fn generate_room(
    dungeon_seed: DungeonSeed,
    config: Option<&RoomConfiguration>,
) -> PlacementPlan {
    match config {
        Some(config) => generate(dungeon_seed.derive_room_seed(), config),
        None => PlacementPlan::default(),
    }
}
