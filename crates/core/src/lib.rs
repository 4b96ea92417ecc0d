pub mod config;
pub mod config_file;
pub mod roomgen;
pub mod scene;
pub mod sync;
pub mod types;

pub use config::{ConfigError, GeometrySlot, MeshSlotData, RoomConfiguration, RoomLayout};
pub use config_file::{RoomConfigFile, load_room_config};
pub use roomgen::{
    DungeonSeed, Placement, PlacementPlan, PlacementSource, ResolvedCell, RoomGenerator, RoomSeed,
    SeededStream, generate, generate_room, occupied_count, resolve_cell,
};
pub use scene::{MemoryScene, SceneAnchor};
pub use sync::{
    CoordinatorError, LocalSession, Phase, Role, SeedBus, SeedChannel, SeedCoordinator,
    SeedSubscription,
};
pub use types::*;
