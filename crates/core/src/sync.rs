//! Seed coordination between an authoritative peer and its observers.
//!
//! Only the seed crosses the wire. Each peer owns its own coordinator and
//! room generator and rebuilds the plan locally when a seed arrives.

mod session;

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::RoomConfiguration;
use crate::roomgen::{DungeonSeed, PlacementPlan, RoomGenerator};
use crate::scene::SceneAnchor;

pub use session::LocalSession;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Authority,
    Observer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// The authority picked a seed and has not yet applied it.
    SeedAssigned(DungeonSeed),
    /// The seed reached this peer; regeneration is pending.
    SeedPropagated(DungeonSeed),
    /// The plan for this seed is attached to the anchor.
    Generated(DungeonSeed),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoordinatorError {
    /// An observer called the authority-only entry point.
    NotAuthority,
}

impl fmt::Display for CoordinatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAuthority => write!(f, "only the authority may start generation"),
        }
    }
}

impl Error for CoordinatorError {}

/// Outbound half of seed replication.
pub trait SeedChannel {
    fn publish(&mut self, seed: DungeonSeed);
}

pub struct SeedCoordinator<A: SceneAnchor> {
    role: Role,
    phase: Phase,
    dungeon_seed: Option<DungeonSeed>,
    config: Option<Arc<RoomConfiguration>>,
    /// Created on the first synchronized seed.
    room: Option<RoomGenerator>,
    anchor: A,
    generations: u64,
    last_plan: PlacementPlan,
}

impl<A: SceneAnchor> SeedCoordinator<A> {
    pub fn new(role: Role, config: Option<Arc<RoomConfiguration>>, anchor: A) -> Self {
        Self {
            role,
            phase: Phase::Idle,
            dungeon_seed: None,
            config,
            room: None,
            anchor,
            generations: 0,
            last_plan: PlacementPlan::default(),
        }
    }

    pub fn authority(config: Option<Arc<RoomConfiguration>>, anchor: A) -> Self {
        Self::new(Role::Authority, config, anchor)
    }

    pub fn observer(config: Option<Arc<RoomConfiguration>>, anchor: A) -> Self {
        Self::new(Role::Observer, config, anchor)
    }

    /// Authority entry point: assign the seed, publish it, and regenerate
    /// locally. Observers are rejected without touching any state.
    pub fn start_generation(
        &mut self,
        seed: DungeonSeed,
        channel: &mut impl SeedChannel,
    ) -> Result<&PlacementPlan, CoordinatorError> {
        if self.role != Role::Authority {
            warn!(seed = seed.0, "observer attempted to start generation; ignored");
            return Err(CoordinatorError::NotAuthority);
        }
        info!(seed = seed.0, "dungeon seed assigned");
        self.phase = Phase::SeedAssigned(seed);
        self.dungeon_seed = Some(seed);
        channel.publish(seed);
        Ok(self.on_seed_received(seed))
    }

    /// Reaction to a synchronized seed, identical on every role. Runs exactly
    /// one generation and fully replaces whatever the anchor held before.
    pub fn on_seed_received(&mut self, seed: DungeonSeed) -> &PlacementPlan {
        info!(seed = seed.0, role = ?self.role, "dungeon seed received");
        self.phase = Phase::SeedPropagated(seed);
        self.dungeon_seed = Some(seed);

        let room_seed = seed.derive_room_seed();
        let room =
            self.room.get_or_insert_with(|| RoomGenerator::new(self.config.clone(), room_seed));
        room.set_config(self.config.clone());
        room.set_local_seed(room_seed);
        self.last_plan = room.execute_population(&mut self.anchor);
        self.generations += 1;
        self.phase = Phase::Generated(seed);
        &self.last_plan
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn dungeon_seed(&self) -> Option<DungeonSeed> {
        self.dungeon_seed
    }

    /// The room generator, once a seed has been received.
    pub fn room(&self) -> Option<&RoomGenerator> {
        self.room.as_ref()
    }

    pub fn anchor(&self) -> &A {
        &self.anchor
    }

    /// Number of generation runs since construction.
    pub fn generations(&self) -> u64 {
        self.generations
    }

    pub fn last_plan(&self) -> &PlacementPlan {
        &self.last_plan
    }
}

/// In-process replicated seed value.
///
/// Mirrors property replication: publishing an unchanged value is a no-op,
/// and a subscriber that polls after several publishes sees only the latest.
#[derive(Debug, Default)]
pub struct SeedBus {
    latest: Option<DungeonSeed>,
    revision: u64,
}

#[derive(Debug, Default)]
pub struct SeedSubscription {
    seen_revision: u64,
}

impl SeedBus {
    /// New subscribers receive the current value on their first poll.
    pub fn subscribe(&self) -> SeedSubscription {
        SeedSubscription::default()
    }

    pub fn poll(&self, subscription: &mut SeedSubscription) -> Option<DungeonSeed> {
        if subscription.seen_revision == self.revision {
            return None;
        }
        subscription.seen_revision = self.revision;
        self.latest
    }

    pub fn latest(&self) -> Option<DungeonSeed> {
        self.latest
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl SeedChannel for SeedBus {
    fn publish(&mut self, seed: DungeonSeed) {
        if self.latest == Some(seed) {
            return;
        }
        self.latest = Some(seed);
        self.revision += 1;
    }
}
