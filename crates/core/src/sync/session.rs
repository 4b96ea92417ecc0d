//! One authority and any number of observers wired through an in-process bus.

use std::iter;
use std::sync::Arc;

use crate::config::RoomConfiguration;
use crate::roomgen::DungeonSeed;
use crate::scene::MemoryScene;

use super::{CoordinatorError, SeedBus, SeedCoordinator, SeedSubscription};

struct ObserverPeer {
    coordinator: SeedCoordinator<MemoryScene>,
    subscription: SeedSubscription,
}

pub struct LocalSession {
    config: Option<Arc<RoomConfiguration>>,
    bus: SeedBus,
    authority: SeedCoordinator<MemoryScene>,
    observers: Vec<ObserverPeer>,
}

impl LocalSession {
    pub fn new(config: Option<Arc<RoomConfiguration>>, observer_count: usize) -> Self {
        let mut session = Self {
            authority: SeedCoordinator::authority(config.clone(), MemoryScene::default()),
            config,
            bus: SeedBus::default(),
            observers: Vec::new(),
        };
        for _ in 0..observer_count {
            session.add_observer();
        }
        session
    }

    /// Join a new observer; it catches up on the next `pump`. Returns its index.
    pub fn add_observer(&mut self) -> usize {
        self.observers.push(ObserverPeer {
            coordinator: SeedCoordinator::observer(self.config.clone(), MemoryScene::default()),
            subscription: self.bus.subscribe(),
        });
        self.observers.len() - 1
    }

    /// Start generation on the authority. Observers see it on the next `pump`.
    pub fn start_generation(&mut self, seed: DungeonSeed) -> Result<(), CoordinatorError> {
        self.authority.start_generation(seed, &mut self.bus).map(|_| ())
    }

    /// Deliver the latest seed to every observer that has not seen it.
    /// Returns the number of deliveries.
    pub fn pump(&mut self) -> usize {
        let mut delivered = 0;
        for peer in &mut self.observers {
            if let Some(seed) = self.bus.poll(&mut peer.subscription) {
                peer.coordinator.on_seed_received(seed);
                delivered += 1;
            }
        }
        delivered
    }

    pub fn authority(&self) -> &SeedCoordinator<MemoryScene> {
        &self.authority
    }

    pub fn observer(&self, index: usize) -> Option<&SeedCoordinator<MemoryScene>> {
        self.observers.get(index).map(|peer| &peer.coordinator)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Plan fingerprints, authority first.
    pub fn fingerprints(&self) -> Vec<u64> {
        iter::once(&self.authority)
            .chain(self.observers.iter().map(|peer| &peer.coordinator))
            .map(|coordinator| coordinator.last_plan().fingerprint())
            .collect()
    }

    /// True when every peer holds the authority's seed and an identical plan.
    pub fn in_sync(&self) -> bool {
        let seed = self.authority.dungeon_seed();
        let fingerprint = self.authority.last_plan().fingerprint();
        self.observers.iter().all(|peer| {
            peer.coordinator.dungeon_seed() == seed
                && peer.coordinator.last_plan().fingerprint() == fingerprint
        })
    }
}
