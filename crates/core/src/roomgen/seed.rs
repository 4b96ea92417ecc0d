//! Synchronized seed values and the dungeon-to-room seed derivation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::stream::SeededStream;

/// The single authoritative seed synchronized to every peer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DungeonSeed(pub i32);

impl DungeonSeed {
    /// One draw over `[0, i32::MAX]` from a stream seeded with this value.
    pub fn derive_room_seed(self) -> RoomSeed {
        let mut stream = SeededStream::new(self.0);
        RoomSeed(stream.rand_range(0, i32::MAX))
    }
}

impl fmt::Display for DungeonSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Seed for one room's candidate selection.
///
/// Only obtainable from a [`DungeonSeed`] or from a value that was itself
/// synchronized, so a room never draws from locally generated entropy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RoomSeed(i32);

impl RoomSeed {
    /// Wrap a room seed that arrived through the synchronized channel.
    pub fn from_synchronized(value: i32) -> Self {
        Self(value)
    }

    pub fn value(self) -> i32 {
        self.0
    }

    pub(crate) fn stream(self) -> SeededStream {
        SeededStream::new(self.0)
    }
}

impl From<DungeonSeed> for RoomSeed {
    fn from(seed: DungeonSeed) -> Self {
        seed.derive_room_seed()
    }
}

impl fmt::Display for RoomSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
