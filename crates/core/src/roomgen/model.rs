//! Placement plan produced by one generation run.

use std::slice;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{AssetHandle, ElementType, GridCoord, LocalTransform};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementSource {
    Cell(GridCoord),
    /// Index into the flat geometry-slot list.
    Slot(usize),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub asset: AssetHandle,
    pub transform: LocalTransform,
    pub element_type: ElementType,
    pub source: PlacementSource,
}

/// Ordered (asset, transform) entries, one per occupied cell or slot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementPlan {
    pub entries: Vec<Placement>,
}

impl PlacementPlan {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Placement> {
        self.entries.iter()
    }

    pub fn entry_for_cell(&self, coord: GridCoord) -> Option<&Placement> {
        self.entries.iter().find(|entry| entry.source == PlacementSource::Cell(coord))
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.entries.len() as u32).to_le_bytes());
        for entry in &self.entries {
            entry.asset.write_canonical(&mut bytes);
            bytes.push(entry.element_type.code());
            match entry.source {
                PlacementSource::Cell(coord) => {
                    bytes.push(0);
                    bytes.extend(coord.x.to_le_bytes());
                    bytes.extend(coord.y.to_le_bytes());
                }
                PlacementSource::Slot(index) => {
                    bytes.push(1);
                    bytes.extend((index as u64).to_le_bytes());
                }
            }
            entry.transform.write_canonical(&mut bytes);
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

impl<'a> IntoIterator for &'a PlacementPlan {
    type Item = &'a Placement;
    type IntoIter = slice::Iter<'a, Placement>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
