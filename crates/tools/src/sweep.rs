//! Multi-seed consistency sweep over one room configuration.

use std::collections::{BTreeMap, BTreeSet};

use roomgen::{
    AssetHandle, DungeonSeed, LocalTransform, PlacementSource, RoomConfiguration, RoomLayout,
    generate_room, occupied_count, resolve_cell,
};

#[derive(Debug, Default)]
pub struct SweepReport {
    pub seeds_checked: u32,
    pub entries_per_plan: usize,
    pub failures: Vec<String>,
    /// Distinct assets selected per source, next to the pool size.
    pub coverage: BTreeMap<SourceKey, (usize, usize)>,
}

impl SweepReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Orderable form of a placement source for report tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SourceKey {
    Cell(i32, i32),
    Slot(usize),
}

impl From<PlacementSource> for SourceKey {
    fn from(source: PlacementSource) -> Self {
        match source {
            PlacementSource::Cell(coord) => Self::Cell(coord.x, coord.y),
            PlacementSource::Slot(index) => Self::Slot(index),
        }
    }
}

fn pool_size(config: &RoomConfiguration, source: PlacementSource) -> usize {
    match (source, config.layout()) {
        (PlacementSource::Cell(coord), _) => {
            resolve_cell(config, coord).map_or(0, |cell| cell.candidates.len())
        }
        (PlacementSource::Slot(index), RoomLayout::Slots(slots)) => {
            slots.get(index).map_or(0, |slot| slot.possible_meshes.len())
        }
        (PlacementSource::Slot(_), RoomLayout::Grid { .. }) => 0,
    }
}

pub fn run_sweep(config: &RoomConfiguration, start: i32, seeds: u32) -> SweepReport {
    let expected_entries = occupied_count(config);
    let mut report = SweepReport { entries_per_plan: expected_entries, ..SweepReport::default() };
    let mut baseline: Option<Vec<(PlacementSource, LocalTransform)>> = None;
    let mut selected: BTreeMap<SourceKey, BTreeSet<AssetHandle>> = BTreeMap::new();

    for offset in 0..seeds {
        let seed = DungeonSeed(start.wrapping_add_unsigned(offset));
        let first = generate_room(seed, Some(config));
        let second = generate_room(seed, Some(config));
        report.seeds_checked += 1;

        if first.canonical_bytes() != second.canonical_bytes() {
            report.failures.push(format!("seed {seed}: regeneration produced different bytes"));
        }
        if first.len() != expected_entries {
            report.failures.push(format!(
                "seed {seed}: {} entries, expected {expected_entries}",
                first.len()
            ));
        }

        let layout: Vec<_> = first.iter().map(|entry| (entry.source, entry.transform)).collect();
        match &baseline {
            None => baseline = Some(layout),
            Some(expected) if *expected != layout => {
                report.failures.push(format!("seed {seed}: positions differ from seed {start}"));
            }
            Some(_) => {}
        }

        for entry in &first {
            selected.entry(entry.source.into()).or_default().insert(entry.asset.clone());
        }
    }

    let pools: BTreeMap<SourceKey, usize> = baseline
        .iter()
        .flatten()
        .map(|(source, _)| (SourceKey::from(*source), pool_size(config, *source)))
        .collect();
    report.coverage = selected
        .into_iter()
        .map(|(key, assets)| (key, (assets.len(), pools.get(&key).copied().unwrap_or(0))))
        .collect();
    report
}
