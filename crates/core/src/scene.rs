//! Boundary to the rendering layer: a scene anchor attaches plan entries
//! relative to itself and can drop everything it attached.

use slotmap::{SlotMap, new_key_type};

use crate::roomgen::{Placement, PlacementPlan};

new_key_type! {
    pub struct InstanceId;
}

pub trait SceneAnchor {
    /// Attach every entry at its local transform relative to this anchor.
    fn apply_plan(&mut self, plan: &PlacementPlan);

    /// Remove all previously attached entries.
    fn clear_plan(&mut self);
}

/// Scene anchor that keeps attached instances in memory, in attach order.
#[derive(Debug, Default)]
pub struct MemoryScene {
    instances: SlotMap<InstanceId, Placement>,
    order: Vec<InstanceId>,
    clears: u32,
}

impl MemoryScene {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn instance(&self, id: InstanceId) -> Option<&Placement> {
        self.instances.get(id)
    }

    pub fn instance_ids(&self) -> &[InstanceId] {
        &self.order
    }

    /// Attached instances reassembled as a plan.
    pub fn attached_plan(&self) -> PlacementPlan {
        PlacementPlan {
            entries: self.order.iter().map(|&id| self.instances[id].clone()).collect(),
        }
    }

    /// Number of times the anchor was cleared.
    pub fn clear_count(&self) -> u32 {
        self.clears
    }
}

impl SceneAnchor for MemoryScene {
    fn apply_plan(&mut self, plan: &PlacementPlan) {
        for entry in plan {
            let id = self.instances.insert(entry.clone());
            self.order.push(id);
        }
    }

    fn clear_plan(&mut self) {
        self.instances.clear();
        self.order.clear();
        self.clears += 1;
    }
}
