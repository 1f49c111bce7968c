//! Equipment bays - ordered outfit slots on a hull

use serde::{Deserialize, Serialize};

use crate::core::types::EquipmentKind;

/// A ship's equipment bay: a fixed run of slots, each empty or fitted
///
/// Slot order is stable and only matters for deterministic iteration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquipmentBay {
    slots: Vec<Option<EquipmentKind>>,
}

impl EquipmentBay {
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: vec![None; slot_count],
        }
    }

    /// Build a bay with exactly these kinds fitted, one per slot
    pub fn with_fitted(kinds: &[EquipmentKind]) -> Self {
        Self {
            slots: kinds.iter().map(|k| Some(*k)).collect(),
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Option<EquipmentKind>] {
        &self.slots
    }

    /// Fitted equipment in slot order, skipping empty slots
    pub fn fitted(&self) -> impl Iterator<Item = EquipmentKind> + '_ {
        self.slots.iter().filter_map(|s| *s)
    }

    pub fn fitted_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn has_fitted(&self) -> bool {
        self.slots.iter().any(|s| s.is_some())
    }

    /// Fit into the first empty slot; false if the bay has none
    pub fn fit(&mut self, kind: EquipmentKind) -> bool {
        match self.slots.iter_mut().find(|s| s.is_none()) {
            Some(slot) => {
                *slot = Some(kind);
                true
            }
            None => false,
        }
    }

    /// Empty every slot, yielding the removed equipment in slot order
    pub fn strip(&mut self) -> Vec<EquipmentKind> {
        self.slots.iter_mut().filter_map(|s| s.take()).collect()
    }
}
