//! Cargo holds - tonnage-limited commodity manifests

use serde::{Deserialize, Serialize};

use crate::core::types::Commodity;

/// One manifest line: a commodity and how many tons of it are stowed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoEntry {
    pub commodity: Commodity,
    pub quantity: u32,
}

/// A ship's cargo hold: an ordered manifest under a tonnage ceiling
///
/// Manifest order is stable; transfers always work from the head. Entries
/// never hold a zero quantity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CargoHold {
    entries: Vec<CargoEntry>,
    capacity: u32,
}

impl CargoHold {
    pub fn new(capacity: u32) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Tons currently stowed
    pub fn used(&self) -> u32 {
        self.entries.iter().map(|e| e.quantity).sum()
    }

    /// Tons of free space left
    pub fn free(&self) -> u32 {
        self.capacity.saturating_sub(self.used())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CargoEntry] {
        &self.entries
    }

    pub fn first(&self) -> Option<&CargoEntry> {
        self.entries.first()
    }

    /// How much of one commodity is aboard, across all manifest lines
    pub fn quantity_of(&self, commodity: Commodity) -> u32 {
        self.entries
            .iter()
            .filter(|e| e.commodity == commodity)
            .map(|e| e.quantity)
            .sum()
    }

    /// Try to stow a commodity, returns the amount actually stowed
    pub fn add(&mut self, commodity: Commodity, amount: u32) -> u32 {
        let added = amount.min(self.free());
        if added == 0 {
            return 0;
        }
        if let Some(entry) = self.entries.iter_mut().find(|e| e.commodity == commodity) {
            entry.quantity += added;
        } else {
            self.entries.push(CargoEntry {
                commodity,
                quantity: added,
            });
        }
        added
    }

    /// Take up to `amount` tons from the first manifest line
    ///
    /// Returns what was taken; the line is dropped once it empties. `None`
    /// when the manifest is empty or `amount` is zero.
    pub fn take_first(&mut self, amount: u32) -> Option<(Commodity, u32)> {
        let entry = self.entries.first_mut()?;
        let taken = amount.min(entry.quantity);
        if taken == 0 {
            return None;
        }
        entry.quantity -= taken;
        let commodity = entry.commodity;
        if entry.quantity == 0 {
            self.entries.remove(0);
        }
        Some((commodity, taken))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_respects_capacity() {
        let mut hold = CargoHold::new(50);
        assert_eq!(hold.capacity(), 50);

        assert_eq!(hold.add(Commodity::Ore, 30), 30);
        assert_eq!(hold.used(), 30);

        // Can't exceed capacity
        assert_eq!(hold.add(Commodity::Ore, 30), 20);
        assert_eq!(hold.used(), 50);
        assert_eq!(hold.free(), 0);

        // Full hold takes nothing
        assert_eq!(hold.add(Commodity::Food, 5), 0);
        assert_eq!(hold.entries().len(), 1);
    }

    #[test]
    fn test_add_merges_matching_lines() {
        let mut hold = CargoHold::new(100);
        hold.add(Commodity::Ore, 10);
        hold.add(Commodity::Food, 20);
        hold.add(Commodity::Ore, 5);

        assert_eq!(hold.entries().len(), 2);
        assert_eq!(hold.quantity_of(Commodity::Ore), 15);
        assert_eq!(hold.quantity_of(Commodity::Food), 20);
    }

    #[test]
    fn test_take_first_drains_in_order() {
        let mut hold = CargoHold::new(100);
        hold.add(Commodity::Ore, 40);
        hold.add(Commodity::Food, 10);
        assert_eq!(hold.first().map(|e| e.commodity), Some(Commodity::Ore));

        assert_eq!(hold.take_first(25), Some((Commodity::Ore, 25)));
        assert_eq!(hold.quantity_of(Commodity::Ore), 15);

        // Remainder of the first line, then the next line moves up
        assert_eq!(hold.take_first(100), Some((Commodity::Ore, 15)));
        assert_eq!(hold.take_first(100), Some((Commodity::Food, 10)));
        assert!(hold.is_empty());
        assert_eq!(hold.take_first(100), None);
    }

    #[test]
    fn test_take_first_zero_is_none() {
        let mut hold = CargoHold::new(100);
        hold.add(Commodity::Ore, 40);
        assert_eq!(hold.take_first(0), None);
        assert_eq!(hold.quantity_of(Commodity::Ore), 40);
    }
}
