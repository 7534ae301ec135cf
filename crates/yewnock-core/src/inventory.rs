use serde::{Deserialize, Serialize};

use crate::disc::{DiscId, DiscRequirement};
use crate::value_table::ValueTable;

/// One stack in the host's disc container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: DiscId,
    pub quantity: u32,
}

/// Snapshot of what the player currently holds, in host order.
///
/// The same id may appear in several stacks; quantities are summed on lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: Vec<InventoryItem>,
}

impl Inventory {
    pub fn new(items: Vec<InventoryItem>) -> Self {
        Self { items }
    }

    /// Build from `(id, quantity)` pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        Self {
            items: pairs
                .into_iter()
                .map(|(id, quantity)| InventoryItem {
                    id: DiscId(id),
                    quantity,
                })
                .collect(),
        }
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.iter().all(|i| i.quantity == 0)
    }

    pub fn quantity_of(&self, id: DiscId) -> u32 {
        self.items
            .iter()
            .filter(|i| i.id == id)
            .fold(0u32, |acc, i| acc.saturating_add(i.quantity))
    }

    pub fn contains(&self, id: DiscId) -> bool {
        self.quantity_of(id) > 0
    }

    /// First alternative of `requirement` the player holds at least one of.
    pub fn holds(&self, requirement: &DiscRequirement) -> Option<DiscId> {
        requirement
            .alternatives()
            .into_iter()
            .find(|&id| self.contains(id))
    }

    /// Total number of puzzle discs held, ignoring anything not in the table.
    pub fn disc_count(&self, table: &ValueTable) -> u32 {
        self.items
            .iter()
            .filter(|i| table.is_disc(i.id))
            .fold(0u32, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Remove one unit of `id`. Returns false if none was held.
    pub fn take(&mut self, id: DiscId) -> bool {
        match self.items.iter_mut().find(|i| i.id == id && i.quantity > 0) {
            Some(item) => {
                item.quantity -= 1;
                true
            }
            None => false,
        }
    }

    /// Add `quantity` units of `id`, stacking onto an existing entry.
    pub fn add(&mut self, id: DiscId, quantity: u32) {
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) => item.quantity = item.quantity.saturating_add(quantity),
            None => self.items.push(InventoryItem { id, quantity }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantities_sum_across_stacks() {
        let inv = Inventory::from_pairs([(4, 1), (7, 2), (4, 3)]);
        assert_eq!(inv.quantity_of(DiscId(4)), 4);
        assert_eq!(inv.quantity_of(DiscId(7)), 2);
        assert_eq!(inv.quantity_of(DiscId(8)), 0);
        assert!(!inv.contains(DiscId(8)));
    }

    #[test]
    fn test_huge_host_stacks_saturate() {
        let table = ValueTable::new();
        let mut inv = Inventory::from_pairs([(1, u32::MAX), (1, 5), (28, u32::MAX)]);
        assert_eq!(inv.quantity_of(DiscId(1)), u32::MAX);
        assert_eq!(inv.disc_count(&table), u32::MAX);
        inv.add(DiscId(28), 1);
        assert_eq!(inv.quantity_of(DiscId(28)), u32::MAX);
    }

    #[test]
    fn test_holds_prefers_first_alternative() {
        let inv = Inventory::from_pairs([(9, 1), (2, 1)]);
        let req = DiscRequirement::EitherOf(DiscId(2), DiscId(9));
        assert_eq!(inv.holds(&req), Some(DiscId(2)));

        let inv = Inventory::from_pairs([(9, 1)]);
        assert_eq!(inv.holds(&req), Some(DiscId(9)));

        let inv = Inventory::from_pairs([(2, 0)]);
        assert_eq!(inv.holds(&req), None);
    }

    #[test]
    fn test_disc_count_ignores_other_items() {
        let table = ValueTable::new();
        let inv = Inventory::from_pairs([(1, 2), (28, 1), (995, 10_000)]);
        assert_eq!(inv.disc_count(&table), 3);
    }

    #[test]
    fn test_take_and_add() {
        let mut inv = Inventory::from_pairs([(3, 1)]);
        assert!(inv.take(DiscId(3)));
        assert!(!inv.take(DiscId(3)));
        assert!(inv.is_empty());
        inv.add(DiscId(3), 2);
        inv.add(DiscId(5), 1);
        assert_eq!(inv.quantity_of(DiscId(3)), 2);
        assert_eq!(inv.items().len(), 2);
    }
}
