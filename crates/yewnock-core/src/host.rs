//! The seam between the engine and the game client.
//!
//! The engine only ever reads integers, a visibility flag and an inventory
//! snapshot from the host. `VarpHost` is an in-memory host addressed by raw
//! varp ids, used for replays and tests.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::{HostLayout, WidgetRef};
use crate::inventory::Inventory;

/// Seed displays that define the targets. Observation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeedSlot {
    Puzzle1Left,
    Puzzle1Right,
    Puzzle2,
}

impl SeedSlot {
    pub fn all() -> &'static [SeedSlot] {
        &[SeedSlot::Puzzle1Left, SeedSlot::Puzzle1Right, SeedSlot::Puzzle2]
    }

    pub fn varp(&self, layout: &HostLayout) -> u32 {
        match self {
            SeedSlot::Puzzle1Left => layout.puzzle1_left_varp,
            SeedSlot::Puzzle1Right => layout.puzzle1_right_varp,
            SeedSlot::Puzzle2 => layout.puzzle2_varp,
        }
    }

    /// Seed addressed by `varp`, if it is one of ours.
    pub fn from_varp(layout: &HostLayout, varp: u32) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.varp(layout) == varp)
    }
}

/// Receptacles the player puts discs into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FillSlot {
    Puzzle1,
    Puzzle2Upper,
    Puzzle2Lower,
}

impl FillSlot {
    pub fn all() -> &'static [FillSlot] {
        &[FillSlot::Puzzle1, FillSlot::Puzzle2Upper, FillSlot::Puzzle2Lower]
    }

    pub fn varp(&self, layout: &HostLayout) -> u32 {
        match self {
            FillSlot::Puzzle1 => layout.puzzle1_slot_varp,
            FillSlot::Puzzle2Upper => layout.puzzle2_upper_slot_varp,
            FillSlot::Puzzle2Lower => layout.puzzle2_lower_slot_varp,
        }
    }

    pub fn widget(&self, layout: &HostLayout) -> WidgetRef {
        layout.widget(match self {
            FillSlot::Puzzle1 => layout.puzzle1_slot_child,
            FillSlot::Puzzle2Upper => layout.puzzle2_upper_slot_child,
            FillSlot::Puzzle2Lower => layout.puzzle2_lower_slot_child,
        })
    }
}

impl std::fmt::Display for FillSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FillSlot::Puzzle1 => write!(f, "puzzle 1 slot"),
            FillSlot::Puzzle2Upper => write!(f, "puzzle 2 upper slot"),
            FillSlot::Puzzle2Lower => write!(f, "puzzle 2 lower slot"),
        }
    }
}

/// Live game state as the engine sees it.
pub trait PuzzleHost {
    /// Whether the machine interface is currently open.
    fn interface_visible(&self) -> bool;

    /// Raw seed value: a disc item id, or 0 when unset.
    fn seed_value(&self, seed: SeedSlot) -> i32;

    /// Raw slot value: the inserted disc's item id, or 0 when empty.
    fn slot_value(&self, slot: FillSlot) -> i32;

    /// Disc container contents, or `None` if the host has not loaded it.
    fn inventory(&self) -> Option<Inventory>;
}

/// In-memory host keyed by varp id.
#[derive(Debug, Clone, Default)]
pub struct VarpHost {
    pub layout: HostLayout,
    pub visible: bool,
    pub varps: HashMap<u32, i32>,
    pub container: Option<Inventory>,
}

impl VarpHost {
    pub fn new(layout: HostLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    pub fn set_varp(&mut self, varp: u32, value: i32) {
        self.varps.insert(varp, value);
    }

    pub fn varp(&self, varp: u32) -> i32 {
        self.varps.get(&varp).copied().unwrap_or(0)
    }

    pub fn set_seed(&mut self, seed: SeedSlot, value: i32) {
        let varp = seed.varp(&self.layout);
        self.set_varp(varp, value);
    }

    pub fn set_slot(&mut self, slot: FillSlot, value: i32) {
        let varp = slot.varp(&self.layout);
        self.set_varp(varp, value);
    }
}

impl PuzzleHost for VarpHost {
    fn interface_visible(&self) -> bool {
        self.visible
    }

    fn seed_value(&self, seed: SeedSlot) -> i32 {
        self.varp(seed.varp(&self.layout))
    }

    fn slot_value(&self, slot: FillSlot) -> i32 {
        self.varp(slot.varp(&self.layout))
    }

    fn inventory(&self) -> Option<Inventory> {
        self.container.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_from_varp() {
        let layout = HostLayout::default();
        assert_eq!(SeedSlot::from_varp(&layout, 3997), Some(SeedSlot::Puzzle1Left));
        assert_eq!(SeedSlot::from_varp(&layout, 3999), Some(SeedSlot::Puzzle2));
        // Slot varps are sampled, not routed as seeds
        assert_eq!(SeedSlot::from_varp(&layout, 3994), None);
        assert_eq!(SeedSlot::from_varp(&layout, 856), None);
    }

    #[test]
    fn test_varp_host_reads_through_layout() {
        let mut host = VarpHost::new(HostLayout::default());
        host.set_varp(3995, 12);
        host.set_seed(SeedSlot::Puzzle2, 7);
        assert_eq!(host.slot_value(FillSlot::Puzzle2Upper), 12);
        assert_eq!(host.slot_value(FillSlot::Puzzle2Lower), 0);
        assert_eq!(host.seed_value(SeedSlot::Puzzle2), 7);
        assert_eq!(host.varp(3999), 7);
        assert!(host.inventory().is_none());
    }

    #[test]
    fn test_slot_widgets() {
        let layout = HostLayout::default();
        assert_eq!(FillSlot::Puzzle1.widget(&layout), WidgetRef { group: 848, child: 19 });
        assert_eq!(FillSlot::Puzzle2Lower.widget(&layout), WidgetRef { group: 848, child: 21 });
    }
}
