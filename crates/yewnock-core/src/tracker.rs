//! Puzzle state tracker.
//!
//! Owns the live observation of the machine: interface phase, the three seed
//! values, the fill state of the three receptacles, and the cached solution
//! derived from them. Notifications and ticks both mutate it through `&mut`;
//! there is no other owner.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::disc::{DiscId, DiscRequirement};
use crate::host::{FillSlot, PuzzleHost, SeedSlot};

/// Interface lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Closed,
    Observing,
}

/// Discrete notifications from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostEvent {
    InterfaceOpened,
    InterfaceClosed,
    SeedChanged { seed: SeedSlot, value: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SlotState {
    #[default]
    Empty,
    Filled(DiscId),
}

impl SlotState {
    pub fn from_raw(raw: i32) -> Self {
        match DiscId::from_raw(raw) {
            Some(id) => SlotState::Filled(id),
            None => SlotState::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SlotState::Empty)
    }

    pub fn disc(&self) -> Option<DiscId> {
        match self {
            SlotState::Filled(id) => Some(*id),
            SlotState::Empty => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Seeds {
    pub puzzle1_left: Option<DiscId>,
    pub puzzle1_right: Option<DiscId>,
    pub puzzle2: Option<DiscId>,
}

impl Seeds {
    pub fn get(&self, seed: SeedSlot) -> Option<DiscId> {
        match seed {
            SeedSlot::Puzzle1Left => self.puzzle1_left,
            SeedSlot::Puzzle1Right => self.puzzle1_right,
            SeedSlot::Puzzle2 => self.puzzle2,
        }
    }

    fn slot_mut(&mut self, seed: SeedSlot) -> &mut Option<DiscId> {
        match seed {
            SeedSlot::Puzzle1Left => &mut self.puzzle1_left,
            SeedSlot::Puzzle1Right => &mut self.puzzle1_right,
            SeedSlot::Puzzle2 => &mut self.puzzle2,
        }
    }

    pub fn all_set(&self) -> bool {
        self.puzzle1_left.is_some() && self.puzzle1_right.is_some() && self.puzzle2.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Slots {
    pub puzzle1: SlotState,
    pub puzzle2_upper: SlotState,
    pub puzzle2_lower: SlotState,
}

impl Slots {
    pub fn get(&self, slot: FillSlot) -> SlotState {
        match slot {
            FillSlot::Puzzle1 => self.puzzle1,
            FillSlot::Puzzle2Upper => self.puzzle2_upper,
            FillSlot::Puzzle2Lower => self.puzzle2_lower,
        }
    }

    pub fn set(&mut self, slot: FillSlot, state: SlotState) {
        match slot {
            FillSlot::Puzzle1 => self.puzzle1 = state,
            FillSlot::Puzzle2Upper => self.puzzle2_upper = state,
            FillSlot::Puzzle2Lower => self.puzzle2_lower = state,
        }
    }

    pub fn all_filled(&self) -> bool {
        FillSlot::all().iter().all(|&s| !self.get(s).is_empty())
    }
}

/// Discs chosen for sub-puzzle 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairSelection {
    pub upper: DiscRequirement,
    pub lower: DiscRequirement,
}

/// Cached answer, built lazily by the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Solution {
    pub puzzle1: Option<DiscRequirement>,
    pub puzzle2: Option<PairSelection>,
}

impl Solution {
    /// All three receptacles have a requirement.
    pub fn is_complete(&self) -> bool {
        self.puzzle1.is_some() && self.puzzle2.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default)]
pub struct PuzzleTracker {
    phase: Phase,
    seeds: Seeds,
    slots: Slots,
    solution: Solution,
    /// Number of sub-puzzle 2 candidate searches run since creation
    pair_searches: u64,
}

impl PuzzleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_observing(&self) -> bool {
        self.phase == Phase::Observing
    }

    pub fn seeds(&self) -> &Seeds {
        &self.seeds
    }

    pub fn slots(&self) -> &Slots {
        &self.slots
    }

    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    pub(crate) fn solution_mut(&mut self) -> &mut Solution {
        &mut self.solution
    }

    pub fn pair_searches(&self) -> u64 {
        self.pair_searches
    }

    pub(crate) fn record_pair_search(&mut self) {
        self.pair_searches += 1;
    }

    /// Apply a host notification. Returns whether tracked state changed.
    pub fn handle(&mut self, event: HostEvent) -> bool {
        match event {
            HostEvent::InterfaceOpened => self.open(),
            HostEvent::InterfaceClosed => self.close(),
            HostEvent::SeedChanged { seed, value } => self.set_seed(seed, DiscId::from_raw(value)),
        }
    }

    /// Re-sample the host. Visibility is polled here because the host does not
    /// reliably announce the interface closing.
    pub fn tick(&mut self, host: &impl PuzzleHost) -> bool {
        if !host.interface_visible() {
            return self.close();
        }

        let mut changed = self.open();
        for &seed in SeedSlot::all() {
            changed |= self.set_seed(seed, DiscId::from_raw(host.seed_value(seed)));
        }
        for &slot in FillSlot::all() {
            let state = SlotState::from_raw(host.slot_value(slot));
            if self.slots.get(slot) != state {
                self.slots.set(slot, state);
                changed = true;
            }
        }
        changed
    }

    fn open(&mut self) -> bool {
        if self.phase == Phase::Observing {
            return false;
        }
        debug!("puzzle interface opened");
        self.phase = Phase::Observing;
        self.solution.clear();
        true
    }

    fn close(&mut self) -> bool {
        if self.phase == Phase::Closed {
            return false;
        }
        debug!("puzzle interface closed, dropping solution");
        self.phase = Phase::Closed;
        self.solution.clear();
        self.slots = Slots::default();
        true
    }

    fn set_seed(&mut self, seed: SeedSlot, value: Option<DiscId>) -> bool {
        let current = self.seeds.slot_mut(seed);
        if *current == value {
            return false;
        }
        *current = value;

        // Only the sub-puzzle that reads this seed loses its cached answer
        match seed {
            SeedSlot::Puzzle1Left | SeedSlot::Puzzle1Right => self.solution.puzzle1 = None,
            SeedSlot::Puzzle2 => self.solution.puzzle2 = None,
        }
        debug!(?seed, ?value, "seed changed");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HostLayout;
    use crate::host::VarpHost;

    fn pair() -> PairSelection {
        PairSelection {
            upper: DiscRequirement::Single(DiscId(1)),
            lower: DiscRequirement::Single(DiscId(25)),
        }
    }

    fn solved_tracker() -> PuzzleTracker {
        let mut tracker = PuzzleTracker::new();
        tracker.handle(HostEvent::InterfaceOpened);
        tracker.solution_mut().puzzle1 = Some(DiscRequirement::Single(DiscId(13)));
        tracker.solution_mut().puzzle2 = Some(pair());
        tracker
    }

    #[test]
    fn test_starts_closed() {
        let tracker = PuzzleTracker::new();
        assert_eq!(tracker.phase(), Phase::Closed);
        assert!(!tracker.seeds().all_set());
        assert!(!tracker.solution().is_complete());
    }

    #[test]
    fn test_open_close_clears_solution() {
        let mut tracker = solved_tracker();
        assert!(tracker.solution().is_complete());

        assert!(tracker.handle(HostEvent::InterfaceClosed));
        assert_eq!(tracker.phase(), Phase::Closed);
        assert_eq!(*tracker.solution(), Solution::default());

        assert!(tracker.handle(HostEvent::InterfaceOpened));
        assert!(!tracker.handle(HostEvent::InterfaceOpened));
        assert!(tracker.is_observing());
    }

    #[test]
    fn test_seed_change_invalidates_affected_puzzle() {
        let mut tracker = solved_tracker();
        tracker.handle(HostEvent::SeedChanged { seed: SeedSlot::Puzzle2, value: 8 });
        assert!(tracker.solution().puzzle1.is_some());
        assert!(tracker.solution().puzzle2.is_none());

        let mut tracker = solved_tracker();
        tracker.handle(HostEvent::SeedChanged { seed: SeedSlot::Puzzle1Right, value: 3 });
        assert!(tracker.solution().puzzle1.is_none());
        assert!(tracker.solution().puzzle2.is_some());
    }

    #[test]
    fn test_repeated_seed_value_keeps_cache() {
        let mut tracker = solved_tracker();
        assert!(tracker.handle(HostEvent::SeedChanged { seed: SeedSlot::Puzzle2, value: 8 }));
        tracker.solution_mut().puzzle2 = Some(pair());
        assert!(!tracker.handle(HostEvent::SeedChanged { seed: SeedSlot::Puzzle2, value: 8 }));
        assert!(tracker.solution().puzzle2.is_some());
    }

    #[test]
    fn test_zero_seed_is_unset() {
        let mut tracker = PuzzleTracker::new();
        tracker.handle(HostEvent::SeedChanged { seed: SeedSlot::Puzzle1Left, value: 4 });
        assert_eq!(tracker.seeds().puzzle1_left, Some(DiscId(4)));
        tracker.handle(HostEvent::SeedChanged { seed: SeedSlot::Puzzle1Left, value: 0 });
        assert_eq!(tracker.seeds().puzzle1_left, None);
    }

    #[test]
    fn test_tick_samples_host() {
        let mut host = VarpHost::new(HostLayout::default());
        host.visible = true;
        host.set_seed(SeedSlot::Puzzle1Left, 1);
        host.set_seed(SeedSlot::Puzzle1Right, 2);
        host.set_seed(SeedSlot::Puzzle2, 7);
        host.set_slot(FillSlot::Puzzle1, 13);

        let mut tracker = PuzzleTracker::new();
        assert!(tracker.tick(&host));
        assert!(tracker.is_observing());
        assert!(tracker.seeds().all_set());
        assert_eq!(tracker.slots().puzzle1, SlotState::Filled(DiscId(13)));
        assert!(tracker.slots().puzzle2_upper.is_empty());

        // Nothing moved
        assert!(!tracker.tick(&host));

        // Player pulled the disc back out by hand
        host.set_slot(FillSlot::Puzzle1, 0);
        assert!(tracker.tick(&host));
        assert!(tracker.slots().puzzle1.is_empty());
    }

    #[test]
    fn test_tick_seed_change_drops_only_its_puzzle() {
        use crate::inventory::Inventory;
        use crate::solver::{Action, PuzzleSolver};

        let solver = PuzzleSolver::new();
        let mut host = VarpHost::new(HostLayout::default());
        host.visible = true;
        host.set_seed(SeedSlot::Puzzle1Left, 1);
        host.set_seed(SeedSlot::Puzzle1Right, 2);
        host.set_seed(SeedSlot::Puzzle2, 7);
        let inv = Inventory::from_pairs([(13, 1), (2, 1), (17, 1), (1, 2)]);

        let mut tracker = PuzzleTracker::new();
        tracker.tick(&host);
        solver.next_action(&mut tracker, Some(&inv));
        host.set_slot(FillSlot::Puzzle1, 13);
        tracker.tick(&host);
        assert_eq!(
            solver.next_action(&mut tracker, Some(&inv)),
            Action::Insert {
                requirement: DiscRequirement::EitherOf(DiscId(2), DiscId(9)),
                slot: FillSlot::Puzzle2Upper,
            }
        );
        assert_eq!(tracker.pair_searches(), 1);
        let puzzle1 = tracker.solution().puzzle1;
        assert!(puzzle1.is_some());

        // Orange circle: target drops from 8 to 2, sampled without a notification
        host.set_seed(SeedSlot::Puzzle2, 5);
        assert!(tracker.tick(&host));
        assert_eq!(tracker.solution().puzzle2, None);
        assert_eq!(tracker.solution().puzzle1, puzzle1);

        assert_eq!(
            solver.next_action(&mut tracker, Some(&inv)),
            Action::Insert {
                requirement: DiscRequirement::Single(DiscId(1)),
                slot: FillSlot::Puzzle2Upper,
            }
        );
        assert_eq!(tracker.pair_searches(), 2);

        // Silent close, then a stale answer must not survive the tick that re-opens
        host.visible = false;
        assert!(tracker.tick(&host));
        assert_eq!(tracker.phase(), Phase::Closed);
        tracker.solution_mut().puzzle1 = Some(DiscRequirement::Single(DiscId(28)));
        host.visible = true;
        assert!(tracker.tick(&host));
        assert!(tracker.is_observing());
        assert_eq!(*tracker.solution(), Solution::default());
    }

    #[test]
    fn test_tick_detects_silent_close() {
        let mut host = VarpHost::new(HostLayout::default());
        host.visible = true;
        host.set_slot(FillSlot::Puzzle2Upper, 5);

        let mut tracker = PuzzleTracker::new();
        tracker.tick(&host);
        tracker.solution_mut().puzzle2 = Some(pair());

        host.visible = false;
        assert!(tracker.tick(&host));
        assert_eq!(tracker.phase(), Phase::Closed);
        assert!(tracker.solution().puzzle2.is_none());
        assert_eq!(*tracker.slots(), Slots::default());
    }

    #[test]
    fn test_all_filled() {
        let mut slots = Slots::default();
        assert!(!slots.all_filled());
        for &slot in FillSlot::all() {
            slots.set(slot, SlotState::Filled(DiscId(1)));
        }
        assert!(slots.all_filled());
    }
}
