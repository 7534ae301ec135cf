//! Next-action selection.
//!
//! Given the tracker and an inventory snapshot, decide the single thing the
//! player should do next. Evaluated in a fixed order and short-circuits on the
//! first branch that applies:
//!
//! 1. Interface closed or a seed unset: no suggestion.
//! 2. Puzzle 1 slot empty: insert the disc weighing left + right.
//! 3. Upper slot empty: insert the upper disc of the first pair candidate the
//!    inventory satisfies.
//! 4. Lower slot empty: insert the matching lower disc.
//! 5. Everything filled: press submit.
//!
//! Every failure degrades to `Action::NoSolution`; the player can always solve
//! the machine by hand.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{HostLayout, WidgetRef};
use crate::disc::{DiscId, DiscRequirement};
use crate::host::FillSlot;
use crate::inventory::Inventory;
use crate::pair_index::PairIndex;
use crate::tracker::{PairSelection, PuzzleTracker};
use crate::value_table::ValueTable;

/// Why no suggestion could be made. None of these are fatal; the next tick
/// re-evaluates from current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SolveError {
    #[error("puzzle interface is not open")]
    InterfaceClosed,
    #[error("puzzle seeds have not been observed yet")]
    Unseeded,
    #[error("disc container is not available")]
    MissingContainer,
    #[error("disc {disc} has no known weight")]
    UndefinedWeight { disc: DiscId },
    #[error("no disc weighs {weight}")]
    NoDiscForWeight { weight: u8 },
    #[error("the disc needed for the {slot} is not in the inventory")]
    NotHeld { slot: FillSlot },
    #[error("no held disc pair sums to {target}")]
    NoCandidateSatisfiable { target: u8 },
}

/// What the player should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Fall back to operating the machine manually.
    NoSolution(SolveError),
    /// Put a disc matching `requirement` into `slot`.
    Insert {
        requirement: DiscRequirement,
        slot: FillSlot,
    },
    /// Press the submit button.
    Confirm,
}

impl Action {
    /// UI component to highlight for this action.
    pub fn highlight(&self, layout: &HostLayout) -> Option<WidgetRef> {
        match self {
            Action::NoSolution(_) => None,
            Action::Insert { slot, .. } => Some(slot.widget(layout)),
            Action::Confirm => Some(layout.widget(layout.submit_child)),
        }
    }
}

/// Holds the static tables; all per-puzzle state lives in the tracker.
#[derive(Debug, Clone)]
pub struct PuzzleSolver {
    table: ValueTable,
    pairs: PairIndex,
}

impl Default for PuzzleSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl PuzzleSolver {
    /// Solver over the default disc catalogue.
    pub fn new() -> Self {
        Self::with_table(ValueTable::new())
    }

    pub fn with_table(table: ValueTable) -> Self {
        let pairs = PairIndex::build(&table);
        Self { table, pairs }
    }

    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    pub fn pairs(&self) -> &PairIndex {
        &self.pairs
    }

    /// Next action, with failures folded into `Action::NoSolution`.
    pub fn next_action(
        &self,
        tracker: &mut PuzzleTracker,
        inventory: Option<&Inventory>,
    ) -> Action {
        match self.try_next_action(tracker, inventory) {
            Ok(action) => action,
            Err(e) => {
                match e {
                    SolveError::UndefinedWeight { .. } => warn!("{e}"),
                    _ => debug!("no solution: {e}"),
                }
                Action::NoSolution(e)
            }
        }
    }

    pub fn try_next_action(
        &self,
        tracker: &mut PuzzleTracker,
        inventory: Option<&Inventory>,
    ) -> Result<Action, SolveError> {
        if !tracker.is_observing() {
            return Err(SolveError::InterfaceClosed);
        }
        let seeds = *tracker.seeds();
        let (Some(left), Some(right), Some(seed2)) =
            (seeds.puzzle1_left, seeds.puzzle1_right, seeds.puzzle2)
        else {
            return Err(SolveError::Unseeded);
        };
        let slots = *tracker.slots();

        if slots.puzzle1.is_empty() {
            let requirement = self.puzzle1_requirement(tracker, left, right)?;
            let inventory = inventory.ok_or(SolveError::MissingContainer)?;
            if inventory.holds(&requirement).is_none() {
                return Err(SolveError::NotHeld {
                    slot: FillSlot::Puzzle1,
                });
            }
            return Ok(Action::Insert {
                requirement,
                slot: FillSlot::Puzzle1,
            });
        }

        if slots.puzzle2_upper.is_empty() {
            let selection = self.puzzle2_selection(tracker, seed2, inventory)?;
            return Ok(Action::Insert {
                requirement: selection.upper,
                slot: FillSlot::Puzzle2Upper,
            });
        }

        if let Some(upper) = slots.puzzle2_upper.disc() {
            if slots.puzzle2_lower.is_empty() {
                let requirement = match tracker.solution().puzzle2 {
                    Some(selection) if selection.upper.accepts(upper) => selection.lower,
                    // Upper was filled by hand with something else
                    _ => self.lower_complement(tracker, seed2, upper, inventory)?,
                };
                return Ok(Action::Insert {
                    requirement,
                    slot: FillSlot::Puzzle2Lower,
                });
            }
        }

        Ok(Action::Confirm)
    }

    fn weight(&self, disc: DiscId) -> Result<u8, SolveError> {
        self.table
            .weight_of(disc)
            .ok_or(SolveError::UndefinedWeight { disc })
    }

    fn puzzle1_requirement(
        &self,
        tracker: &mut PuzzleTracker,
        left: DiscId,
        right: DiscId,
    ) -> Result<DiscRequirement, SolveError> {
        if let Some(requirement) = tracker.solution().puzzle1 {
            return Ok(requirement);
        }
        let target = self.weight(left)? + self.weight(right)?;
        let requirement = self
            .table
            .requirement_for(target)
            .ok_or(SolveError::NoDiscForWeight { weight: target })?;
        debug!(target, ?requirement, "puzzle 1 solved");
        tracker.solution_mut().puzzle1 = Some(requirement);
        Ok(requirement)
    }

    fn puzzle2_selection(
        &self,
        tracker: &mut PuzzleTracker,
        seed: DiscId,
        inventory: Option<&Inventory>,
    ) -> Result<PairSelection, SolveError> {
        if let Some(selection) = tracker.solution().puzzle2 {
            return Ok(selection);
        }
        let inventory = inventory.ok_or(SolveError::MissingContainer)?;
        let target = self.weight(seed)?;

        tracker.record_pair_search();
        let (candidate, discs) = self
            .pairs
            .first_satisfiable(target, inventory)
            .ok_or(SolveError::NoCandidateSatisfiable { target })?;
        let selection = PairSelection {
            upper: candidate.upper(),
            lower: candidate.lower(),
        };
        debug!(target, ?discs, ?selection, "puzzle 2 solved");
        tracker.solution_mut().puzzle2 = Some(selection);
        Ok(selection)
    }

    /// Lower requirement that completes whatever is already in the upper slot.
    fn lower_complement(
        &self,
        tracker: &mut PuzzleTracker,
        seed: DiscId,
        upper: DiscId,
        inventory: Option<&Inventory>,
    ) -> Result<DiscRequirement, SolveError> {
        let Some(upper_weight) = self.table.weight_of(upper) else {
            return Ok(self.puzzle2_selection(tracker, seed, inventory)?.lower);
        };
        let inventory = inventory.ok_or(SolveError::MissingContainer)?;
        let target = self.weight(seed)?;
        let rest = target.saturating_sub(upper_weight);
        let requirement = self
            .table
            .requirement_for(rest)
            .filter(|_| upper_weight < target)
            .ok_or(SolveError::NoDiscForWeight { weight: rest })?;
        if inventory.holds(&requirement).is_none() {
            return Err(SolveError::NotHeld {
                slot: FillSlot::Puzzle2Lower,
            });
        }
        tracker.solution_mut().puzzle2 = Some(PairSelection {
            upper: DiscRequirement::Single(upper),
            lower: requirement,
        });
        Ok(requirement)
    }
}
