//! Pair index: every way two weight classes add up to a target sum.
//!
//! Built once by exhaustive enumeration over the value table. Candidates for
//! a sum are kept in (i, j) enumeration order; the solver takes the first one
//! the inventory can satisfy, so that order is the tie-break.

use serde::{Deserialize, Serialize};

use crate::disc::{DiscId, DiscRequirement};
use crate::inventory::Inventory;
use crate::value_table::{ValueTable, MAX_WEIGHT};

/// Largest sum the index can hold (34 + 34).
pub const MAX_PAIR_SUM: usize = 2 * (MAX_WEIGHT as usize - 1);

/// A two-disc way of reaching a target sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PairCandidate {
    /// Two of the same disc (its class has only that disc).
    Doubled(DiscId),
    /// One disc from each requirement, upper slot first.
    Both {
        upper: DiscRequirement,
        lower: DiscRequirement,
    },
}

impl PairCandidate {
    pub fn upper(&self) -> DiscRequirement {
        match *self {
            PairCandidate::Doubled(id) => DiscRequirement::Single(id),
            PairCandidate::Both { upper, .. } => upper,
        }
    }

    pub fn lower(&self) -> DiscRequirement {
        match *self {
            PairCandidate::Doubled(id) => DiscRequirement::Single(id),
            PairCandidate::Both { lower, .. } => lower,
        }
    }

    /// Concrete (upper, lower) discs the inventory can supply, if any.
    ///
    /// Both slots drawing the same disc need two units of it.
    pub fn resolve(&self, inventory: &Inventory) -> Option<(DiscId, DiscId)> {
        match *self {
            PairCandidate::Doubled(id) => (inventory.quantity_of(id) >= 2).then_some((id, id)),
            PairCandidate::Both { upper, lower } => {
                for u in upper.alternatives() {
                    for l in lower.alternatives() {
                        let needed = if u == l { 2 } else { 1 };
                        if inventory.quantity_of(u) >= needed && inventory.contains(l) {
                            return Some((u, l));
                        }
                    }
                }
                None
            }
        }
    }
}

/// Sum -> ordered pair candidates.
#[derive(Debug, Clone)]
pub struct PairIndex {
    by_sum: Vec<Vec<PairCandidate>>,
}

impl PairIndex {
    pub fn build(table: &ValueTable) -> Self {
        let mut by_sum: Vec<Vec<PairCandidate>> = vec![Vec::new(); MAX_PAIR_SUM + 1];

        for i in 0..MAX_WEIGHT {
            let Some(first) = table.requirement_for(i) else {
                continue;
            };
            for j in 0..MAX_WEIGHT {
                let Some(second) = table.requirement_for(j) else {
                    continue;
                };
                let candidate = match first {
                    DiscRequirement::Single(id) if i == j => PairCandidate::Doubled(id),
                    _ => PairCandidate::Both {
                        upper: first,
                        lower: second,
                    },
                };
                by_sum[(i + j) as usize].push(candidate);
            }
        }

        Self { by_sum }
    }

    /// Candidates for `sum` in enumeration order. Empty if nothing reaches it.
    pub fn candidates_for_sum(&self, sum: u8) -> &[PairCandidate] {
        self.by_sum
            .get(sum as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First candidate for `sum` the inventory satisfies, with its resolved discs.
    pub fn first_satisfiable(
        &self,
        sum: u8,
        inventory: &Inventory,
    ) -> Option<(PairCandidate, (DiscId, DiscId))> {
        self.candidates_for_sum(sum)
            .iter()
            .find_map(|c| c.resolve(inventory).map(|discs| (*c, discs)))
    }

    /// Total candidates across all sums.
    pub fn len(&self) -> usize {
        self.by_sum.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
