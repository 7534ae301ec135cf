//! Value table: disc identity <-> weight class.
//!
//! Built once from a catalogue and read-only afterwards. Weight classes hold
//! zero, one or two discs; the two-disc classes are where the puzzle becomes
//! ambiguous (e.g. a yellow circle and a red triangle both weigh 3).

use std::collections::HashMap;

use thiserror::Error;

use crate::disc::{Colour, Disc, DiscId, DiscRequirement, Shape};

/// Heaviest possible disc (violet pentagon).
pub const MAX_WEIGHT: u8 = 35;

/// Number of weight class slots, including the unused class 0.
pub const WEIGHT_CLASSES: usize = MAX_WEIGHT as usize + 1;

/// At most this many discs may share one weight class.
pub const MAX_DISCS_PER_CLASS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("disc id 0 is reserved for empty slots ({disc})")]
    ZeroId { disc: String },
    #[error("disc id {id} appears more than once in the catalogue")]
    DuplicateId { id: DiscId },
    #[error("weight class {weight} would hold more than {MAX_DISCS_PER_CLASS} discs")]
    ClassOverflow { weight: u8 },
}

/// The 28 discs numbered colour-major: red circle = 1, red triangle = 2, ...
/// violet pentagon = 28.
pub fn default_catalog() -> Vec<Disc> {
    let mut discs = Vec::with_capacity(Colour::all().len() * Shape::all().len());
    for &colour in Colour::all() {
        for &shape in Shape::all() {
            let id = DiscId(discs.len() as u32 + 1);
            discs.push(Disc::new(id, shape, colour));
        }
    }
    discs
}

/// Disc identity to weight mapping, plus the reverse weight -> discs index.
#[derive(Debug, Clone)]
pub struct ValueTable {
    discs: Vec<Disc>,
    by_id: HashMap<DiscId, usize>,
    /// classes[w] = discs of weight w, in catalogue order
    classes: [Vec<DiscId>; WEIGHT_CLASSES],
}

impl Default for ValueTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueTable {
    /// Table over the default catalogue.
    pub fn new() -> Self {
        match Self::from_catalog(&default_catalog()) {
            Ok(table) => table,
            Err(e) => unreachable!("default catalogue is valid: {e}"),
        }
    }

    /// Build a table from an explicit catalogue (e.g. remapped host item ids).
    pub fn from_catalog(catalog: &[Disc]) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(catalog.len());
        let mut classes: [Vec<DiscId>; WEIGHT_CLASSES] = std::array::from_fn(|_| Vec::new());

        for (idx, disc) in catalog.iter().enumerate() {
            if disc.id.0 == 0 {
                return Err(CatalogError::ZeroId {
                    disc: disc.to_string(),
                });
            }
            if by_id.insert(disc.id, idx).is_some() {
                return Err(CatalogError::DuplicateId { id: disc.id });
            }
            let weight = disc.weight();
            let class = &mut classes[weight as usize];
            if class.len() == MAX_DISCS_PER_CLASS {
                return Err(CatalogError::ClassOverflow { weight });
            }
            class.push(disc.id);
        }

        Ok(Self {
            discs: catalog.to_vec(),
            by_id,
            classes,
        })
    }

    /// Weight of a disc, or `None` if the id is not a known disc.
    pub fn weight_of(&self, id: DiscId) -> Option<u8> {
        self.disc(id).map(|d| d.weight())
    }

    /// Discs in a weight class (0, 1 or 2 of them). Out-of-range weights are empty.
    pub fn tokens_of(&self, weight: u8) -> &[DiscId] {
        self.classes
            .get(weight as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The requirement that satisfies a slot of the given weight.
    pub fn requirement_for(&self, weight: u8) -> Option<DiscRequirement> {
        match *self.tokens_of(weight) {
            [id] => Some(DiscRequirement::Single(id)),
            [a, b] => Some(DiscRequirement::EitherOf(a, b)),
            _ => None,
        }
    }

    pub fn disc(&self, id: DiscId) -> Option<&Disc> {
        self.by_id.get(&id).map(|&idx| &self.discs[idx])
    }

    pub fn is_disc(&self, id: DiscId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// All discs, in catalogue order.
    pub fn discs(&self) -> &[Disc] {
        &self.discs
    }

    /// Weight classes that hold at least one disc.
    pub fn populated_weights(&self) -> impl Iterator<Item = u8> + '_ {
        (1..=MAX_WEIGHT).filter(move |&w| !self.tokens_of(w).is_empty())
    }

    /// Human-readable label for a requirement, e.g. "yellow circle / red triangle".
    pub fn describe(&self, requirement: &DiscRequirement) -> String {
        requirement
            .alternatives()
            .into_iter()
            .map(|id| match self.disc(id) {
                Some(disc) => disc.to_string(),
                None => id.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_ids() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 28);
        assert_eq!(catalog[0], Disc::new(DiscId(1), Shape::Circle, Colour::Red));
        assert_eq!(catalog[27], Disc::new(DiscId(28), Shape::Pentagon, Colour::Violet));
    }

    #[test]
    fn test_round_trip() {
        let table = ValueTable::new();
        for w in 1..MAX_WEIGHT {
            let tokens = table.tokens_of(w);
            if let Some(&first) = tokens.first() {
                assert_eq!(table.weight_of(first), Some(w));
            }
        }
    }

    #[test]
    fn test_unused_classes() {
        let table = ValueTable::new();
        for w in [11u8, 13, 14, 17, 19, 22, 23, 26, 27, 29, 31, 32, 33, 34] {
            assert!(table.tokens_of(w).is_empty(), "weight {w} should be unused");
            assert_eq!(table.requirement_for(w), None);
        }
        assert!(table.tokens_of(0).is_empty());
        assert!(table.tokens_of(200).is_empty());
    }

    #[test]
    fn test_ambiguous_classes() {
        let table = ValueTable::new();
        let ambiguous: Vec<u8> = table
            .populated_weights()
            .filter(|&w| table.tokens_of(w).len() == 2)
            .collect();
        assert_eq!(ambiguous, vec![3, 4, 5, 6, 12, 15, 20]);

        // Red triangle (2) comes before yellow circle (9) in catalogue order
        assert_eq!(
            table.requirement_for(3),
            Some(DiscRequirement::EitherOf(DiscId(2), DiscId(9)))
        );
        assert_eq!(table.describe(&table.requirement_for(3).unwrap()), "red triangle / yellow circle");
    }

    #[test]
    fn test_single_classes() {
        let table = ValueTable::new();
        assert_eq!(table.requirement_for(1), Some(DiscRequirement::Single(DiscId(1))));
        assert_eq!(table.requirement_for(8), Some(DiscRequirement::Single(DiscId(7))));
        assert_eq!(table.requirement_for(35), Some(DiscRequirement::Single(DiscId(28))));
        assert_eq!(table.populated_weights().count(), 21);
    }

    #[test]
    fn test_unknown_disc() {
        let table = ValueTable::new();
        assert_eq!(table.weight_of(DiscId(999)), None);
        assert!(!table.is_disc(DiscId(0)));
    }

    #[test]
    fn test_from_catalog_rejects_bad_input() {
        let zero = [Disc::new(DiscId(0), Shape::Circle, Colour::Red)];
        assert!(matches!(
            ValueTable::from_catalog(&zero),
            Err(CatalogError::ZeroId { .. })
        ));

        let dup = [
            Disc::new(DiscId(5), Shape::Circle, Colour::Red),
            Disc::new(DiscId(5), Shape::Square, Colour::Red),
        ];
        assert_eq!(
            ValueTable::from_catalog(&dup).unwrap_err(),
            CatalogError::DuplicateId { id: DiscId(5) }
        );

        let crowded = [
            Disc::new(DiscId(1), Shape::Triangle, Colour::Red),
            Disc::new(DiscId(2), Shape::Circle, Colour::Yellow),
            Disc::new(DiscId(3), Shape::Triangle, Colour::Red),
        ];
        assert_eq!(
            ValueTable::from_catalog(&crowded).unwrap_err(),
            CatalogError::ClassOverflow { weight: 3 }
        );
    }
}
