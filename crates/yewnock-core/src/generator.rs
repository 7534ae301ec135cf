use serde::{Deserialize, Serialize};

use crate::config::HostLayout;
use crate::disc::{Disc, DiscId, DiscRequirement};
use crate::host::{SeedSlot, VarpHost};
use crate::inventory::Inventory;
use crate::solver::PuzzleSolver;

/// Configuration for puzzle generation
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Upper bound on random discs added beyond the ones the answer needs
    pub max_extra_discs: usize,
    /// Maximum attempts at drawing solvable seeds before giving up
    pub max_attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_extra_discs: 6,
            max_attempts: 1000,
        }
    }
}

/// A machine layout plus a starting inventory that can solve it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPuzzle {
    pub puzzle1_left: DiscId,
    pub puzzle1_right: DiscId,
    pub puzzle2: DiscId,
    pub inventory: Inventory,
}

impl GeneratedPuzzle {
    /// An open machine showing these seeds, with empty receptacles.
    pub fn host(&self, layout: &HostLayout) -> VarpHost {
        let mut host = VarpHost::new(layout.clone());
        host.visible = true;
        host.set_seed(SeedSlot::Puzzle1Left, self.puzzle1_left.0 as i32);
        host.set_seed(SeedSlot::Puzzle1Right, self.puzzle1_right.0 as i32);
        host.set_seed(SeedSlot::Puzzle2, self.puzzle2.0 as i32);
        host.container = Some(self.inventory.clone());
        host
    }
}

/// Random solvable puzzle generator
pub struct PuzzleGenerator {
    config: GeneratorConfig,
    solver: PuzzleSolver,
    rng: SimpleRng,
}

impl Default for PuzzleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PuzzleGenerator {
    /// Create a new generator with default configuration
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
            solver: PuzzleSolver::new(),
            rng: SimpleRng::new(),
        }
    }

    /// Create a generator with a specific seed for reproducibility
    pub fn with_seed(seed: u64) -> Self {
        Self {
            config: GeneratorConfig::default(),
            solver: PuzzleSolver::new(),
            rng: SimpleRng::with_seed(seed),
        }
    }

    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Generate over a custom disc catalogue
    pub fn with_solver(mut self, solver: PuzzleSolver) -> Self {
        self.solver = solver;
        self
    }

    /// Generate a puzzle. `None` only if the catalogue cannot form one.
    pub fn generate(&mut self) -> Option<GeneratedPuzzle> {
        let discs: Vec<Disc> = self.solver.table().discs().to_vec();
        if discs.is_empty() {
            return None;
        }

        for _ in 0..self.config.max_attempts {
            let left = discs[self.rng.next_usize(discs.len())];
            let right = discs[self.rng.next_usize(discs.len())];
            let target1 = left.weight() + right.weight();
            let Some(answer1) = self.solver.table().requirement_for(target1) else {
                continue;
            };

            let seed2 = discs[self.rng.next_usize(discs.len())];
            let candidates = self.solver.pairs().candidates_for_sum(seed2.weight());
            if candidates.is_empty() {
                continue;
            }
            let pair = candidates[self.rng.next_usize(candidates.len())];

            let mut inventory = Inventory::default();
            inventory.add(self.pick(answer1), 1);
            inventory.add(self.pick(pair.upper()), 1);
            inventory.add(self.pick(pair.lower()), 1);

            let extras = self.rng.next_usize(self.config.max_extra_discs + 1);
            for _ in 0..extras {
                let disc = discs[self.rng.next_usize(discs.len())];
                inventory.add(disc.id, 1);
            }

            return Some(GeneratedPuzzle {
                puzzle1_left: left.id,
                puzzle1_right: right.id,
                puzzle2: seed2.id,
                inventory,
            });
        }

        None
    }

    /// Pick one alternative of a requirement
    fn pick(&mut self, requirement: DiscRequirement) -> DiscId {
        let alternatives = requirement.alternatives();
        alternatives[self.rng.next_usize(alternatives.len())]
    }
}

/// Small splitmix64 PRNG, seeded from getrandom so it also works under WASM
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new() -> Self {
        let mut seed_bytes = [0u8; 8];
        if getrandom::getrandom(&mut seed_bytes).is_err() {
            static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);
            let counter = COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            seed_bytes = counter.to_le_bytes();
        }
        Self::with_seed(u64::from_le_bytes(seed_bytes))
    }

    fn with_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn next_usize(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::FillSlot;
    use crate::session::PuzzleSession;
    use crate::solver::Action;

    /// Follow the engine's instructions until it asks for submit.
    fn play(puzzle: &GeneratedPuzzle) -> Vec<Action> {
        let layout = HostLayout::default();
        let mut host = puzzle.host(&layout);
        let mut session = PuzzleSession::new();
        let mut actions = Vec::new();

        for _ in 0..10 {
            let action = session.on_tick(&host);
            actions.push(action);
            match action {
                Action::Insert { requirement, slot } => {
                    let inventory = host.container.as_mut().unwrap();
                    let disc = inventory.holds(&requirement).unwrap();
                    inventory.take(disc);
                    host.set_slot(slot, disc.0 as i32);
                }
                _ => break,
            }
        }
        actions
    }

    #[test]
    fn test_generated_puzzles_are_solvable() {
        let mut generator = PuzzleGenerator::with_seed(42);
        for _ in 0..50 {
            let puzzle = generator.generate().unwrap();
            let actions = play(&puzzle);
            assert_eq!(actions.last(), Some(&Action::Confirm), "{puzzle:?} -> {actions:?}");
            assert_eq!(actions.len(), 4);
        }
    }

    #[test]
    fn test_seeded_generator_is_reproducible() {
        let a = PuzzleGenerator::with_seed(7).generate();
        let b = PuzzleGenerator::with_seed(7).generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_extras() {
        let config = GeneratorConfig {
            max_extra_discs: 0,
            ..GeneratorConfig::default()
        };
        let mut generator = PuzzleGenerator::with_seed(3).with_config(config);
        let puzzle = generator.generate().unwrap();
        let table = crate::value_table::ValueTable::new();
        assert_eq!(puzzle.inventory.disc_count(&table), 3);
    }

    #[test]
    fn test_host_starts_empty() {
        let puzzle = PuzzleGenerator::with_seed(1).generate().unwrap();
        let host = puzzle.host(&HostLayout::default());
        for &slot in FillSlot::all() {
            assert_eq!(host.varp(slot.varp(&host.layout)), 0);
        }
        assert!(host.visible);
    }
}
