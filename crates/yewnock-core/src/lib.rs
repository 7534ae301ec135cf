//! Yewnock's disc machine: work out which disc goes where.
//!
//! The machine has two sub-puzzles. The first shows two discs and wants one
//! disc whose weight is their sum; the second shows one disc and wants two
//! discs (upper and lower) whose weights add up to it. A disc weighs its shape
//! multiplier times its colour multiplier.
//!
//! - [`ValueTable`] maps discs to weights and back.
//! - [`PairIndex`] lists, per target, every two-disc way to reach it.
//! - [`PuzzleTracker`] follows the live machine state.
//! - [`PuzzleSolver`] turns tracker + inventory into the next [`Action`].
//! - [`PuzzleSession`] wires the above to host callbacks.

pub mod config;
pub mod disc;
pub mod generator;
pub mod host;
pub mod inventory;
pub mod pair_index;
pub mod session;
pub mod solver;
pub mod tracker;
pub mod value_table;

pub use config::{CatalogEntry, ConfigError, EngineConfig, HostLayout, WidgetRef};
pub use disc::{Colour, Disc, DiscId, DiscRequirement, Shape};
pub use generator::{GeneratedPuzzle, GeneratorConfig, PuzzleGenerator};
pub use host::{FillSlot, PuzzleHost, SeedSlot, VarpHost};
pub use inventory::{Inventory, InventoryItem};
pub use pair_index::{PairCandidate, PairIndex, MAX_PAIR_SUM};
pub use session::PuzzleSession;
pub use solver::{Action, PuzzleSolver, SolveError};
pub use tracker::{
    HostEvent, PairSelection, Phase, PuzzleTracker, Seeds, SlotState, Slots, Solution,
};
pub use value_table::{default_catalog, CatalogError, ValueTable, MAX_WEIGHT};
