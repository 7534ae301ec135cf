//! One puzzle session: a tracker and a solver driven by host callbacks.
//!
//! The host calls `on_event`/`on_varp_changed` as notifications arrive and
//! `on_tick` once per game tick; all of it runs on the host's client thread.

use tracing::info;

use crate::config::{ConfigError, EngineConfig, HostLayout, WidgetRef};
use crate::host::{PuzzleHost, SeedSlot};
use crate::inventory::Inventory;
use crate::solver::{Action, PuzzleSolver};
use crate::tracker::{HostEvent, PuzzleTracker};

#[derive(Debug, Clone)]
pub struct PuzzleSession {
    layout: HostLayout,
    tracker: PuzzleTracker,
    solver: PuzzleSolver,
    last_action: Option<Action>,
}

impl Default for PuzzleSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PuzzleSession {
    pub fn new() -> Self {
        Self {
            layout: HostLayout::default(),
            tracker: PuzzleTracker::new(),
            solver: PuzzleSolver::new(),
            last_action: None,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            layout: config.layout.clone(),
            tracker: PuzzleTracker::new(),
            solver: PuzzleSolver::with_table(config.value_table()?),
            last_action: None,
        })
    }

    pub fn layout(&self) -> &HostLayout {
        &self.layout
    }

    pub fn tracker(&self) -> &PuzzleTracker {
        &self.tracker
    }

    pub fn solver(&self) -> &PuzzleSolver {
        &self.solver
    }

    pub fn last_action(&self) -> Option<Action> {
        self.last_action
    }

    /// Highlight target of the most recent action.
    pub fn highlight(&self) -> Option<WidgetRef> {
        self.last_action.and_then(|a| a.highlight(&self.layout))
    }

    pub fn on_event(&mut self, event: HostEvent) -> bool {
        self.tracker.handle(event)
    }

    /// Route a raw varp notification. Varps that are not seeds are ignored;
    /// slot varps are picked up by the next tick.
    pub fn on_varp_changed(&mut self, varp: u32, value: i32) -> bool {
        match SeedSlot::from_varp(&self.layout, varp) {
            Some(seed) => self.tracker.handle(HostEvent::SeedChanged { seed, value }),
            None => false,
        }
    }

    /// Re-sample the host and pick the next action.
    pub fn on_tick(&mut self, host: &impl PuzzleHost) -> Action {
        self.tracker.tick(host);
        // No point snapshotting the container while the machine is closed
        let inventory = if self.tracker.is_observing() {
            host.inventory()
        } else {
            None
        };
        self.evaluate(inventory.as_ref())
    }

    /// Re-run the solver against current tracker state.
    pub fn evaluate(&mut self, inventory: Option<&Inventory>) -> Action {
        let action = self.solver.next_action(&mut self.tracker, inventory);
        if self.last_action != Some(action) {
            info!(?action, "next action");
        }
        self.last_action = Some(action);
        action
    }
}
