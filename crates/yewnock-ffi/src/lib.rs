use std::sync::{Arc, Mutex, MutexGuard};
use yewnock_core::{
    Action, DiscId, EngineConfig, FillSlot, HostEvent, HostLayout, Inventory, InventoryItem,
    PuzzleHost, PuzzleSession, SeedSlot, WidgetRef,
};

uniffi::setup_scaffolding!();

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FfiError {
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },
}

/// Receptacle a disc should go into
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum SlotKind {
    Puzzle1,
    Puzzle2Upper,
    Puzzle2Lower,
}

impl From<FillSlot> for SlotKind {
    fn from(slot: FillSlot) -> Self {
        match slot {
            FillSlot::Puzzle1 => SlotKind::Puzzle1,
            FillSlot::Puzzle2Upper => SlotKind::Puzzle2Upper,
            FillSlot::Puzzle2Lower => SlotKind::Puzzle2Lower,
        }
    }
}

/// Interface component to highlight
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Record)]
pub struct Widget {
    pub group: u32,
    pub child: u32,
}

impl From<WidgetRef> for Widget {
    fn from(w: WidgetRef) -> Self {
        Self {
            group: w.group,
            child: w.child,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Record)]
pub struct InventoryItemRecord {
    pub item_id: u32,
    pub quantity: u32,
}

/// Host state sampled once per client tick
#[derive(Debug, Clone, Default, PartialEq, Eq, uniffi::Record)]
pub struct HostFrame {
    /// Whether the machine interface is open
    pub visible: bool,
    pub puzzle1_left: i32,
    pub puzzle1_right: i32,
    pub puzzle2: i32,
    pub puzzle1_slot: i32,
    pub upper_slot: i32,
    pub lower_slot: i32,
    /// Disc container contents, `None` if not loaded
    pub inventory: Option<Vec<InventoryItemRecord>>,
}

impl PuzzleHost for HostFrame {
    fn interface_visible(&self) -> bool {
        self.visible
    }

    fn seed_value(&self, seed: SeedSlot) -> i32 {
        match seed {
            SeedSlot::Puzzle1Left => self.puzzle1_left,
            SeedSlot::Puzzle1Right => self.puzzle1_right,
            SeedSlot::Puzzle2 => self.puzzle2,
        }
    }

    fn slot_value(&self, slot: FillSlot) -> i32 {
        match slot {
            FillSlot::Puzzle1 => self.puzzle1_slot,
            FillSlot::Puzzle2Upper => self.upper_slot,
            FillSlot::Puzzle2Lower => self.lower_slot,
        }
    }

    fn inventory(&self) -> Option<Inventory> {
        self.inventory.as_deref().map(to_inventory)
    }
}

fn to_inventory(items: &[InventoryItemRecord]) -> Inventory {
    Inventory::new(
        items
            .iter()
            .map(|i| InventoryItem {
                id: DiscId(i.item_id),
                quantity: i.quantity,
            })
            .collect(),
    )
}

/// What the client overlay should show
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum Guidance {
    /// Let the player operate the machine manually
    NoSolution { reason: String },
    /// Highlight any of `item_ids` in the inventory and the slot widget
    InsertDisc {
        item_ids: Vec<u32>,
        slot: SlotKind,
        widget: Widget,
    },
    /// Highlight the submit button
    ClickSubmit { widget: Widget },
}

impl Guidance {
    fn from_action(action: Action, layout: &HostLayout) -> Self {
        match action {
            Action::NoSolution(reason) => Guidance::NoSolution {
                reason: reason.to_string(),
            },
            Action::Insert { requirement, slot } => Guidance::InsertDisc {
                item_ids: requirement.alternatives().into_iter().map(|id| id.0).collect(),
                slot: slot.into(),
                widget: slot.widget(layout).into(),
            },
            Action::Confirm => Guidance::ClickSubmit {
                widget: layout.widget(layout.submit_child).into(),
            },
        }
    }
}

/// Puzzle assistant driven by a game-client plugin
#[derive(uniffi::Object)]
pub struct PuzzleAssistant {
    session: Mutex<PuzzleSession>,
}

impl PuzzleAssistant {
    fn session(&self) -> MutexGuard<'_, PuzzleSession> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[uniffi::export]
impl PuzzleAssistant {
    /// Create an assistant with the default catalogue and host layout
    #[uniffi::constructor]
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            session: Mutex::new(PuzzleSession::new()),
        })
    }

    /// Create an assistant from a JSON engine config
    #[uniffi::constructor]
    pub fn with_config_json(json: String) -> Result<Arc<Self>, FfiError> {
        let session = EngineConfig::from_json(&json)
            .and_then(|config| PuzzleSession::from_config(&config))
            .map_err(|e| FfiError::InvalidConfig {
                reason: e.to_string(),
            })?;
        Ok(Arc::new(Self {
            session: Mutex::new(session),
        }))
    }

    pub fn interface_opened(&self) {
        self.session().on_event(HostEvent::InterfaceOpened);
    }

    pub fn interface_closed(&self) {
        self.session().on_event(HostEvent::InterfaceClosed);
    }

    /// Forward a varp change; returns true if it touched puzzle state
    pub fn varp_changed(&self, varp: u32, value: i32) -> bool {
        self.session().on_varp_changed(varp, value)
    }

    /// Sample the frame and return what to highlight
    pub fn tick(&self, frame: HostFrame) -> Guidance {
        let mut session = self.session();
        let action = session.on_tick(&frame);
        Guidance::from_action(action, session.layout())
    }

    /// Weight of a disc item, or 0 if it is not a disc
    pub fn value_of(&self, item_id: u32) -> u8 {
        self.session()
            .solver()
            .table()
            .weight_of(DiscId(item_id))
            .unwrap_or(0)
    }

    /// Total discs among the given inventory items
    pub fn disc_count(&self, items: Vec<InventoryItemRecord>) -> u32 {
        to_inventory(&items).disc_count(self.session().solver().table())
    }

    /// Most recent action as JSON, for client-side logging
    pub fn last_action_json(&self) -> Option<String> {
        let action = self.session().last_action()?;
        match serde_json::to_string(&action) {
            Ok(json) => Some(json),
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize action");
                None
            }
        }
    }
}
