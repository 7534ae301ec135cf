//! Offline replay of recorded host activity.
//!
//! A script is a list of frames. Each frame applies its notifications and
//! host-state changes, then runs one tick. Host state carries over between
//! frames, so a frame only lists what changed.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use yewnock_core::{Action, HostEvent, HostLayout, Inventory, PuzzleSession, VarpHost};

/// A varp change the host announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarpNotification {
    pub varp: u32,
    pub value: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Frame {
    /// Interface open/close notifications, applied first
    pub events: Vec<HostEvent>,
    /// Announced varp changes; also written into host state
    pub notifications: Vec<VarpNotification>,
    /// Silent varp changes the engine only sees by sampling
    pub varps: HashMap<u32, i32>,
    /// Interface visibility from this frame on
    pub visible: Option<bool>,
    /// Disc container contents from this frame on
    pub inventory: Option<Inventory>,
    /// Container unavailable from this frame on (until an inventory is given)
    pub drop_container: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayScript {
    pub frames: Vec<Frame>,
}

impl ReplayScript {
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read replay script {}", path.display()))?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid replay script")
    }
}

/// Run every frame and return the action chosen after each tick.
pub fn run(script: &ReplayScript, session: &mut PuzzleSession, layout: &HostLayout) -> Vec<Action> {
    let mut host = VarpHost::new(layout.clone());
    let mut actions = Vec::with_capacity(script.frames.len());

    for (i, frame) in script.frames.iter().enumerate() {
        for &event in &frame.events {
            session.on_event(event);
        }
        for n in &frame.notifications {
            host.set_varp(n.varp, n.value);
            session.on_varp_changed(n.varp, n.value);
        }
        for (&varp, &value) in &frame.varps {
            host.set_varp(varp, value);
        }
        if let Some(visible) = frame.visible {
            host.visible = visible;
        }
        if frame.drop_container {
            host.container = None;
        }
        if let Some(inventory) = &frame.inventory {
            host.container = Some(inventory.clone());
        }

        let action = session.on_tick(&host);
        tracing::debug!(frame = i, ?action, "replayed frame");
        actions.push(action);
    }

    actions
}
