//! Render-facing view of a draw session.
//!
//! The presentation layer owns no state: everything it needs to draw the slot
//! machine, the pool counter and the notice banner is in [`SessionSnapshot`].

use super::Entry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of slots shown by the machine and drawn on every settle.
pub const SLOT_COUNT: usize = 3;

/// The current display: one optional entry per slot.
pub type Slots = [Option<Entry>; SLOT_COUNT];

/// Three empty slots.
pub fn empty_display() -> Slots {
    [None, None, None]
}

/// Phase of the animation driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawPhase {
    /// Not running: before start or after teardown.
    #[default]
    Idle,
    /// Spinning; the display is refreshed on every preview tick.
    Previewing,
    /// A draw has landed and the display holds the winners.
    Settled,
}

impl fmt::Display for DrawPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawPhase::Idle => f.write_str("idle"),
            DrawPhase::Previewing => f.write_str("previewing"),
            DrawPhase::Settled => f.write_str("settled"),
        }
    }
}

/// User-facing message raised when a pick is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// A pick from the spinning state found fewer than [`SLOT_COUNT`] entries.
    InsufficientPool,
    /// A pick-again after a settle found the pool used up.
    PoolDepleted,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::InsufficientPool => "Insufficient data in pool. Please upload more assets.",
            Notice::PoolDepleted => "Data pool depleted. Reset required.",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Everything the render collaborator consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: DrawPhase,
    pub display: Slots,
    pub pool_len: usize,
    pub available_len: usize,
    pub selected_len: usize,
    /// True when a pick-again would be accepted.
    pub can_pick_again: bool,
    /// True when the "upload required" banner should show: nothing available,
    /// nothing selected and not spinning.
    pub pool_empty: bool,
    pub notice: Option<Notice>,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            phase: DrawPhase::Idle,
            display: empty_display(),
            pool_len: 0,
            available_len: 0,
            selected_len: 0,
            can_pick_again: false,
            pool_empty: true,
            notice: None,
        }
    }
}

impl SessionSnapshot {
    /// Entries currently shown, skipping empty slots.
    pub fn shown(&self) -> impl Iterator<Item = &Entry> {
        self.display.iter().flatten()
    }
}
