//! # Draw State Machine
//!
//! ```text
//!            start                 pick (>= 3 available)
//!   Idle ───────────▶ Previewing ─────────────────────────▶ Settled
//!                      ▲   ▲  │ tick: sample with replacement  │
//!                      │   │  └───────┘                        │
//!                      │   └──── pick again (>= 3 available) ──┘
//!                      │         re-spin fires after the delay
//!                      └──── reset (from any running state)
//! ```
//!
//! Rejected picks leave the state untouched and record a [`Notice`].
//!
//! The machine holds no timers. The session actor arms its preview interval while
//! [`DrawMachine::is_ticking`] is true and its re-spin sleep while
//! [`DrawMachine::respin_pending`] is true, and re-reads both flags after every
//! transition.

use super::PickError;
use crate::model::{empty_display, DrawPhase, Entry, Notice, SessionSnapshot, Slots, SLOT_COUNT};
use crate::pool::PoolStore;
use crate::selector::{draw_without_replacement, sample_with_replacement, DrawError};
use rand::Rng;
use tracing::{debug, info, trace, warn};

/// Result of an accepted pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// The draw landed; winners in draw order.
    Settled(Vec<Entry>),
    /// Pick-again accepted: the machine is spinning and a re-spin is pending.
    Respinning,
}

#[derive(Debug, Clone, Default)]
pub struct DrawMachine {
    phase: DrawPhase,
    display: Slots,
    respin_pending: bool,
    notice: Option<Notice>,
}

fn fill_display(entries: Vec<Entry>) -> Slots {
    let mut display = empty_display();
    for (slot, entry) in display.iter_mut().zip(entries) {
        *slot = Some(entry);
    }
    display
}

impl DrawMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DrawPhase {
        self.phase
    }

    pub fn display(&self) -> &Slots {
        &self.display
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    /// True while the preview interval must be running.
    pub fn is_ticking(&self) -> bool {
        self.phase == DrawPhase::Previewing
    }

    /// True while a delayed re-spin is waiting to fire.
    pub fn respin_pending(&self) -> bool {
        self.respin_pending
    }

    /// Idle → Previewing. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.phase != DrawPhase::Idle {
            return false;
        }
        self.phase = DrawPhase::Previewing;
        info!(phase = %self.phase, "Draw started");
        true
    }

    /// Refreshes the display with a with-replacement sample of the available pool.
    ///
    /// Ignored unless previewing. An empty pool shows three empty slots.
    pub fn tick<R: Rng + ?Sized>(&mut self, pool: &PoolStore, rng: &mut R) -> bool {
        if !self.is_ticking() {
            return false;
        }
        let sample = sample_with_replacement(&pool.available(), SLOT_COUNT, rng);
        trace!(shown = sample.len(), "Preview tick");
        self.display = fill_display(sample);
        true
    }

    /// Handles the pick button.
    ///
    /// - Spinning (or idle): settles now. A pending re-spin is absorbed by this pick.
    /// - Settled: schedules a re-spin.
    ///
    /// # Errors
    /// [`PickError::InsufficientPool`] when spinning and [`PickError::PoolDepleted`]
    /// when settled, if fewer than three entries are available. The state is not
    /// changed; only the notice is recorded.
    pub fn pick<R: Rng + ?Sized>(
        &mut self,
        pool: &mut PoolStore,
        rng: &mut R,
    ) -> Result<PickOutcome, PickError> {
        match self.phase {
            DrawPhase::Idle | DrawPhase::Previewing => self.settle(pool, rng).map(PickOutcome::Settled),
            DrawPhase::Settled => {
                let available = pool.available_len();
                if available < SLOT_COUNT {
                    let error = PickError::PoolDepleted {
                        available,
                        required: SLOT_COUNT,
                    };
                    warn!(available, "Pick again rejected");
                    self.notice = Some(error.notice());
                    return Err(error);
                }
                self.phase = DrawPhase::Previewing;
                self.respin_pending = true;
                self.notice = None;
                info!(available, "Re-spin scheduled");
                Ok(PickOutcome::Respinning)
            }
        }
    }

    /// Fires the delayed re-spin.
    ///
    /// Returns `None` when nothing is pending, so a timer that outlived its
    /// cancellation has no effect.
    pub fn fire_respin<R: Rng + ?Sized>(
        &mut self,
        pool: &mut PoolStore,
        rng: &mut R,
    ) -> Option<Result<Vec<Entry>, PickError>> {
        if !self.respin_pending || self.phase != DrawPhase::Previewing {
            self.respin_pending = false;
            return None;
        }
        self.respin_pending = false;
        debug!("Re-spin firing");
        Some(self.settle(pool, rng))
    }

    /// Clears the selection and resumes spinning.
    pub fn reset(&mut self, pool: &mut PoolStore) {
        pool.reset();
        self.respin_pending = false;
        self.notice = None;
        self.phase = DrawPhase::Previewing;
        info!(available = pool.available_len(), "Reset");
    }

    /// Cancels a pending re-spin after an entry was removed.
    pub fn entry_removed(&mut self) -> bool {
        let cancelled = std::mem::take(&mut self.respin_pending);
        if cancelled {
            debug!("Re-spin cancelled by removal");
        }
        cancelled
    }

    /// Stops everything. Safe to call repeatedly.
    pub fn shutdown(&mut self) {
        self.respin_pending = false;
        self.phase = DrawPhase::Idle;
    }

    pub fn snapshot(&self, pool: &PoolStore) -> SessionSnapshot {
        let available_len = pool.available_len();
        let selected_len = pool.selected_len();
        SessionSnapshot {
            phase: self.phase,
            display: self.display.clone(),
            pool_len: pool.len(),
            available_len,
            selected_len,
            can_pick_again: self.phase == DrawPhase::Settled && available_len >= SLOT_COUNT,
            pool_empty: available_len == 0
                && self.phase != DrawPhase::Previewing
                && selected_len == 0,
            notice: self.notice,
        }
    }

    fn settle<R: Rng + ?Sized>(
        &mut self,
        pool: &mut PoolStore,
        rng: &mut R,
    ) -> Result<Vec<Entry>, PickError> {
        let winners = match draw_without_replacement(&pool.available(), SLOT_COUNT, rng) {
            Ok(winners) => winners,
            Err(DrawError::InsufficientPool {
                requested,
                available,
            }) => {
                let error = PickError::InsufficientPool {
                    available,
                    required: requested,
                };
                warn!(available, "Pick rejected");
                self.notice = Some(error.notice());
                return Err(error);
            }
        };

        self.phase = DrawPhase::Settled;
        self.respin_pending = false;
        self.notice = None;
        self.display = fill_display(winners.clone());
        pool.mark_selected(winners.iter().map(|entry| &entry.id));
        info!(
            winners = ?winners.iter().map(|e| e.id.as_str()).collect::<Vec<_>>(),
            available = pool.available_len(),
            "Settled"
        );
        Ok(winners)
    }
}
