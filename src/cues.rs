//! Audio collaborator seam.
//!
//! The session emits two semantic cues: entering the spinning state (start the
//! ambient loop) and landing a draw (play the confirmation jingle). Playback
//! lives outside the crate; a failing cue is logged and otherwise ignored.

use crate::model::Entry;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CueError {
    /// The platform refused playback (e.g. autoplay policy).
    #[error("Playback blocked: {0}")]
    Blocked(String),

    #[error("Cue failed: {0}")]
    Failed(String),
}

pub trait CueObserver: Send + Sync {
    /// The machine started spinning.
    fn on_enter_previewing(&self) -> Result<(), CueError>;

    /// A draw landed with these winners.
    fn on_settled(&self, winners: &[Entry]) -> Result<(), CueError>;
}

/// Logs cues instead of playing them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingCues;

impl CueObserver for TracingCues {
    fn on_enter_previewing(&self) -> Result<(), CueError> {
        info!(cue = "ambient", "Cue");
        Ok(())
    }

    fn on_settled(&self, winners: &[Entry]) -> Result<(), CueError> {
        info!(cue = "confirmation", winners = winners.len(), "Cue");
        Ok(())
    }
}
