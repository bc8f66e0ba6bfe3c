//! Animation driver: the spin/settle state machine and its errors.
//!
//! [`DrawMachine`] holds no timers or channels. It exposes flags
//! ([`DrawMachine::is_ticking`], [`DrawMachine::respin_pending`]) that the session
//! actor in [`crate::framework`] turns into a tokio interval and a one-shot sleep.

pub mod error;
pub mod machine;

pub use error::*;
pub use machine::*;
