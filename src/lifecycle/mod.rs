//! # Session Lifecycle
//!
//! This module starts, seeds and stops a draw session.
//!
//! ## The LotterySystem Pattern
//!
//! [`LotterySystem`] is the conductor: it builds the [`SessionActor`](crate::framework::SessionActor),
//! spawns it on the Tokio runtime, uploads the default pool and hands out the
//! [`LotteryClient`](crate::clients::LotteryClient).
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop the client** - closes the request channel
//! 2. **Actor detects closure** - `receiver.recv()` returns `None`
//! 3. **Actor tears down** - stops the preview loop, cancels a pending re-spin, publishes a final idle snapshot
//! 4. **Await completion** - the task handle is joined
//!
//! Clones of the client held elsewhere keep the session alive; drop them first.
//!
//! ## Observability
//!
//! See [`setup_tracing`] for log configuration.

pub mod lottery_system;
pub mod tracing;

pub use self::lottery_system::*;
pub use self::tracing::*;
