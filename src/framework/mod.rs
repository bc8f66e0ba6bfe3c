//! Session actor framework.
//!
//! This module provides the plumbing that turns the pure pool store and state
//! machine into a running, timer-driven session.
//!
//! # Main Components
//!
//! - [`SessionActor`] - Owns all session state and both timers
//! - [`SessionClient`] - Cloneable request handle
//! - [`FrameworkError`] - Transport failures and rejected picks
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning the actor.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use self::core::*;
