//! # Lottery Draw
//!
//! > **A spin-and-settle prize draw over a pool of uploaded images.**
//!
//! Users upload images into a pool. The machine spins, showing random triples
//! from the pool, until someone presses pick; then three distinct entries are
//! drawn, shown, and excluded from later draws until the pool is reset.
//!
//! ## Core Concepts
//!
//! ### Two samplers, never mixed
//! The spinning display samples **with** replacement (repeats are fine, it is a
//! teaser). The final draw samples **without** replacement. They are separate
//! functions in [`selector`].
//!
//! ### A state machine without timers
//! [`driver::DrawMachine`] knows the phases (`Idle`, `Previewing`, `Settled`) and
//! when a re-spin is pending, but owns no clock. The session actor in
//! [`framework`] maps those flags onto a Tokio interval and a one-shot sleep.
//! This keeps every invariant testable with plain unit tests.
//!
//! ## Architecture Notes
//!
//! ### 1. One task owns the session
//! [`framework::SessionActor`] owns the pool, the machine, the RNG and both
//! timers. Requests, ticks and the re-spin timer are multiplexed in one
//! `select!` loop, so updates are strictly ordered and no locks are needed.
//!
//! ### 2. Type-safe errors
//! Rejected picks are [`driver::PickError`]; clients see [`driver::LotteryError`],
//! which maps to the user-facing [`model::Notice`].
//!
//! ### 3. Observability
//! `tracing` everywhere, see [`lifecycle::setup_tracing`].
//!
//! ## Module Tour
//!
//! - [`model`] - entries, snapshots, phases, notices
//! - [`pool`] - the pool store and its available view
//! - [`selector`] - the two sampling algorithms
//! - [`driver`] - the spin/settle state machine and errors
//! - [`framework`] - the session actor, its client and a mock
//! - [`clients`] - the domain client used by the presentation layer
//! - [`cues`] - the audio collaborator seam
//! - [`config`] - timings, seed and default pool
//! - [`lifecycle`] - starting and stopping a session
//!
//! ## Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! RUST_LOG=info cargo run
//!
//! # Reproducible draws
//! LOTTERY_SEED=7 RUST_LOG=info cargo run
//! ```

pub mod clients;
pub mod config;
pub mod cues;
pub mod driver;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod pool;
pub mod selector;
