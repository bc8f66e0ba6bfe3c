//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the subscriber used by the demo binary.
//!
//! ## Configuration
//!
//! Compact output without module targets (`with_target(false)`), filtered by the
//! `RUST_LOG` environment variable.
//!
//! ```bash
//! # Lifecycle only: start, uploads, settles, resets, shutdown
//! RUST_LOG=info cargo run
//!
//! # Adds request payloads, timer arming and removals
//! RUST_LOG=debug cargo run
//!
//! # Adds every preview tick (one line per 80 ms while spinning)
//! RUST_LOG=trace cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Session lifecycle**: actor start, shutdown with final pool/selected sizes
//! - **Pool operations**: uploads, removals, selection resets
//! - **Draws**: settled winners, scheduled re-spins, rejected picks (warn)
//! - **Cues**: failing audio cues are reported at warn and otherwise ignored
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Session actor started pool=0
//! INFO Draw started phase=previewing
//! INFO Entries uploaded added=10 pool=10
//! INFO pick: Settled winners=["8f0c…", "21d9…", "c4a7…"] available=7
//! INFO pick: Draw settled winners=3
//! INFO pick: Re-spin scheduled available=7
//! INFO Settled winners=["5b1e…", "0d44…", "97aa…"] available=4
//! INFO reset: Reset available=10
//! INFO Shutdown pool=10 selected=0
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
