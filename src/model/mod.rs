//! Pure data structures shared by the pool, the driver and the presentation seams.

pub mod entry;
pub mod snapshot;

pub use entry::*;
pub use snapshot::*;
