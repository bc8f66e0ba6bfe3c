//! Pool state: uploaded entries and the subset already drawn.

pub mod store;

pub use store::*;
