//! Type-safe wrappers around [`SessionClient`](crate::framework::SessionClient).

pub mod actor_client;
pub mod lottery_client;

pub use actor_client::*;
pub use lottery_client::*;
