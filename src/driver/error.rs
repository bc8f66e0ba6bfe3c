//! Error types for the draw session.

use crate::config::ConfigError;
use crate::model::Notice;
use thiserror::Error;

/// A pick rejected because too few entries are available.
///
/// Both variants describe the same shortage; they differ in where the pick came
/// from and therefore in the notice shown to the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PickError {
    /// Pick while spinning.
    #[error("Insufficient data in pool: {available} available, {required} required")]
    InsufficientPool { available: usize, required: usize },

    /// Pick-again after a settle.
    #[error("Data pool depleted: {available} available, {required} required")]
    PoolDepleted { available: usize, required: usize },
}

impl PickError {
    pub fn notice(&self) -> Notice {
        match self {
            PickError::InsufficientPool { .. } => Notice::InsufficientPool,
            PickError::PoolDepleted { .. } => Notice::PoolDepleted,
        }
    }
}

/// Errors surfaced by [`LotteryClient`](crate::clients::LotteryClient).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LotteryError {
    /// Pick while spinning with fewer than three available entries.
    #[error("Insufficient data in pool: {available} available, {required} required")]
    InsufficientPool { available: usize, required: usize },

    /// Pick-again with fewer than three available entries.
    #[error("Data pool depleted: {available} available, {required} required")]
    PoolDepleted { available: usize, required: usize },

    /// An error occurred while communicating with the session actor.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),

    /// The session could not be started with the given configuration.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl LotteryError {
    /// The notice to raise for this error, if it is a rejected pick.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            LotteryError::InsufficientPool { .. } => Some(Notice::InsufficientPool),
            LotteryError::PoolDepleted { .. } => Some(Notice::PoolDepleted),
            LotteryError::ActorCommunicationError(_) | LotteryError::Config(_) => None,
        }
    }
}

impl From<PickError> for LotteryError {
    fn from(e: PickError) -> Self {
        match e {
            PickError::InsufficientPool {
                available,
                required,
            } => LotteryError::InsufficientPool {
                available,
                required,
            },
            PickError::PoolDepleted {
                available,
                required,
            } => LotteryError::PoolDepleted {
                available,
                required,
            },
        }
    }
}

impl From<String> for LotteryError {
    fn from(msg: String) -> Self {
        LotteryError::ActorCommunicationError(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejections_carry_distinct_notices() {
        let spinning = PickError::InsufficientPool {
            available: 2,
            required: 3,
        };
        let settled = PickError::PoolDepleted {
            available: 0,
            required: 3,
        };

        assert_eq!(spinning.notice(), Notice::InsufficientPool);
        assert_eq!(settled.notice(), Notice::PoolDepleted);
        assert_eq!(LotteryError::from(settled).notice(), Some(Notice::PoolDepleted));
        assert_eq!(LotteryError::from("closed".to_string()).notice(), None);
    }
}
