//! # Configuration
//!
//! [`LotteryConfig`] carries the session timings and the seed pool. Defaults match
//! the widget timings; [`LotteryConfig::from_env`] overrides them from
//! `LOTTERY_*` environment variables.
//!
//! | Variable                   | Field              | Default |
//! |----------------------------|--------------------|---------|
//! | `LOTTERY_TICK_MS`          | `tick_interval`    | 80      |
//! | `LOTTERY_RESPIN_DELAY_MS`  | `respin_delay`     | 500     |
//! | `LOTTERY_CHANNEL_CAPACITY` | `channel_capacity` | 32      |
//! | `LOTTERY_SEED`             | `seed`             | unset   |
//! | `LOTTERY_NO_DEFAULTS`      | clears `default_entries` | unset |

use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(80);
pub const DEFAULT_RESPIN_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;
const DEFAULT_ENTRY_COUNT: usize = 10;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },

    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotteryConfig {
    /// Period of the preview loop.
    pub tick_interval: Duration,
    /// Pause between a pick-again and the automatic re-spin.
    pub respin_delay: Duration,
    /// Capacity of the session request channel.
    pub channel_capacity: usize,
    /// Fixed RNG seed; draws are seeded from the OS when `None`.
    pub seed: Option<u64>,
    /// Resource locators uploaded when the system starts.
    pub default_entries: Vec<String>,
}

impl Default for LotteryConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            respin_delay: DEFAULT_RESPIN_DELAY,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            seed: None,
            default_entries: placeholder_entries(DEFAULT_ENTRY_COUNT),
        }
    }
}

/// Placeholder image URLs used to seed an empty pool.
pub fn placeholder_entries(count: usize) -> Vec<String> {
    (1..=count)
        .map(|n| format!("https://picsum.photos/400/500?random={n}"))
        .collect()
}

impl LotteryConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads overrides through `lookup`, which returns the raw value of a variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(ms) = parse::<u64>(&lookup, "LOTTERY_TICK_MS")? {
            config.tick_interval = Duration::from_millis(ms);
        }
        if let Some(ms) = parse::<u64>(&lookup, "LOTTERY_RESPIN_DELAY_MS")? {
            config.respin_delay = Duration::from_millis(ms);
        }
        if let Some(capacity) = parse::<usize>(&lookup, "LOTTERY_CHANNEL_CAPACITY")? {
            config.channel_capacity = capacity;
        }
        if let Some(seed) = parse::<u64>(&lookup, "LOTTERY_SEED")? {
            config.seed = Some(seed);
        }
        if let Some(flag) = lookup("LOTTERY_NO_DEFAULTS") {
            if !matches!(flag.as_str(), "" | "0" | "false") {
                config.default_entries.clear();
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval.is_zero() {
            return Err(ConfigError::Zero {
                name: "LOTTERY_TICK_MS",
            });
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::Zero {
                name: "LOTTERY_CHANNEL_CAPACITY",
            });
        }
        Ok(())
    }
}

fn parse<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value }),
    }
}
