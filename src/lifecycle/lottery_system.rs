use crate::clients::LotteryClient;
use crate::config::{ConfigError, LotteryConfig};
use crate::cues::{CueObserver, TracingCues};
use crate::driver::LotteryError;
use crate::framework::SessionActor;
use crate::pool::PoolStore;
use std::sync::Arc;
use tracing::{error, info};

/// The runtime orchestrator for a draw session.
///
/// `LotterySystem` is responsible for:
/// - **Lifecycle Management**: spawning the session actor and stopping it
/// - **Dependency Wiring**: handing the pool store and cue observer to the actor
/// - **Seeding**: uploading the configured default entries
///
/// # Example
///
/// ```ignore
/// let system = LotterySystem::start(&LotteryConfig::default()).await?;
///
/// let outcome = system.client.pick().await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct LotterySystem {
    /// Client for interacting with the session actor
    pub client: LotteryClient,

    /// Task handle of the session actor (used for graceful shutdown)
    handle: tokio::task::JoinHandle<()>,
}

impl LotterySystem {
    /// Spawns a session with an empty pool and logging cues.
    pub fn new(config: &LotteryConfig) -> Result<Self, ConfigError> {
        Self::with_parts(config, PoolStore::new(), Arc::new(TracingCues))
    }

    /// Spawns a session around the given pool store and cue observer.
    ///
    /// Nothing is spawned when `config` fails validation.
    pub fn with_parts(
        config: &LotteryConfig,
        pool: PoolStore,
        cues: Arc<dyn CueObserver>,
    ) -> Result<Self, ConfigError> {
        let (actor, session_client) = SessionActor::new(config, pool, cues)?;
        let handle = tokio::spawn(actor.run());

        Ok(Self {
            client: LotteryClient::new(session_client),
            handle,
        })
    }

    /// Spawns a session and uploads `config.default_entries`.
    pub async fn start(config: &LotteryConfig) -> Result<Self, LotteryError> {
        let system = Self::new(config)?;
        if !config.default_entries.is_empty() {
            let seeded = system.client.upload(config.default_entries.clone()).await?;
            info!(seeded = seeded.len(), "Default entries uploaded");
        }
        Ok(system)
    }

    /// Gracefully shuts down the session.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the actor stopped cleanly
    /// - `Err(String)` if the actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down session...");

        // Dropping the client closes the channel; the actor exits its loop.
        drop(self.client);

        if let Err(e) = self.handle.await {
            error!("Session task failed: {:?}", e);
            return Err(format!("Session task failed: {:?}", e));
        }

        info!("Session shutdown complete.");
        Ok(())
    }
}
