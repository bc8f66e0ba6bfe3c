//! # Core Session Framework
//!
//! This module defines the actor that owns a draw session.
//!
//! ## Key Types
//!
//! - [`SessionActor`]: The task that owns the pool, the state machine, the RNG and both timers.
//! - [`SessionClient`]: The cloneable handle for sending requests to the actor.
//! - [`SessionRequest`]: The messages exchanged between them.
//! - [`FrameworkError`]: Transport failures and rejected picks.

use crate::config::{ConfigError, LotteryConfig};
use crate::cues::CueObserver;
use crate::driver::{DrawMachine, PickError, PickOutcome};
use crate::model::{DrawPhase, Entry, EntryId, EntryUpload, SessionSnapshot};
use crate::pool::PoolStore;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::future::pending;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{self, Instant, Interval, MissedTickBehavior, Sleep};
use tracing::{debug, info, trace, warn};

// =============================================================================
// 1. MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur between a client and the session actor.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Pick rejected: {0}")]
    Rejected(#[from] PickError),
}

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Message sent to the actor to request an operation.
///
/// Pool mutations (`AddEntries`, `RemoveEntry`) and driver transitions (`Pick`,
/// `Reset`) all go through the same channel, so they are applied in the order
/// they were sent and never interleave with a preview tick.
#[derive(Debug)]
pub enum SessionRequest {
    AddEntries {
        uploads: Vec<EntryUpload>,
        respond_to: Response<Vec<Entry>>,
    },
    RemoveEntry {
        id: EntryId,
        respond_to: Response<bool>,
    },
    Pick {
        respond_to: Response<PickOutcome>,
    },
    Reset {
        respond_to: Response<()>,
    },
    Available {
        respond_to: Response<Vec<Entry>>,
    },
    Entries {
        respond_to: Response<Vec<Entry>>,
    },
    Snapshot {
        respond_to: Response<SessionSnapshot>,
    },
}

// =============================================================================
// 2. THE SESSION ACTOR
// =============================================================================

/// The actor that runs one draw session.
///
/// # Concurrency Model
/// All session state lives in this struct and is touched only from its own task.
/// Requests, preview ticks and the re-spin timer are multiplexed with
/// `tokio::select!`, so at most one of them runs at a time and no locks are
/// needed.
///
/// # Timers
/// The preview [`Interval`] exists only while the machine is previewing and the
/// re-spin [`Sleep`] only while a re-spin is pending. Both are re-synced right
/// after every transition and before the snapshot is published: once a settle
/// is visible the preview interval is already gone.
pub struct SessionActor {
    receiver: mpsc::Receiver<SessionRequest>,
    pool: PoolStore,
    machine: DrawMachine,
    rng: StdRng,
    cues: Arc<dyn CueObserver>,
    snapshots: watch::Sender<SessionSnapshot>,
    tick_interval: Duration,
    respin_delay: Duration,
    ticker: Option<Interval>,
    respin: Option<Pin<Box<Sleep>>>,
}

impl SessionActor {
    /// Creates the actor and its client.
    ///
    /// The actor does nothing until [`SessionActor::run`] is spawned.
    ///
    /// # Errors
    /// [`ConfigError::Zero`] for a zero tick interval or channel capacity.
    pub fn new(
        config: &LotteryConfig,
        pool: PoolStore,
        cues: Arc<dyn CueObserver>,
    ) -> Result<(Self, SessionClient), ConfigError> {
        config.validate()?;
        let (sender, receiver) = mpsc::channel(config.channel_capacity);
        let machine = DrawMachine::new();
        let (snapshots, snapshot_rx) = watch::channel(machine.snapshot(&pool));
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let actor = Self {
            receiver,
            pool,
            machine,
            rng,
            cues,
            snapshots,
            tick_interval: config.tick_interval,
            respin_delay: config.respin_delay,
            ticker: None,
            respin: None,
        };
        let client = SessionClient::new(sender, snapshot_rx);
        Ok((actor, client))
    }

    /// Runs the session until every client has been dropped.
    pub async fn run(mut self) {
        info!(pool = self.pool.len(), "Session actor started");
        let before = self.machine.phase();
        self.machine.start();
        self.after_transition(before, None);

        loop {
            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(msg) => self.handle(msg),
                    None => break,
                },
                _ = next_tick(&mut self.ticker) => self.on_tick(),
                _ = respin_due(&mut self.respin) => self.on_respin(),
            }
        }

        self.machine.shutdown();
        self.sync_timers();
        self.publish();
        info!(
            pool = self.pool.len(),
            selected = self.pool.selected_len(),
            "Shutdown"
        );
    }

    fn handle(&mut self, msg: SessionRequest) {
        match msg {
            SessionRequest::AddEntries {
                uploads,
                respond_to,
            } => {
                debug!(?uploads, "AddEntries");
                let created = self.pool.add(uploads);
                info!(
                    added = created.len(),
                    pool = self.pool.len(),
                    "Entries uploaded"
                );
                self.publish();
                let _ = respond_to.send(Ok(created));
            }
            SessionRequest::RemoveEntry { id, respond_to } => {
                debug!(%id, "RemoveEntry");
                let before = self.machine.phase();
                let removed = self.pool.remove(&id);
                if removed {
                    self.machine.entry_removed();
                    info!(%id, pool = self.pool.len(), "Entry removed");
                }
                self.after_transition(before, None);
                let _ = respond_to.send(Ok(removed));
            }
            SessionRequest::Pick { respond_to } => {
                let before = self.machine.phase();
                debug!(phase = %before, available = self.pool.available_len(), "Pick");
                let result = self.machine.pick(&mut self.pool, &mut self.rng);
                let winners = match &result {
                    Ok(PickOutcome::Settled(winners)) => Some(winners.clone()),
                    _ => None,
                };
                self.after_transition(before, winners.as_deref());
                let _ = respond_to.send(result.map_err(FrameworkError::from));
            }
            SessionRequest::Reset { respond_to } => {
                let before = self.machine.phase();
                self.machine.reset(&mut self.pool);
                self.after_transition(before, None);
                let _ = respond_to.send(Ok(()));
            }
            SessionRequest::Available { respond_to } => {
                let available = self.pool.available();
                debug!(available = available.len(), "Available");
                let _ = respond_to.send(Ok(available));
            }
            SessionRequest::Entries { respond_to } => {
                let _ = respond_to.send(Ok(self.pool.entries().to_vec()));
            }
            SessionRequest::Snapshot { respond_to } => {
                let _ = respond_to.send(Ok(self.machine.snapshot(&self.pool)));
            }
        }
    }

    fn on_tick(&mut self) {
        if self.machine.tick(&self.pool, &mut self.rng) {
            self.publish();
        }
    }

    fn on_respin(&mut self) {
        // A finished Sleep stays ready; drop it before anything else.
        self.respin = None;
        let before = self.machine.phase();
        match self.machine.fire_respin(&mut self.pool, &mut self.rng) {
            Some(Ok(winners)) => self.after_transition(before, Some(&winners)),
            Some(Err(e)) => {
                warn!(error = %e, "Re-spin rejected");
                self.after_transition(before, None);
            }
            None => {
                trace!("Re-spin timer fired with nothing pending");
                self.sync_timers();
            }
        }
    }

    /// Re-arms timers, publishes the new snapshot, then emits cues.
    fn after_transition(&mut self, before: DrawPhase, winners: Option<&[Entry]>) {
        self.sync_timers();
        self.publish();

        let after = self.machine.phase();
        if after == DrawPhase::Previewing && before != DrawPhase::Previewing {
            if let Err(e) = self.cues.on_enter_previewing() {
                warn!(error = %e, "Ambient cue failed");
            }
        }
        if let Some(winners) = winners {
            if let Err(e) = self.cues.on_settled(winners) {
                warn!(error = %e, "Confirmation cue failed");
            }
        }
    }

    fn sync_timers(&mut self) {
        if self.machine.is_ticking() {
            if self.ticker.is_none() {
                let mut ticker =
                    time::interval_at(Instant::now() + self.tick_interval, self.tick_interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                self.ticker = Some(ticker);
                debug!(period_ms = self.tick_interval.as_millis() as u64, "Preview loop started");
            }
        } else if self.ticker.take().is_some() {
            debug!("Preview loop stopped");
        }

        if self.machine.respin_pending() {
            if self.respin.is_none() {
                self.respin = Some(Box::pin(time::sleep(self.respin_delay)));
                debug!(delay_ms = self.respin_delay.as_millis() as u64, "Re-spin armed");
            }
        } else if self.respin.take().is_some() {
            debug!("Re-spin cancelled");
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.machine.snapshot(&self.pool));
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => pending::<()>().await,
    }
}

async fn respin_due(respin: &mut Option<Pin<Box<Sleep>>>) {
    match respin {
        Some(sleep) => sleep.as_mut().await,
        None => pending::<()>().await,
    }
}

// =============================================================================
// 3. THE CLIENT
// =============================================================================

/// A cloneable handle for talking to a [`SessionActor`].
///
/// Dropping every clone closes the channel and stops the actor.
#[derive(Clone)]
pub struct SessionClient {
    sender: mpsc::Sender<SessionRequest>,
    snapshots: watch::Receiver<SessionSnapshot>,
}

impl SessionClient {
    pub fn new(
        sender: mpsc::Sender<SessionRequest>,
        snapshots: watch::Receiver<SessionSnapshot>,
    ) -> Self {
        Self { sender, snapshots }
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(Response<T>) -> SessionRequest,
    ) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn add_entries(&self, uploads: Vec<EntryUpload>) -> Result<Vec<Entry>, FrameworkError> {
        self.request(|respond_to| SessionRequest::AddEntries {
            uploads,
            respond_to,
        })
        .await
    }

    pub async fn remove_entry(&self, id: EntryId) -> Result<bool, FrameworkError> {
        self.request(|respond_to| SessionRequest::RemoveEntry { id, respond_to })
            .await
    }

    pub async fn pick(&self) -> Result<PickOutcome, FrameworkError> {
        self.request(|respond_to| SessionRequest::Pick { respond_to })
            .await
    }

    pub async fn reset(&self) -> Result<(), FrameworkError> {
        self.request(|respond_to| SessionRequest::Reset { respond_to })
            .await
    }

    pub async fn available(&self) -> Result<Vec<Entry>, FrameworkError> {
        self.request(|respond_to| SessionRequest::Available { respond_to })
            .await
    }

    pub async fn entries(&self) -> Result<Vec<Entry>, FrameworkError> {
        self.request(|respond_to| SessionRequest::Entries { respond_to })
            .await
    }

    pub async fn snapshot(&self) -> Result<SessionSnapshot, FrameworkError> {
        self.request(|respond_to| SessionRequest::Snapshot { respond_to })
            .await
    }

    /// A receiver that always holds the latest published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }
}

// =============================================================================
// 4. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cues::CueError;
    use crate::pool::store::tests::lettered_store;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingCues {
        events: Mutex<Vec<&'static str>>,
    }

    impl CueObserver for RecordingCues {
        fn on_enter_previewing(&self) -> Result<(), CueError> {
            self.events.lock().unwrap().push("previewing");
            Err(CueError::Blocked("autoplay".into()))
        }

        fn on_settled(&self, _winners: &[Entry]) -> Result<(), CueError> {
            self.events.lock().unwrap().push("settled");
            Ok(())
        }
    }

    fn config() -> LotteryConfig {
        LotteryConfig {
            seed: Some(11),
            default_entries: Vec::new(),
            ..LotteryConfig::default()
        }
    }

    fn spawn(cues: Arc<dyn CueObserver>) -> (SessionClient, tokio::task::JoinHandle<()>) {
        let (actor, client) = SessionActor::new(&config(), lettered_store(), cues).unwrap();
        (client, tokio::spawn(actor.run()))
    }

    fn uploads(n: usize) -> Vec<EntryUpload> {
        (0..n).map(|i| EntryUpload::new(format!("blob:{i}"))).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_actor_spin_and_settle() {
        let cues = Arc::new(RecordingCues::default());
        let (client, handle) = spawn(cues.clone());

        // 1. Upload
        let created = client.add_entries(uploads(5)).await.unwrap();
        assert_eq!(created.len(), 5);

        // 2. Let the preview loop run
        time::sleep(Duration::from_millis(200)).await;
        let spinning = client.snapshot().await.unwrap();
        assert_eq!(spinning.phase, DrawPhase::Previewing);
        assert_eq!(spinning.shown().count(), 3);

        // 3. Settle
        let PickOutcome::Settled(winners) = client.pick().await.unwrap() else {
            panic!("expected a settle");
        };
        assert_eq!(client.available().await.unwrap().len(), 2);

        // 4. Ticks no longer touch the display
        time::sleep(Duration::from_millis(400)).await;
        let settled = client.snapshot().await.unwrap();
        assert_eq!(settled.phase, DrawPhase::Settled);
        assert_eq!(settled.shown().cloned().collect::<Vec<_>>(), winners);

        // A blocked ambient cue does not stop the session
        assert_eq!(
            *cues.events.lock().unwrap(),
            vec!["previewing", "settled"]
        );

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_pick_keeps_spinning() {
        let (client, handle) = spawn(Arc::new(RecordingCues::default()));
        client.add_entries(uploads(2)).await.unwrap();

        let err = client.pick().await.unwrap_err();

        assert_eq!(
            err,
            FrameworkError::Rejected(PickError::InsufficientPool {
                available: 2,
                required: 3
            })
        );
        let snapshot = client.snapshot().await.unwrap();
        assert_eq!(snapshot.phase, DrawPhase::Previewing);
        assert_eq!(snapshot.selected_len, 0);
        assert!(snapshot.notice.is_some());

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_actor_reports_error() {
        let (client, handle) = spawn(Arc::new(RecordingCues::default()));
        handle.abort();
        let _ = handle.await;

        assert_eq!(client.pick().await, Err(FrameworkError::ActorClosed));
    }

    #[tokio::test]
    async fn test_zero_timings_are_rejected_before_spawn() {
        let zero_tick = LotteryConfig {
            tick_interval: Duration::ZERO,
            ..config()
        };
        let zero_capacity = LotteryConfig {
            channel_capacity: 0,
            ..config()
        };

        let tick_err = SessionActor::new(&zero_tick, lettered_store(), Arc::new(RecordingCues::default())).err();
        let capacity_err =
            SessionActor::new(&zero_capacity, lettered_store(), Arc::new(RecordingCues::default())).err();

        assert_eq!(
            tick_err,
            Some(ConfigError::Zero {
                name: "LOTTERY_TICK_MS"
            })
        );
        assert_eq!(
            capacity_err,
            Some(ConfigError::Zero {
                name: "LOTTERY_CHANNEL_CAPACITY"
            })
        );
    }
}
