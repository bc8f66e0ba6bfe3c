use crate::clients::actor_client::ActorClient;
use crate::driver::{LotteryError, PickOutcome};
use crate::framework::{FrameworkError, SessionClient};
use crate::model::{Entry, EntryId, EntryUpload, SessionSnapshot};
use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, info, instrument};

/// Client for driving a draw session.
///
/// This is what the presentation layer talks to: uploads from the file picker,
/// removals from the pool grid, the pick and reset buttons, and the snapshot
/// stream the slot machine renders.
#[derive(Clone)]
pub struct LotteryClient {
    inner: SessionClient,
}

impl LotteryClient {
    pub fn new(inner: SessionClient) -> Self {
        Self { inner }
    }

    /// Adds one entry per resource locator. The core does not validate them.
    #[instrument(skip(self, resource_refs))]
    pub async fn upload<I, S>(&self, resource_refs: I) -> Result<Vec<Entry>, LotteryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let uploads: Vec<EntryUpload> = resource_refs
            .into_iter()
            .map(EntryUpload::new)
            .collect();
        debug!(count = uploads.len(), "Sending request");
        self.inner.add_entries(uploads).await.map_err(Self::map_error)
    }

    /// Removes an entry. Unknown ids are a no-op and return `false`.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: EntryId) -> Result<bool, LotteryError> {
        debug!("Sending request");
        self.inner.remove_entry(id).await.map_err(Self::map_error)
    }

    /// Presses the pick button.
    ///
    /// While spinning this settles immediately; after a settle it schedules a
    /// re-spin. Rejections carry a notice, see [`LotteryError::notice`].
    #[instrument(skip(self))]
    pub async fn pick(&self) -> Result<PickOutcome, LotteryError> {
        debug!("Sending request");
        let outcome = self.inner.pick().await.map_err(Self::map_error)?;
        if let PickOutcome::Settled(winners) = &outcome {
            info!(winners = winners.len(), "Draw settled");
        }
        Ok(outcome)
    }

    /// Clears the selection and resumes spinning.
    #[instrument(skip(self))]
    pub async fn reset(&self) -> Result<(), LotteryError> {
        debug!("Sending request");
        self.inner.reset().await.map_err(Self::map_error)
    }

    /// Latest-value stream of snapshots for the render collaborator.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.subscribe()
    }
}

#[async_trait]
impl ActorClient for LotteryClient {
    type Error = LotteryError;

    fn inner(&self) -> &SessionClient {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::Rejected(rejection) => rejection.into(),
            other => LotteryError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::PickError;
    use crate::framework::mock::MockSession;
    use crate::model::{DrawPhase, Notice};

    #[tokio::test]
    async fn test_rejections_map_to_notices() {
        let mut mock = MockSession::new();
        mock.expect_pick()
            .return_err(FrameworkError::Rejected(PickError::InsufficientPool {
                available: 2,
                required: 3,
            }));
        mock.expect_pick()
            .return_err(FrameworkError::Rejected(PickError::PoolDepleted {
                available: 0,
                required: 3,
            }));

        let client = LotteryClient::new(mock.client());

        let first = client.pick().await.unwrap_err();
        assert_eq!(first.notice(), Some(Notice::InsufficientPool));
        let second = client.pick().await.unwrap_err();
        assert_eq!(second.notice(), Some(Notice::PoolDepleted));
        assert_eq!(
            second.notice().map(|n| n.message()),
            Some("Data pool depleted. Reset required.")
        );

        mock.verify();
    }

    #[tokio::test]
    async fn test_transport_failure_has_no_notice() {
        let mut mock = MockSession::new();
        mock.expect_reset().return_err(FrameworkError::ActorDropped);

        let client = LotteryClient::new(mock.client());
        let err = client.reset().await.unwrap_err();

        assert!(matches!(err, LotteryError::ActorCommunicationError(_)));
        assert_eq!(err.notice(), None);
        mock.verify();
    }

    #[tokio::test]
    async fn test_upload_and_queries() {
        let mut mock = MockSession::new();
        let created = vec![Entry::new("e1", "blob:1"), Entry::new("e2", "blob:2")];
        mock.expect_add().return_ok(created.clone());
        mock.expect_available().return_ok(created[1..].to_vec());

        let client = LotteryClient::new(mock.client());

        assert_eq!(client.upload(["blob:1", "blob:2"]).await.unwrap(), created);
        assert_eq!(client.available().await.unwrap(), created[1..].to_vec());
        mock.verify();
    }

    #[tokio::test]
    async fn test_entries_and_snapshot_queries() {
        let mut mock = MockSession::new();
        let pool = vec![Entry::new("e1", "blob:1"), Entry::new("e2", "blob:2")];
        let settled = SessionSnapshot {
            phase: DrawPhase::Settled,
            pool_len: 2,
            selected_len: 2,
            pool_empty: false,
            ..SessionSnapshot::default()
        };
        mock.expect_entries().return_ok(pool.clone());
        mock.expect_snapshot().return_ok(settled.clone());
        mock.expect_entries().return_err(FrameworkError::ActorDropped);

        let client = LotteryClient::new(mock.client());

        assert_eq!(client.entries().await.unwrap(), pool);
        assert_eq!(client.snapshot().await.unwrap(), settled);
        assert!(matches!(
            client.entries().await,
            Err(LotteryError::ActorCommunicationError(_))
        ));

        mock.verify();
    }

    #[tokio::test]
    async fn test_subscribe_sees_published_snapshots() {
        let mock = MockSession::new();
        let client = LotteryClient::new(mock.client());
        let mut snapshots = client.subscribe();

        mock.publish(SessionSnapshot {
            phase: DrawPhase::Settled,
            ..SessionSnapshot::default()
        });

        snapshots.changed().await.unwrap();
        assert_eq!(snapshots.borrow().phase, DrawPhase::Settled);
    }
}
