use crate::framework::{FrameworkError, SessionClient};
use crate::model::{Entry, SessionSnapshot};
use async_trait::async_trait;

/// Trait for domain clients to inherit the read-only session queries.
///
/// Implementors supply the inner [`SessionClient`] and an error mapping; the
/// queries come for free.
#[async_trait]
pub trait ActorClient: Send + Sync {
    /// The client-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner SessionClient.
    fn inner(&self) -> &SessionClient;

    /// Map framework errors to the client error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// The current snapshot, fetched through the actor.
    #[tracing::instrument(skip(self))]
    async fn snapshot(&self) -> Result<SessionSnapshot, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().snapshot().await.map_err(Self::map_error)
    }

    /// Entries not yet drawn, in pool order.
    #[tracing::instrument(skip(self))]
    async fn available(&self) -> Result<Vec<Entry>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().available().await.map_err(Self::map_error)
    }

    /// Every entry in the pool, in upload order.
    #[tracing::instrument(skip(self))]
    async fn entries(&self) -> Result<Vec<Entry>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().entries().await.map_err(Self::map_error)
    }
}
