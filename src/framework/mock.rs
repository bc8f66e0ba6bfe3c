//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`MockSession`] to queue expected requests with canned responses, or
//! [`create_mock_session`] to get a client plus the raw request receiver and
//! answer requests by hand.

use crate::driver::PickOutcome;
use crate::framework::{FrameworkError, SessionClient, SessionRequest};
use crate::model::{Entry, EntryId, SessionSnapshot};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot, watch};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request to the mock session and the response to send back.
enum Expectation {
    AddEntries {
        response: Result<Vec<Entry>, FrameworkError>,
    },
    RemoveEntry {
        id: EntryId,
        response: Result<bool, FrameworkError>,
    },
    Pick {
        response: Result<PickOutcome, FrameworkError>,
    },
    Reset {
        response: Result<(), FrameworkError>,
    },
    Available {
        response: Result<Vec<Entry>, FrameworkError>,
    },
    Entries {
        response: Result<Vec<Entry>, FrameworkError>,
    },
    Snapshot {
        response: Result<SessionSnapshot, FrameworkError>,
    },
}

type Queue = Arc<Mutex<VecDeque<Expectation>>>;

/// A mock session with expectation tracking for fluent testing.
///
/// Requests must arrive in the order the expectations were queued.
///
/// # Example
/// ```ignore
/// let mut mock = MockSession::new();
/// mock.expect_pick().return_ok(PickOutcome::Respinning);
///
/// let client = LotteryClient::new(mock.client());
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockSession {
    client: SessionClient,
    snapshots: watch::Sender<SessionSnapshot>,
    expectations: Queue,
    _handle: tokio::task::JoinHandle<()>,
}

impl Default for MockSession {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSession {
    /// Creates a new mock session with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<SessionRequest>(100);
        let (snapshots, snapshot_rx) = watch::channel(SessionSnapshot::default());
        let expectations: Queue = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        SessionRequest::AddEntries { respond_to, .. },
                        Some(Expectation::AddEntries { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        SessionRequest::RemoveEntry { id, respond_to },
                        Some(Expectation::RemoveEntry {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "RemoveEntry for unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (SessionRequest::Pick { respond_to }, Some(Expectation::Pick { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (SessionRequest::Reset { respond_to }, Some(Expectation::Reset { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        SessionRequest::Available { respond_to },
                        Some(Expectation::Available { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        SessionRequest::Entries { respond_to },
                        Some(Expectation::Entries { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        SessionRequest::Snapshot { respond_to },
                        Some(Expectation::Snapshot { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Unexpected request or expectation mismatch: {request:?}");
                    }
                }
            }
        });

        Self {
            client: SessionClient::new(sender, snapshot_rx),
            snapshots,
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> SessionClient {
        self.client.clone()
    }

    /// Pushes a snapshot to every subscriber, as the real actor would.
    pub fn publish(&self, snapshot: SessionSnapshot) {
        self.snapshots.send_replace(snapshot);
    }

    pub fn expect_add(&mut self) -> ExpectationBuilder<Vec<Entry>> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::AddEntries {
            response,
        })
    }

    pub fn expect_remove(&mut self, id: EntryId) -> ExpectationBuilder<bool> {
        ExpectationBuilder::new(&self.expectations, move |response| {
            Expectation::RemoveEntry { id, response }
        })
    }

    pub fn expect_pick(&mut self) -> ExpectationBuilder<PickOutcome> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Pick { response })
    }

    pub fn expect_reset(&mut self) -> ExpectationBuilder<()> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Reset { response })
    }

    pub fn expect_available(&mut self) -> ExpectationBuilder<Vec<Entry>> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Available {
            response,
        })
    }

    pub fn expect_entries(&mut self) -> ExpectationBuilder<Vec<Entry>> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Entries {
            response,
        })
    }

    pub fn expect_snapshot(&mut self) -> ExpectationBuilder<SessionSnapshot> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Snapshot {
            response,
        })
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Completes an expectation with its response.
pub struct ExpectationBuilder<T> {
    expectations: Queue,
    wrap: Box<dyn FnOnce(Result<T, FrameworkError>) -> Expectation + Send>,
}

impl<T> ExpectationBuilder<T> {
    fn new(
        expectations: &Queue,
        wrap: impl FnOnce(Result<T, FrameworkError>) -> Expectation + Send + 'static,
    ) -> Self {
        Self {
            expectations: expectations.clone(),
            wrap: Box::new(wrap),
        }
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: T) {
        let expectation = (self.wrap)(Ok(value));
        self.expectations.lock().unwrap().push_back(expectation);
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        let expectation = (self.wrap)(Err(error));
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

// =============================================================================
// MANUAL HELPERS
// =============================================================================

/// Creates a session client and the receiver its requests arrive on.
///
/// Use this when a test needs to inspect the request itself or control when
/// the response is sent.
pub fn create_mock_session(
    buffer_size: usize,
) -> (
    SessionClient,
    mpsc::Receiver<SessionRequest>,
    watch::Sender<SessionSnapshot>,
) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (snapshots, snapshot_rx) = watch::channel(SessionSnapshot::default());
    (SessionClient::new(sender, snapshot_rx), receiver, snapshots)
}

/// Waits for the next request and returns its responder if it is a Pick.
pub async fn expect_pick(
    receiver: &mut mpsc::Receiver<SessionRequest>,
) -> Option<oneshot::Sender<Result<PickOutcome, FrameworkError>>> {
    match receiver.recv().await {
        Some(SessionRequest::Pick { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Waits for the next request and returns its payload and responder if it is an AddEntries.
pub async fn expect_add(
    receiver: &mut mpsc::Receiver<SessionRequest>,
) -> Option<(
    Vec<crate::model::EntryUpload>,
    oneshot::Sender<Result<Vec<Entry>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(SessionRequest::AddEntries {
            uploads,
            respond_to,
        }) => Some((uploads, respond_to)),
        _ => None,
    }
}
