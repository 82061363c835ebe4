//! # Mock Controllers & Testing Guide
//!
//! Test doubles for unit-testing domain client wrappers without spawning a
//! live controller.
//!
//! ## When to use which
//!
//! | Feature | `MockController` | `mock_channel` | Real controller |
//! |---------|------------------|----------------|-----------------|
//! | **Speed** | Instant | Instant | Fast (tokio spawn) |
//! | **Determinism** | Scripted | Scripted | Subject to scheduler |
//! | **State** | None (expectations) | None (raw requests) | Real store |
//! | **Use case** | Client wrapper logic | Asserting request payloads | Controller + resource logic |
//! | **Error injection** | `return_err` | Respond by hand | Hard |
//!
//! ## Patterns
//!
//! - **Client wrapper test (pure mock)**: script expectations on a
//!   [`MockController`], hand its client to the wrapper under test, call
//!   the wrapper, `verify()`.
//! - **Request-shape test (channel mock)**: [`mock_channel`] gives a
//!   client plus the raw request receiver; spawn the wrapper call, pull
//!   the request with [`next_create`]/[`next_get`]/[`next_reconcile`],
//!   assert its payload, answer through the captured oneshot.
//! - **Resource with scripted collaborators**: run a *real* controller but
//!   inject scripted collaborator implementations through the context.
//!   See the crate consumers' integration tests for full examples.
//! - **Failure injection**: `return_err(ControllerError::ControllerClosed)`
//!   simulates outages that are hard to produce with a live controller.

use crate::client::ControllerClient;
use crate::error::ControllerError;
use crate::message::ControllerRequest;
use crate::resource::ControlledResource;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the scripted response for it.
enum Expectation<R: ControlledResource> {
    Get {
        id: R::Id,
        response: Result<Option<R>, ControllerError>,
    },
    Create {
        response: Result<R::Id, ControllerError>,
    },
    Patch {
        id: R::Id,
        response: Result<R, ControllerError>,
    },
    Delete {
        id: R::Id,
        response: Result<(), ControllerError>,
    },
    Reconcile {
        id: R::Id,
        response: Result<(), ControllerError>,
    },
}

/// A scripted controller double with expectation tracking.
///
/// # Example
/// ```ignore
/// let mut mock = MockController::<PizzaOrder>::new();
/// mock.expect_create().return_ok(PizzaOrderId(1));
/// mock.expect_get(PizzaOrderId(1)).return_ok(Some(order));
///
/// let client = mock.client();
/// // drive the wrapper under test ...
/// mock.verify(); // all expectations consumed
/// ```
pub struct MockController<R: ControlledResource> {
    client: ControllerClient<R>,
    expectations: Arc<Mutex<VecDeque<Expectation<R>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<R: ControlledResource> Default for MockController<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ControlledResource> MockController<R> {
    /// Creates a new mock with no expectations. Must be called from within
    /// a tokio runtime; the responder runs as a background task.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ControllerRequest<R>>(100);
        let expectations = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = {
                    let mut exps = expectations_clone.lock().unwrap();
                    exps.pop_front()
                };

                match (request, expectation) {
                    (
                        ControllerRequest::Get { id: _, respond_to },
                        Some(Expectation::Get { id: _, response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ControllerRequest::Create {
                            spec: _,
                            respond_to,
                        },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ControllerRequest::Patch {
                            id: _,
                            patch: _,
                            respond_to,
                        },
                        Some(Expectation::Patch { id: _, response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ControllerRequest::Delete { id: _, respond_to },
                        Some(Expectation::Delete { id: _, response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ControllerRequest::Reconcile { id: _, respond_to },
                        Some(Expectation::Reconcile { id: _, response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ControllerClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ControllerClient<R> {
        self.client.clone()
    }

    /// Expects a `get` request.
    pub fn expect_get(&mut self, id: R::Id) -> GetExpectation<R> {
        GetExpectation {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `create` request.
    pub fn expect_create(&mut self) -> CreateExpectation<R> {
        CreateExpectation {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `patch` request.
    pub fn expect_patch(&mut self, id: R::Id) -> PatchExpectation<R> {
        PatchExpectation {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `delete` request.
    pub fn expect_delete(&mut self, id: R::Id) -> DeleteExpectation<R> {
        DeleteExpectation {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `reconcile` request.
    pub fn expect_reconcile(&mut self, id: R::Id) -> ReconcileExpectation<R> {
        ReconcileExpectation {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Panics unless every scripted expectation was consumed.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("not all expectations were met, {} remaining", exps.len());
        }
    }
}

/// Builder for `get` expectations.
pub struct GetExpectation<R: ControlledResource> {
    id: R::Id,
    expectations: Arc<Mutex<VecDeque<Expectation<R>>>>,
}

impl<R: ControlledResource> GetExpectation<R> {
    pub fn return_ok(self, value: Option<R>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Get {
            id: self.id,
            response: Ok(value),
        });
    }

    pub fn return_err(self, error: ControllerError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Get {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `create` expectations.
pub struct CreateExpectation<R: ControlledResource> {
    expectations: Arc<Mutex<VecDeque<Expectation<R>>>>,
}

impl<R: ControlledResource> CreateExpectation<R> {
    pub fn return_ok(self, id: R::Id) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Create { response: Ok(id) });
    }

    pub fn return_err(self, error: ControllerError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Create {
            response: Err(error),
        });
    }
}

/// Builder for `patch` expectations.
pub struct PatchExpectation<R: ControlledResource> {
    id: R::Id,
    expectations: Arc<Mutex<VecDeque<Expectation<R>>>>,
}

impl<R: ControlledResource> PatchExpectation<R> {
    pub fn return_ok(self, resource: R) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Patch {
            id: self.id,
            response: Ok(resource),
        });
    }

    pub fn return_err(self, error: ControllerError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Patch {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `delete` expectations.
pub struct DeleteExpectation<R: ControlledResource> {
    id: R::Id,
    expectations: Arc<Mutex<VecDeque<Expectation<R>>>>,
}

impl<R: ControlledResource> DeleteExpectation<R> {
    pub fn return_ok(self) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Delete {
            id: self.id,
            response: Ok(()),
        });
    }

    pub fn return_err(self, error: ControllerError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Delete {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `reconcile` expectations.
pub struct ReconcileExpectation<R: ControlledResource> {
    id: R::Id,
    expectations: Arc<Mutex<VecDeque<Expectation<R>>>>,
}

impl<R: ControlledResource> ReconcileExpectation<R> {
    pub fn return_ok(self) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Reconcile {
            id: self.id,
            response: Ok(()),
        });
    }

    pub fn return_err(self, error: ControllerError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Reconcile {
            id: self.id,
            response: Err(error),
        });
    }
}

// =============================================================================
// CHANNEL-LEVEL HELPERS
// =============================================================================

/// Creates a bare client plus the raw request receiver.
///
/// # Testing Strategy
/// For asserting the exact requests a client wrapper produces, a scripted
/// mock hides too much: the test wants to see the payload. This helper
/// hands back the receiving end of the channel so the test can pull each
/// request, assert its fields, and answer through the captured oneshot.
pub fn mock_channel<R: ControlledResource>(
    capacity: usize,
) -> (ControllerClient<R>, mpsc::Receiver<ControllerRequest<R>>) {
    let (sender, receiver) = mpsc::channel(capacity);
    (ControllerClient::new(sender), receiver)
}

/// Pulls the next request and asserts it is a `Create`.
pub async fn next_create<R: ControlledResource>(
    receiver: &mut mpsc::Receiver<ControllerRequest<R>>,
) -> Option<(
    R::Spec,
    tokio::sync::oneshot::Sender<Result<R::Id, ControllerError>>,
)> {
    match receiver.recv().await {
        Some(ControllerRequest::Create { spec, respond_to }) => Some((spec, respond_to)),
        _ => None,
    }
}

/// Pulls the next request and asserts it is a `Get`.
pub async fn next_get<R: ControlledResource>(
    receiver: &mut mpsc::Receiver<ControllerRequest<R>>,
) -> Option<(
    R::Id,
    tokio::sync::oneshot::Sender<Result<Option<R>, ControllerError>>,
)> {
    match receiver.recv().await {
        Some(ControllerRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Pulls the next request and asserts it is a `Patch`.
pub async fn next_patch<R: ControlledResource>(
    receiver: &mut mpsc::Receiver<ControllerRequest<R>>,
) -> Option<(
    R::Id,
    R::Patch,
    tokio::sync::oneshot::Sender<Result<R, ControllerError>>,
)> {
    match receiver.recv().await {
        Some(ControllerRequest::Patch {
            id,
            patch,
            respond_to,
        }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

/// Pulls the next request and asserts it is a `Reconcile`.
pub async fn next_reconcile<R: ControlledResource>(
    receiver: &mut mpsc::Receiver<ControllerRequest<R>>,
) -> Option<(
    R::Id,
    tokio::sync::oneshot::Sender<Result<(), ControllerError>>,
)> {
    match receiver.recv().await {
        Some(ControllerRequest::Reconcile { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ControlledResource;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Gauge {
        id: u32,
        target: u32,
        observed: u32,
    }

    #[derive(Debug)]
    struct GaugeSpec {
        target: u32,
    }

    #[derive(Debug)]
    struct GaugePatch {
        target: Option<u32>,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("gauge error")]
    struct GaugeError;

    #[async_trait]
    impl ControlledResource for Gauge {
        type Id = u32;
        type Spec = GaugeSpec;
        type Patch = GaugePatch;
        type Context = ();
        type Error = GaugeError;

        fn from_spec(id: u32, spec: GaugeSpec) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                target: spec.target,
                observed: 0,
            })
        }

        async fn apply_patch(
            &mut self,
            patch: GaugePatch,
            _ctx: &Self::Context,
        ) -> Result<(), Self::Error> {
            if let Some(target) = patch.target {
                self.target = target;
            }
            Ok(())
        }

        async fn reconcile(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
            if self.observed < self.target {
                self.observed += 1;
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_channel_mock_create() {
        let (client, mut receiver) = mock_channel::<Gauge>(10);

        let create_task =
            tokio::spawn(async move { client.create(GaugeSpec { target: 3 }).await });

        let (spec, responder) = next_create(&mut receiver)
            .await
            .expect("expected create request");
        assert_eq!(spec.target, 3);
        responder.send(Ok(1)).unwrap();

        let result = create_task.await.unwrap();
        assert!(matches!(result, Ok(id) if id == 1));
    }

    #[tokio::test]
    async fn test_scripted_mock_with_expectations() {
        let mut mock = MockController::<Gauge>::new();

        mock.expect_create().return_ok(1);
        mock.expect_get(1).return_ok(Some(Gauge {
            id: 1,
            target: 3,
            observed: 1,
        }));
        mock.expect_reconcile(1).return_ok();

        let client = mock.client();

        let id = client.create(GaugeSpec { target: 3 }).await.unwrap();
        assert_eq!(id, 1);

        let gauge = client.get(1).await.unwrap().unwrap();
        assert_eq!(gauge.observed, 1);

        client.reconcile(1).await.unwrap();

        mock.verify();
    }

    #[tokio::test]
    async fn test_scripted_mock_error_injection() {
        let mut mock = MockController::<Gauge>::new();
        let client = mock.client();

        mock.expect_get(1).return_err(ControllerError::ControllerClosed);

        let result = client.get(1).await;
        assert!(matches!(result, Err(ControllerError::ControllerClosed)));
    }
}
