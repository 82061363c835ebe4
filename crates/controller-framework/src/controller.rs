//! # Generic Resource Controller
//!
//! This module defines the `ResourceController`, the task that owns a
//! collection of resources and serializes reconcile passes over them. It is
//! the "server" half of the framework: it holds the store, receives
//! requests, and is the only code with mutable access to resource state.

use crate::client::ControllerClient;
use crate::error::ControllerError;
use crate::message::ControllerRequest;
use crate::resource::ControlledResource;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The controller task for one resource kind.
///
/// # Concurrency Model
/// The controller processes its channel strictly sequentially, so there is
/// never more than one in-flight pass per resource identity and no locking
/// is needed around the store. Controllers for different resource kinds run
/// in their own tasks and proceed in parallel.
///
/// # Invocation
/// A reconcile pass runs on three occasions: right after a resource is
/// admitted (`Create`), right after its desired state changes (`Patch`),
/// and whenever a `Reconcile` request arrives (resync, or an explicit
/// nudge). Because the pass mutates the stored resource in place through
/// `&mut`, status recorded before a failure survives the failure: the
/// store always reflects everything the pass managed to observe, on every
/// exit path.
///
/// # Usage
///
/// 1. **Create**: `ResourceController::new()` returns the controller and
///    its [`ControllerClient`].
/// 2. **Wire**: pass collaborators into `controller.run(context)`.
/// 3. **Run**: spawn the run loop in a background task.
pub struct ResourceController<R: ControlledResource> {
    receiver: mpsc::Receiver<ControllerRequest<R>>,
    store: HashMap<R::Id, R>,
    next_id: u32,
}

impl<R: ControlledResource> ResourceController<R> {
    /// Creates a new `ResourceController` and its associated client.
    ///
    /// `capacity` bounds the request channel; senders wait when it is full.
    pub fn new(capacity: usize) -> (Self, ControllerClient<R>) {
        let (sender, receiver) = mpsc::channel(capacity);
        let controller = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
        };
        let client = ControllerClient::new(sender);
        (controller, client)
    }

    /// Runs the controller loop, processing requests until every client is
    /// dropped and the channel closes.
    ///
    /// # Context Injection
    /// `context` is handed to every admission, patch, and reconcile hook.
    /// It carries the external collaborators the resource kind declared in
    /// [`ControlledResource::Context`].
    pub async fn run(mut self, context: R::Context) {
        let kind = std::any::type_name::<R>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(kind, "controller started");

        while let Some(request) = self.receiver.recv().await {
            match request {
                ControllerRequest::Create { spec, respond_to } => {
                    debug!(kind, ?spec, "admit");
                    let id = R::Id::from(self.next_id);
                    match R::from_spec(id.clone(), spec) {
                        Ok(resource) => {
                            self.next_id += 1;
                            self.store.insert(id.clone(), resource);
                            info!(kind, %id, size = self.store.len(), "admitted");
                            let _ = respond_to.send(Ok(id.clone()));
                            let _ = self.run_pass(kind, &id, &context).await;
                        }
                        Err(e) => {
                            warn!(kind, error = %e, "admission rejected");
                            let _ =
                                respond_to.send(Err(ControllerError::Resource(Box::new(e))));
                        }
                    }
                }
                ControllerRequest::Get { id, respond_to } => {
                    let resource = self.store.get(&id).cloned();
                    let found = resource.is_some();
                    debug!(kind, %id, found, "get");
                    let _ = respond_to.send(Ok(resource));
                }
                ControllerRequest::Patch {
                    id,
                    patch,
                    respond_to,
                } => {
                    debug!(kind, %id, ?patch, "patch");
                    if let Some(resource) = self.store.get_mut(&id) {
                        if let Err(e) = resource.apply_patch(patch, &context).await {
                            warn!(kind, %id, error = %e, "patch rejected");
                            let _ =
                                respond_to.send(Err(ControllerError::Resource(Box::new(e))));
                            continue;
                        }
                        info!(kind, %id, "patched");
                        let _ = respond_to.send(Ok(resource.clone()));
                        let _ = self.run_pass(kind, &id, &context).await;
                    } else {
                        warn!(kind, %id, "not found");
                        let _ = respond_to.send(Err(ControllerError::NotFound(id.to_string())));
                    }
                }
                ControllerRequest::Delete { id, respond_to } => {
                    debug!(kind, %id, "delete");
                    if self.store.remove(&id).is_some() {
                        info!(kind, %id, size = self.store.len(), "deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(kind, %id, "not found");
                        let _ = respond_to.send(Err(ControllerError::NotFound(id.to_string())));
                    }
                }
                ControllerRequest::Reconcile { id, respond_to } => {
                    // A resource deleted between tick and delivery is not
                    // an error for the requeue machinery.
                    if !self.store.contains_key(&id) {
                        debug!(kind, %id, "resource gone, skipping pass");
                        let _ = respond_to.send(Ok(()));
                        continue;
                    }
                    let result = self.run_pass(kind, &id, &context).await;
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(kind, size = self.store.len(), "controller shutdown");
    }

    /// Runs one reconcile pass for `id`. Status mutations made by the pass
    /// land directly in the store, whether or not the pass succeeds.
    async fn run_pass(
        &mut self,
        kind: &str,
        id: &R::Id,
        context: &R::Context,
    ) -> Result<(), ControllerError> {
        let Some(resource) = self.store.get_mut(id) else {
            return Ok(());
        };
        match resource.reconcile(context).await {
            Ok(()) => {
                debug!(kind, %id, settled = resource.settled(), "pass complete");
                Ok(())
            }
            Err(e) => {
                warn!(kind, %id, error = %e, "pass failed");
                Err(ControllerError::Resource(Box::new(e)))
            }
        }
    }
}
